//! Settled field module - cubes that have come to rest
//!
//! Cubes are grouped into layers by height. Each layer is a set of `(x, z)`
//! columns, so a coordinate can only ever be stored once.
//! Coordinates: y = 0 is the floor; layers above the shaft top are created on
//! demand so a piece settling too high is still recorded (and blocks spawning).

use std::collections::BTreeSet;

use crate::types::{Cube, Shaft};

/// One horizontal slice of settled cubes
type Layer = BTreeSet<(i32, i32)>;

/// Settled cubes, indexed by layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettledField {
    layers: Vec<Layer>,
}

impl SettledField {
    /// Create an empty field with `size_y` layers
    pub fn new(size_y: i32) -> Self {
        Self {
            layers: vec![Layer::new(); size_y.max(0) as usize],
        }
    }

    /// Number of layers currently tracked (at least the shaft height)
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of settled cubes
    pub fn len(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    /// Number of cubes in layer `y` (0 for missing layers)
    pub fn layer_len(&self, y: i32) -> usize {
        self.layer(y).map_or(0, Layer::len)
    }

    fn layer(&self, y: i32) -> Option<&Layer> {
        usize::try_from(y).ok().and_then(|y| self.layers.get(y))
    }

    /// Check if a cube is settled at this coordinate
    pub fn contains(&self, cube: Cube) -> bool {
        self.layer(cube.y)
            .is_some_and(|layer| layer.contains(&(cube.x, cube.z)))
    }

    /// Add cubes to their layers.
    ///
    /// Callers must not add a coordinate twice; cubes below the floor are dropped.
    pub fn add_cubes(&mut self, cubes: &[Cube]) {
        for cube in cubes {
            let Ok(y) = usize::try_from(cube.y) else {
                log::warn!("ignoring settled cube below the floor at {cube}");
                continue;
            };
            if y >= self.layers.len() {
                log::warn!("cube settled above the shaft at {cube}");
                self.layers.resize(y + 1, Layer::new());
            }
            let inserted = self.layers[y].insert((cube.x, cube.z));
            debug_assert!(inserted, "cube {cube} settled twice");
        }
    }

    /// True if any piece cube occupies an already settled coordinate
    pub fn collides_with(&self, piece_cubes: &[Cube]) -> bool {
        piece_cubes.iter().any(|&cube| self.contains(cube))
    }

    /// Check if every in-shaft column of layer `y` is occupied
    pub fn is_level_full(&self, shaft: &Shaft, y: i32) -> bool {
        let Some(layer) = self.layer(y) else {
            return false;
        };
        if layer.len() < shaft.layer_capacity() {
            return false;
        }
        (0..shaft.size_x).all(|x| (0..shaft.size_z).all(|z| layer.contains(&(x, z))))
    }

    /// All full layers inside the shaft, ascending
    pub fn find_full_levels(&self, shaft: &Shaft) -> Vec<i32> {
        (0..shaft.size_y)
            .filter(|&y| self.is_level_full(shaft, y))
            .collect()
    }

    /// Delete layer `y` and shift every layer above it down by one.
    ///
    /// Returns false if `y` is not a tracked layer. Level indices found before
    /// the call are stale afterwards.
    pub fn remove_level(&mut self, y: i32) -> bool {
        let Some(index) = usize::try_from(y).ok().filter(|&i| i < self.layers.len()) else {
            return false;
        };
        self.layers.remove(index);
        self.layers.push(Layer::new());
        true
    }

    /// Index of the lowest empty layer, or the shaft height if all are occupied
    pub fn height(&self, shaft: &Shaft) -> i32 {
        (0..shaft.size_y)
            .find(|&y| self.layer_len(y) == 0)
            .unwrap_or(shaft.size_y)
    }

    /// All settled cubes, bottom layer first
    pub fn cubes(&self) -> Vec<Cube> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(y, layer)| {
                layer
                    .iter()
                    .map(move |&(x, z)| Cube::new(x, y as i32, z))
            })
            .collect()
    }

    /// Remove every cube (keeps the layer count)
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}

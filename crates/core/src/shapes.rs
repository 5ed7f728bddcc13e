//! Shapes module - piece shape table and block-sets
//!
//! Shapes are written as stacks of text layers so they can be read at a glance:
//! rows run along z, columns along x, layers go bottom-up along y, and `#`
//! marks a cube. Parsing centres the offsets on the origin so rotation pivots
//! near the middle of the piece.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::types::{Cube, Shaft};

/// Named subset of the shape table (each set contains the smaller ones)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockSet {
    /// Shapes lying in one layer
    #[default]
    Flat,
    /// Flat shapes plus small 3D ones
    Basic,
    /// Everything, including large shapes
    Extended,
}

impl BlockSet {
    pub const ALL: [BlockSet; 3] = [BlockSet::Flat, BlockSet::Basic, BlockSet::Extended];

    /// Parse block set from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Some(BlockSet::Flat),
            "basic" => Some(BlockSet::Basic),
            "extended" => Some(BlockSet::Extended),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockSet::Flat => "flat",
            BlockSet::Basic => "basic",
            BlockSet::Extended => "extended",
        }
    }
}

/// One entry of the shape table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub name: &'static str,
    /// Bottom layer first
    pub layers: &'static [&'static [&'static str]],
    /// Relative spawn frequency
    pub weight: u32,
    /// Smallest block-set containing this shape
    pub block_set: BlockSet,
}

impl ShapeDef {
    /// Centred offsets of this shape
    pub fn offsets(&self) -> Vec<Cube> {
        parse_shape(self.layers)
    }

    /// `(width, depth)` footprint in cells
    pub fn footprint(&self) -> (i32, i32) {
        let (width, depth) = extents(self.layers);
        (width as i32, depth as i32)
    }

    pub fn fits(&self, shaft: &Shaft) -> bool {
        let (width, depth) = self.footprint();
        width <= shaft.size_x && depth <= shaft.size_z && self.layers.len() as i32 <= shaft.size_y
    }

    pub fn in_set(&self, block_set: BlockSet) -> bool {
        self.block_set <= block_set
    }
}

pub const SHAPES: &[ShapeDef] = &[
    // Flat
    ShapeDef {
        name: "dot",
        layers: &[&["#"]],
        weight: 1,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "domino",
        layers: &[&["##"]],
        weight: 2,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "bar3",
        layers: &[&["###"]],
        weight: 3,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "bar4",
        layers: &[&["####"]],
        weight: 2,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "corner",
        layers: &[&["#.", "##"]],
        weight: 3,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "square",
        layers: &[&["##", "##"]],
        weight: 2,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "tee",
        layers: &[&[".#.", "###"]],
        weight: 3,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "ell",
        layers: &[&["#..", "###"]],
        weight: 3,
        block_set: BlockSet::Flat,
    },
    ShapeDef {
        name: "zed",
        layers: &[&[".##", "##."]],
        weight: 3,
        block_set: BlockSet::Flat,
    },
    // Basic 3D
    ShapeDef {
        name: "tripod",
        layers: &[&["##", "#."], &["#.", ".."]],
        weight: 2,
        block_set: BlockSet::Basic,
    },
    ShapeDef {
        name: "screw_left",
        layers: &[&["##", ".."], &[".#", ".#"]],
        weight: 2,
        block_set: BlockSet::Basic,
    },
    ShapeDef {
        name: "screw_right",
        layers: &[&["##", ".."], &["#.", "#."]],
        weight: 2,
        block_set: BlockSet::Basic,
    },
    // Extended
    ShapeDef {
        name: "plus",
        layers: &[&[".#.", "###", ".#."]],
        weight: 1,
        block_set: BlockSet::Extended,
    },
    ShapeDef {
        name: "long_ell",
        layers: &[&["#...", "####"]],
        weight: 1,
        block_set: BlockSet::Extended,
    },
    ShapeDef {
        name: "big_cube",
        layers: &[&["##", "##"], &["##", "##"]],
        weight: 1,
        block_set: BlockSet::Extended,
    },
];

fn extents(layers: &[&[&str]]) -> (usize, usize) {
    let width = layers
        .iter()
        .flat_map(|rows| rows.iter().map(|row| row.chars().count()))
        .max()
        .unwrap_or(0);
    let depth = layers.iter().map(|rows| rows.len()).max().unwrap_or(0);
    (width, depth)
}

/// Turn text layers into offsets centred on the origin.
///
/// Each axis is shifted by `floor(extent / 2)`, where width and depth are the
/// maxima over all layers.
pub fn parse_shape(layers: &[&[&str]]) -> Vec<Cube> {
    let (width, depth) = extents(layers);
    let shift_x = (width / 2) as i32;
    let shift_y = (layers.len() / 2) as i32;
    let shift_z = (depth / 2) as i32;

    let mut offsets = Vec::new();
    for (y, rows) in layers.iter().enumerate() {
        for (z, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    offsets.push(Cube::new(
                        x as i32 - shift_x,
                        y as i32 - shift_y,
                        z as i32 - shift_z,
                    ));
                }
            }
        }
    }
    offsets
}

/// Look up a shape by name
pub fn find_shape(name: &str) -> Option<&'static ShapeDef> {
    SHAPES.iter().find(|shape| shape.name == name)
}

/// Centred offsets for a named shape
pub fn offsets_for(name: &str) -> Option<Vec<Cube>> {
    find_shape(name).map(ShapeDef::offsets)
}

/// Shapes of a block-set that fit inside the shaft
pub fn candidates(block_set: BlockSet, shaft: &Shaft) -> impl Iterator<Item = &'static ShapeDef> + '_ {
    SHAPES
        .iter()
        .filter(move |shape| shape.in_set(block_set) && shape.fits(shaft))
}

/// Supplies offsets for each newly spawned piece
pub trait PieceSource {
    fn next_offsets(&mut self, block_set: BlockSet, shaft: &Shaft) -> Vec<Cube>;
}

impl<F> PieceSource for F
where
    F: FnMut(BlockSet, &Shaft) -> Vec<Cube>,
{
    fn next_offsets(&mut self, block_set: BlockSet, shaft: &Shaft) -> Vec<Cube> {
        self(block_set, shaft)
    }
}

/// Weighted random draw from the shape table
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: SimpleRng,
}

impl RandomShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick a shape definition; `None` if nothing in the set fits the shaft
    pub fn pick(&mut self, block_set: BlockSet, shaft: &Shaft) -> Option<&'static ShapeDef> {
        let shapes: Vec<&'static ShapeDef> = candidates(block_set, shaft).collect();
        let weights: Vec<u32> = shapes.iter().map(|shape| shape.weight).collect();
        self.rng.pick_weighted(&weights).map(|i| shapes[i])
    }
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomShapes {
    fn next_offsets(&mut self, block_set: BlockSet, shaft: &Shaft) -> Vec<Cube> {
        match self.pick(block_set, shaft) {
            Some(shape) => {
                log::debug!("next shape: {}", shape.name);
                shape.offsets()
            }
            // A single cube always fits a valid shaft.
            None => vec![Cube::ZERO],
        }
    }
}

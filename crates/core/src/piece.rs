//! Piece module - the falling shape
//!
//! A piece is a position plus a list of cube offsets around it. The offsets
//! *are* the orientation: rotating rewrites them, moving rewrites the position,
//! and the absolute occupancy is always recomputed from both.

use crate::types::{Axis, Cube, Direction};

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    position: Cube,
    offsets: Vec<Cube>,
}

impl Piece {
    pub fn new(position: Cube, offsets: Vec<Cube>) -> Self {
        Self { position, offsets }
    }

    pub fn position(&self) -> Cube {
        self.position
    }

    pub fn offsets(&self) -> &[Cube] {
        &self.offsets
    }

    /// Number of cubes in the piece
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Translate by `offset` (no legality check)
    pub fn move_by(&mut self, offset: Cube) {
        self.position += offset;
    }

    /// Copy translated by `offset`
    pub fn moved(&self, offset: Cube) -> Self {
        let mut piece = self.clone();
        piece.move_by(offset);
        piece
    }

    /// Quarter-turn every offset around a world axis (no legality check)
    pub fn rotate(&mut self, axis: Axis, direction: Direction) {
        for offset in &mut self.offsets {
            *offset = rotate_offset(*offset, axis, direction);
        }
    }

    /// Copy rotated by a quarter turn
    pub fn rotated(&self, axis: Axis, direction: Direction) -> Self {
        let mut piece = self.clone();
        piece.rotate(axis, direction);
        piece
    }

    /// Absolute cube coordinates (`position + offset`)
    pub fn cubes(&self) -> Vec<Cube> {
        self.offsets.iter().map(|&o| self.position + o).collect()
    }

    /// Highest offset on the y axis (0 for an empty piece)
    pub fn max_offset_y(&self) -> i32 {
        self.offsets.iter().map(|o| o.y).max().unwrap_or(0)
    }
}

/// 90° rotation of a single offset.
///
/// - X: `(x, y, z) -> (x, -z*d, y*d)`
/// - Y: `(x, y, z) -> (-z*d, y, x*d)`
/// - Z: `(x, y, z) -> (-y*d, x*d, z)`
pub fn rotate_offset(offset: Cube, axis: Axis, direction: Direction) -> Cube {
    let d = direction.sign();
    let Cube { x, y, z } = offset;
    match axis {
        Axis::X => Cube::new(x, -z * d, y * d),
        Axis::Y => Cube::new(-z * d, y, x * d),
        Axis::Z => Cube::new(-y * d, x * d, z),
    }
}

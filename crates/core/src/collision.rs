//! Collision module - legality checks and wall-kick resolution
//!
//! All functions are pure: they look at candidate cubes, the shaft and the
//! settled field, and never mutate a piece that is in play.
//!
//! There is no ceiling: a piece may sit above `size_y` while it
//! spawns or after a rotation. Only the floor and the four walls constrain it.

use crate::error::SessionError;
use crate::field::SettledField;
use crate::piece::Piece;
use crate::types::{Cube, Shaft, KICK_ITERATION_LIMIT};

/// What a set of cubes hits when checked against the shaft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaftCollision {
    /// Fully inside
    Clear,
    /// Below the floor (no push-back possible)
    Floor,
    /// Through a side wall; `push` points away from it
    Wall { push: Cube },
}

impl ShaftCollision {
    pub fn is_collision(&self) -> bool {
        !matches!(self, ShaftCollision::Clear)
    }
}

/// Classify the first shaft violation found (cube order, then x, floor, z)
pub fn shaft_collision(cubes: &[Cube], shaft: &Shaft) -> ShaftCollision {
    for cube in cubes {
        if cube.x < 0 {
            return ShaftCollision::Wall { push: Cube::RIGHT };
        }
        if cube.x >= shaft.size_x {
            return ShaftCollision::Wall { push: Cube::LEFT };
        }
        if cube.y < 0 {
            return ShaftCollision::Floor;
        }
        if cube.z < 0 {
            return ShaftCollision::Wall { push: Cube::BACK };
        }
        if cube.z >= shaft.size_z {
            return ShaftCollision::Wall { push: Cube::FORWARD };
        }
    }
    ShaftCollision::Clear
}

/// True if any cube is outside the walls or below the floor
pub fn is_outside_shaft(cubes: &[Cube], shaft: &Shaft) -> bool {
    shaft_collision(cubes, shaft).is_collision()
}

/// True if any cube rests on the floor layer
pub fn touches_floor(cubes: &[Cube]) -> bool {
    cubes.iter().any(|cube| cube.y == 0)
}

/// True if the piece can occupy its cubes
pub fn is_legal(cubes: &[Cube], shaft: &Shaft, field: &SettledField) -> bool {
    !is_outside_shaft(cubes, shaft) && !field.collides_with(cubes)
}

/// Outcome of trying to push a rotated piece back into the shaft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickResult {
    /// The piece fits after translating it by `translation`
    Resolved { piece: Piece, translation: Cube },
    /// Another wall, the floor or a settled cube is in the way
    Rejected,
}

/// Push a rotated piece away from the wall it sticks into.
///
/// The push vector from the first collision is applied repeatedly until the
/// piece is clear. Hitting a different obstacle rejects the rotation; running
/// past [`KICK_ITERATION_LIMIT`] is a logic error.
pub fn resolve_wall_kick(
    rotated: &Piece,
    push: Cube,
    shaft: &Shaft,
    field: &SettledField,
) -> Result<KickResult, SessionError> {
    let mut piece = rotated.clone();
    let mut translation = Cube::ZERO;

    for _ in 0..KICK_ITERATION_LIMIT {
        piece.move_by(push);
        translation += push;
        let cubes = piece.cubes();

        match shaft_collision(&cubes, shaft) {
            ShaftCollision::Wall { push: next } if next == push => {}
            ShaftCollision::Wall { .. } | ShaftCollision::Floor => {
                return Ok(KickResult::Rejected);
            }
            ShaftCollision::Clear => {
                if field.collides_with(&cubes) {
                    return Ok(KickResult::Rejected);
                }
                return Ok(KickResult::Resolved { piece, translation });
            }
        }

        if field.collides_with(&cubes) {
            return Ok(KickResult::Rejected);
        }
    }

    Err(SessionError::KickLimitExceeded {
        attempts: KICK_ITERATION_LIMIT,
    })
}

/// Lowest legal position reachable by moving straight down
pub fn drop_position(piece: &Piece, shaft: &Shaft, field: &SettledField) -> Piece {
    let mut landed = piece.clone();
    loop {
        let next = landed.moved(Cube::DOWN);
        if !is_legal(&next.cubes(), shaft, field) {
            return landed;
        }
        landed = next;
    }
}

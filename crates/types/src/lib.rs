//! Core types module - shared value types and tuning constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be used
//! from the simulation core, the terminal front-end and tests alike.
//!
//! # Coordinates
//!
//! The shaft is a box of `size_x * size_y * size_z` cells:
//!
//! - **x**: left to right, `0..size_x`
//! - **y**: height, `0` is the floor, grows upwards
//! - **z**: back to front, `0..size_z`
//!
//! # Timing
//!
//! Times are in seconds (`f32`), matching the frame delta a host loop measures.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALLING_SPEED` | 1.0 | Seconds between gravity steps |
//! | `DEFAULT_ANIMATION_DURATION` | 0.3 | Seconds per move/rotate tween |
//! | `FRAME_MS` | 16 | Host loop frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use threetris_types::{Axis, Cube, Direction, Shaft};
//!
//! let shaft = Shaft::new(4, 10, 4);
//! assert_eq!(shaft.layer_capacity(), 16);
//!
//! let moved = Cube::new(1, 2, 3) + Cube::LEFT;
//! assert_eq!(moved, Cube::new(0, 2, 3));
//!
//! assert_eq!(Axis::from_str("y"), Some(Axis::Y));
//! assert_eq!(Direction::CounterClockwise.sign(), -1);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Default shaft width (x)
pub const DEFAULT_SHAFT_SIZE_X: i32 = 5;

/// Default shaft height (y)
pub const DEFAULT_SHAFT_SIZE_Y: i32 = 12;

/// Default shaft depth (z)
pub const DEFAULT_SHAFT_SIZE_Z: i32 = 5;

/// Seconds between two gravity steps.
///
/// Taken from the 0-3 s tuning range; settings saved with `fallingSpeed: 15` fall much slower.
pub const DEFAULT_FALLING_SPEED: f32 = 1.0;

/// Seconds a move/rotate animation takes
pub const DEFAULT_ANIMATION_DURATION: f32 = 0.3;

/// Host loop frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Upper bound on push-back steps while resolving a wall kick.
///
/// Exceeding it means the resolver is looping on a bug, not on gameplay.
pub const KICK_ITERATION_LIMIT: u32 = 100;

/// Integer cube coordinate (or offset) inside the shaft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub const ZERO: Cube = Cube { x: 0, y: 0, z: 0 };
    pub const LEFT: Cube = Cube { x: -1, y: 0, z: 0 };
    pub const RIGHT: Cube = Cube { x: 1, y: 0, z: 0 };
    pub const FORWARD: Cube = Cube { x: 0, y: 0, z: -1 };
    pub const BACK: Cube = Cube { x: 0, y: 0, z: 1 };
    pub const DOWN: Cube = Cube { x: 0, y: -1, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, rhs: Cube) -> Self::Output {
        Cube::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Cube {
    fn add_assign(&mut self, rhs: Cube) {
        *self = *self + rhs;
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, rhs: Cube) -> Self::Output {
        Cube::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Cube {
    type Output = Cube;

    fn neg(self) -> Self::Output {
        Cube::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Cube {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Cube::new(x, y, z)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// World axis a piece rotates around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Parse axis from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Immutable bounding geometry of the playing volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shaft {
    pub size_x: i32,
    pub size_y: i32,
    pub size_z: i32,
}

impl Shaft {
    pub const fn new(size_x: i32, size_y: i32, size_z: i32) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
        }
    }

    /// Number of `(x, z)` cells in one layer
    pub fn layer_capacity(&self) -> usize {
        (self.size_x.max(0) as usize) * (self.size_z.max(0) as usize)
    }

    /// Whether `(x, z)` lies between the side walls
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.size_x && z >= 0 && z < self.size_z
    }
}

impl Default for Shaft {
    fn default() -> Self {
        Self::new(
            DEFAULT_SHAFT_SIZE_X,
            DEFAULT_SHAFT_SIZE_Y,
            DEFAULT_SHAFT_SIZE_Z,
        )
    }
}

impl fmt::Display for Shaft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.size_x, self.size_y, self.size_z)
    }
}

/// Session run state (game over is tracked separately as a sticky flag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        }
    }
}

/// Score record, reset on every start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    /// Full layers removed
    pub removed_rows: u32,
    /// Cubes that have settled
    pub fallen_cubes: u32,
    /// Index of the lowest empty layer (the stack height)
    pub fallen_cubes_height: u32,
}

/// Gameplay commands that go through the command queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBack,
    Rotate(Axis, Direction),
    HardDrop,
}

impl Command {
    /// Translation for the four move commands
    pub fn offset(&self) -> Option<Cube> {
        match self {
            Command::MoveLeft => Some(Cube::LEFT),
            Command::MoveRight => Some(Cube::RIGHT),
            Command::MoveForward => Some(Cube::FORWARD),
            Command::MoveBack => Some(Cube::BACK),
            Command::Rotate(..) | Command::HardDrop => None,
        }
    }

    /// Parse command from string (e.g. `moveLeft`, `rotateX+`, `hardDrop`)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(rest) = lower.strip_prefix("rotate") {
            let mut chars = rest.chars();
            let axis = Axis::from_str(&chars.next()?.to_string())?;
            let direction = match chars.as_str() {
                "+" | "" => Direction::Clockwise,
                "-" => Direction::CounterClockwise,
                _ => return None,
            };
            return Some(Command::Rotate(axis, direction));
        }
        match lower.as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "moveforward" => Some(Command::MoveForward),
            "moveback" => Some(Command::MoveBack),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveForward => "moveForward",
            Command::MoveBack => "moveBack",
            Command::HardDrop => "hardDrop",
            Command::Rotate(Axis::X, Direction::Clockwise) => "rotateX+",
            Command::Rotate(Axis::X, Direction::CounterClockwise) => "rotateX-",
            Command::Rotate(Axis::Y, Direction::Clockwise) => "rotateY+",
            Command::Rotate(Axis::Y, Direction::CounterClockwise) => "rotateY-",
            Command::Rotate(Axis::Z, Direction::Clockwise) => "rotateZ+",
            Command::Rotate(Axis::Z, Direction::CounterClockwise) => "rotateZ-",
        }
    }
}

//! Terminal front-end for the shaft game.
//!
//! The session draws into a [`Scene`] (its renderer collaborator); each frame
//! [`GameView`] turns the scene and HUD into a [`FrameBuffer`] and
//! [`Terminal`] flushes only what changed.
//!
//! Everything except [`Terminal`] is pure and unit-tested.

pub mod fb;
pub mod game_view;
pub mod scene;
pub mod terminal;

pub use threetris_core as core;
pub use threetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{layer_color, GameView, Layout, ViewState, Viewport};
pub use scene::{HudState, Scene, SharedHud};
pub use terminal::{changed_runs, encode_diff, encode_full, Terminal};

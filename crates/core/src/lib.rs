//! Simulation core for a falling-block game played in a 3D shaft
//!
//! Everything here is deterministic and single-threaded. The host loop feeds
//! frame deltas in and the session calls back into injected collaborators
//! (renderer, animator) and event listeners. There is no I/O apart from
//! loading and saving [`Settings`].
//!
//! # Module Structure
//!
//! - [`piece`]: the falling piece (position + offsets) and quarter-turn rotation
//! - [`field`]: settled cubes by layer, full-level detection and removal
//! - [`collision`]: shaft/field legality and wall-kick resolution
//! - [`scheduler`]: gravity timer polled once per frame
//! - [`shapes`]: shape table, block-sets and piece sources
//! - [`session`]: the game state machine
//! - [`animation`], [`render`]: collaborator traits
//! - [`events`], [`queue`]: observer list and command serialization
//!
//! # Coordinates
//!
//! `x` and `z` span the shaft floor, `y` grows upward from the floor at `y = 0`.
//! There is no ceiling: only the floor and the four walls constrain a piece.
//!
//! # Example
//!
//! ```
//! use threetris_core::{GameSession, InstantAnimator, NullRenderer, Settings};
//!
//! let settings = Settings::default();
//! let mut session = GameSession::new(settings.clone(), NullRenderer, InstantAnimator).with_seed(7);
//! session.start(&settings).unwrap();
//!
//! session.move_left().unwrap();
//! session.hard_drop().unwrap();
//! assert!(session.score().fallen_cubes > 0);
//! ```

pub mod animation;
pub mod collision;
pub mod error;
pub mod events;
pub mod field;
pub mod piece;
pub mod queue;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod shapes;

pub use threetris_types as types;

pub use animation::{Animator, InstantAnimator, Track, TrackKind, TweenAnimator};
pub use collision::{KickResult, ShaftCollision};
pub use error::SessionError;
pub use events::{EventBus, GameEvent};
pub use field::SettledField;
pub use piece::Piece;
pub use queue::CommandQueue;
pub use render::{NullRenderer, Renderer};
pub use rng::SimpleRng;
pub use scheduler::{FallScheduler, SchedulerState};
pub use session::GameSession;
pub use settings::{Settings, SettingsError};
pub use shapes::{BlockSet, PieceSource, RandomShapes};

//! Threetris (workspace facade crate).
//!
//! Falling blocks in a 3D shaft. The implementation lives in dedicated crates
//! under `crates/`; this package re-exports them as
//! `threetris::{core,input,term,types}` and hosts the terminal binary.

pub use threetris_core as core;
pub use threetris_input as input;
pub use threetris_term as term;
pub use threetris_types as types;

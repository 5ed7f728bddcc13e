//! Error types for the simulation core.
//!
//! Rejected gameplay commands are not errors (they return `Ok(false)`); these
//! variants are invariant violations that end the current session.

use thiserror::Error;

use crate::types::Shaft;

/// Invariant violation inside a running session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active piece")]
    NoActivePiece,
    #[error("wall kick did not resolve after {attempts} pushes")]
    KickLimitExceeded { attempts: u32 },
    #[error("settings describe a {actual} shaft but the session was built for {expected}")]
    ShaftMismatch { expected: Shaft, actual: Shaft },
}

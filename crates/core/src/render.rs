//! Render collaborator - what the core tells the view
//!
//! The core pushes state out and never reads anything back. Implementations
//! should rebuild their picture from these calls rather than patching it, since
//! every call carries the full current occupancy.

use crate::types::Cube;

pub trait Renderer {
    /// Replace the settled cubes with `cubes`
    fn render_fallen_cubes(&mut self, cubes: &[Cube]);

    /// Show the active piece (`offsets` relative to `position`)
    fn render_current_piece(&mut self, offsets: &[Cube], position: Cube);

    /// Hide the active piece
    fn remove_current_piece(&mut self);
}

/// Renderer that draws nothing (headless sessions, benches)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_fallen_cubes(&mut self, _cubes: &[Cube]) {}

    fn render_current_piece(&mut self, _offsets: &[Cube], _position: Cube) {}

    fn remove_current_piece(&mut self) {}
}

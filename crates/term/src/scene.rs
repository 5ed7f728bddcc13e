//! Scene: what the session last told us to draw.
//!
//! `Scene` is the terminal side of the core [`Renderer`] collaborator. It only
//! records the latest settled cubes and active piece; [`crate::GameView`]
//! turns that into terminal cells each frame. `HudState` mirrors session
//! events for the side panel.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{GameEvent, Renderer};
use crate::types::{Cube, RunState, Score};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    fallen: Vec<Cube>,
    offsets: Vec<Cube>,
    position: Option<Cube>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fallen_cubes(&self) -> &[Cube] {
        &self.fallen
    }

    /// Absolute cubes of the active piece, rebuilt from offsets and position
    pub fn piece_cubes(&self) -> Vec<Cube> {
        match self.position {
            Some(position) => self.offsets.iter().map(|&o| position + o).collect(),
            None => Vec::new(),
        }
    }

    pub fn has_piece(&self) -> bool {
        self.position.is_some()
    }
}

impl Renderer for Scene {
    fn render_fallen_cubes(&mut self, cubes: &[Cube]) {
        self.fallen.clear();
        self.fallen.extend_from_slice(cubes);
    }

    fn render_current_piece(&mut self, offsets: &[Cube], position: Cube) {
        self.offsets.clear();
        self.offsets.extend_from_slice(offsets);
        self.position = Some(position);
    }

    fn remove_current_piece(&mut self) {
        self.offsets.clear();
        self.position = None;
    }
}

/// Status panel contents, kept up to date from session events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub state: RunState,
    pub is_game_over: bool,
    pub score: Score,
}

/// Handle shared between the event listener and the draw loop
pub type SharedHud = Rc<RefCell<HudState>>;

impl HudState {
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::StateChange {
                state,
                is_game_over,
            } => {
                self.state = state;
                self.is_game_over = is_game_over;
            }
            GameEvent::ScoreUpdate(score) => self.score = score,
        }
    }

    pub fn shared() -> SharedHud {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Listener suitable for `GameSession::register`
    pub fn listener(hud: &SharedHud) -> impl FnMut(&GameEvent) + 'static {
        let hud = Rc::clone(hud);
        move |event| hud.borrow_mut().apply(event)
    }
}

//! Game session - the state machine tying the simulation together
//!
//! `stopped -> running -> {paused <-> running} -> stopped`
//!
//! Commands probe a cloned piece and only commit it once the probe is legal.
//! Rejections are silent (`Ok(false)`); broken invariants come back as
//! [`SessionError`] and end the session for the driver.

use crate::animation::{Animator, Track};
use crate::collision::{self, KickResult, ShaftCollision};
use crate::error::SessionError;
use crate::events::{EventBus, GameEvent};
use crate::field::SettledField;
use crate::piece::Piece;
use crate::queue::CommandQueue;
use crate::render::Renderer;
use crate::scheduler::FallScheduler;
use crate::settings::Settings;
use crate::shapes::{PieceSource, RandomShapes};
use crate::types::{Axis, Command, Cube, Direction, RunState, Score, Shaft};

/// A single game in one shaft.
///
/// The renderer and animator are owned by the application shell and handed
/// in; [`GameSession::into_parts`] gives them back.
pub struct GameSession<R: Renderer, A: Animator> {
    settings: Settings,
    shaft: Shaft,
    field: SettledField,
    piece: Option<Piece>,
    score: Score,
    state: RunState,
    is_game_over: bool,

    scheduler: FallScheduler,
    queue: CommandQueue,
    /// Hard drop landed; settle once its animation finishes
    settle_pending: bool,

    pieces: Box<dyn PieceSource>,
    renderer: R,
    animator: A,
    events: EventBus,
}

impl<R: Renderer, A: Animator> GameSession<R, A> {
    /// Create a stopped session for the shaft described by `settings`
    pub fn new(settings: Settings, renderer: R, animator: A) -> Self {
        let shaft = settings.shaft();
        Self {
            field: SettledField::new(shaft.size_y),
            scheduler: FallScheduler::new(settings.falling_speed),
            settings,
            shaft,
            piece: None,
            score: Score::default(),
            state: RunState::Stopped,
            is_game_over: false,
            queue: CommandQueue::new(),
            settle_pending: false,
            pieces: Box::new(RandomShapes::default()),
            renderer,
            animator,
            events: EventBus::new(),
        }
    }

    /// Replace the shape source (seeded generator, scripted shapes in tests)
    pub fn with_piece_source(mut self, source: impl PieceSource + 'static) -> Self {
        self.pieces = Box::new(source);
        self
    }

    pub fn with_seed(self, seed: u32) -> Self {
        self.with_piece_source(RandomShapes::new(seed))
    }

    /// Subscribe to state and score events
    pub fn register(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.events.register(listener);
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn field(&self) -> &SettledField {
        &self.field
    }

    pub fn shaft(&self) -> Shaft {
        self.shaft
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &FallScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Commands waiting in the queue
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn is_settle_pending(&self) -> bool {
        self.settle_pending
    }

    /// Give back the injected collaborators
    pub fn into_parts(self) -> (R, A) {
        (self.renderer, self.animator)
    }

    fn active_piece(&self) -> Result<&Piece, SessionError> {
        self.piece.as_ref().ok_or(SessionError::NoActivePiece)
    }

    fn accepts_commands(&self) -> bool {
        self.state == RunState::Running && !self.settle_pending
    }

    fn track_duration(&self) -> f32 {
        self.animator.duration()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Reset everything and start a new game.
    ///
    /// The shaft is fixed for the lifetime of a session; settings for another
    /// shaft need a new session.
    pub fn start(&mut self, settings: &Settings) -> Result<(), SessionError> {
        let shaft = settings.shaft();
        if shaft != self.shaft {
            return Err(SessionError::ShaftMismatch {
                expected: self.shaft,
                actual: shaft,
            });
        }

        self.settings = settings.clone();
        self.field = SettledField::new(shaft.size_y);
        self.piece = None;
        self.score = Score::default();
        self.is_game_over = false;
        self.queue.clear();
        self.settle_pending = false;
        self.animator.cancel();
        self.scheduler.stop();
        self.scheduler.update_interval(settings.falling_speed);

        self.renderer.remove_current_piece();
        self.renderer.render_fallen_cubes(&[]);

        log::info!(
            "starting game in {} shaft ({:?} blocks)",
            shaft,
            settings.block_set
        );
        self.state = RunState::Running;
        self.spawn();

        if self.state == RunState::Running {
            if settings.paused {
                self.state = RunState::Paused;
            } else {
                self.scheduler.start();
            }
            self.fire_state();
        }
        self.fire_score();
        Ok(())
    }

    /// End the game. `is_game_over` marks a board-full ending.
    pub fn stop(&mut self, is_game_over: bool) {
        self.state = RunState::Stopped;
        self.is_game_over |= is_game_over;
        self.scheduler.stop();
        self.queue.clear();
        self.settle_pending = false;
        self.animator.cancel();
        log::info!("game stopped (game over: {})", self.is_game_over);
        self.fire_state();
    }

    /// Suspend gravity and commands; returns false if not running
    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.state = RunState::Paused;
        self.scheduler.stop();
        log::info!("game paused");
        self.fire_state();
        true
    }

    /// Continue a paused game; returns false if not paused
    pub fn resume(&mut self) -> bool {
        if self.state != RunState::Paused {
            return false;
        }
        self.state = RunState::Running;
        if !self.settle_pending {
            self.scheduler.start();
        }
        log::info!("game resumed");
        self.fire_state();
        true
    }

    /// Change the gravity interval without resetting its progress
    pub fn set_fall_interval(&mut self, seconds: f32) {
        self.settings.falling_speed = seconds;
        self.scheduler.update_interval(seconds);
    }

    // ---------------------------------------------------------------------
    // Frame driver
    // ---------------------------------------------------------------------

    /// Queue a command for the next [`GameSession::update`]
    pub fn enqueue(&mut self, command: Command) {
        if self.state != RunState::Running {
            log::debug!("dropping {} while {}", command.as_str(), self.state.as_str());
            return;
        }
        self.queue.push(command);
    }

    /// Advance the session by `delta` seconds.
    ///
    /// Animations first (finishing one may settle a dropped piece), then
    /// queued commands one at a time, then gravity.
    pub fn update(&mut self, delta: f32) -> Result<(), SessionError> {
        if self.state != RunState::Running {
            return Ok(());
        }

        if self.animator.update(delta) {
            self.on_animation_finished()?;
        }

        while self.state == RunState::Running {
            let Some(command) = self.queue.next_ready() else {
                break;
            };
            self.queue.begin();
            self.apply(command)?;
            if !self.animator.is_playing() && !self.settle_pending {
                self.queue.finish();
            }
        }

        if self.state == RunState::Running && self.scheduler.tick(delta) {
            self.tick()?;
        }
        Ok(())
    }

    fn on_animation_finished(&mut self) -> Result<(), SessionError> {
        if self.settle_pending {
            self.settle_pending = false;
            self.settle()?;
            if self.state == RunState::Running {
                self.scheduler.start();
            }
        }
        self.queue.finish();
        Ok(())
    }

    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) -> Result<bool, SessionError> {
        match command {
            Command::Rotate(axis, direction) => self.rotate(axis, direction),
            Command::HardDrop => self.hard_drop(),
            _ => match command.offset() {
                Some(offset) => self.move_piece(offset),
                None => Ok(false),
            },
        }
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    fn commit(&mut self, piece: Piece, track: Track) {
        self.renderer
            .render_current_piece(piece.offsets(), piece.position());
        self.piece = Some(piece);
        self.animator.play(track);
    }

    /// Translate the piece if the destination is legal
    pub fn move_piece(&mut self, offset: Cube) -> Result<bool, SessionError> {
        if !self.accepts_commands() {
            return Ok(false);
        }
        let candidate = self.active_piece()?.moved(offset);
        if !collision::is_legal(&candidate.cubes(), &self.shaft, &self.field) {
            return Ok(false);
        }
        let track = Track::movement(offset, self.track_duration());
        self.commit(candidate, track);
        Ok(true)
    }

    pub fn move_left(&mut self) -> Result<bool, SessionError> {
        self.move_piece(Cube::LEFT)
    }

    pub fn move_right(&mut self) -> Result<bool, SessionError> {
        self.move_piece(Cube::RIGHT)
    }

    pub fn move_forward(&mut self) -> Result<bool, SessionError> {
        self.move_piece(Cube::FORWARD)
    }

    pub fn move_back(&mut self) -> Result<bool, SessionError> {
        self.move_piece(Cube::BACK)
    }

    /// Quarter-turn the piece, kicking it off a wall if needed
    pub fn rotate(&mut self, axis: Axis, direction: Direction) -> Result<bool, SessionError> {
        if !self.accepts_commands() {
            return Ok(false);
        }
        let candidate = self.active_piece()?.rotated(axis, direction);
        let cubes = candidate.cubes();

        let (piece, translation) = match collision::shaft_collision(&cubes, &self.shaft) {
            ShaftCollision::Clear if !self.field.collides_with(&cubes) => (candidate, Cube::ZERO),
            ShaftCollision::Clear | ShaftCollision::Floor => return Ok(false),
            ShaftCollision::Wall { push } => {
                match collision::resolve_wall_kick(&candidate, push, &self.shaft, &self.field)? {
                    KickResult::Resolved { piece, translation } => {
                        log::debug!("wall kick by {translation}");
                        (piece, translation)
                    }
                    KickResult::Rejected => return Ok(false),
                }
            }
        };

        let duration = self.track_duration();
        self.commit(piece, Track::rotation(axis, direction, duration));
        if translation != Cube::ZERO {
            self.animator.play(Track::movement(translation, duration));
        }
        Ok(true)
    }

    /// Drop the piece to its landing spot and settle it
    pub fn hard_drop(&mut self) -> Result<bool, SessionError> {
        if !self.accepts_commands() {
            return Ok(false);
        }
        let piece = self.active_piece()?;
        let landed = collision::drop_position(piece, &self.shaft, &self.field);
        let distance = piece.position().y - landed.position().y;

        self.scheduler.stop();
        let track = Track::movement(Cube::new(0, -distance, 0), self.track_duration());
        self.commit(landed, track);

        if self.animator.is_playing() {
            self.settle_pending = true;
        } else {
            self.settle()?;
            if self.state == RunState::Running {
                self.scheduler.start();
            }
        }
        Ok(true)
    }

    /// Gravity step: move down one layer or settle.
    ///
    /// Returns true if the piece moved.
    pub fn tick(&mut self) -> Result<bool, SessionError> {
        if !self.accepts_commands() {
            return Ok(false);
        }
        let candidate = self.active_piece()?.moved(Cube::DOWN);
        if collision::is_legal(&candidate.cubes(), &self.shaft, &self.field) {
            let track = Track::movement(Cube::DOWN, self.track_duration());
            self.commit(candidate, track);
            return Ok(true);
        }
        self.settle()?;
        Ok(false)
    }

    // ---------------------------------------------------------------------
    // Settling
    // ---------------------------------------------------------------------

    fn settle(&mut self) -> Result<(), SessionError> {
        let piece = self.piece.take().ok_or(SessionError::NoActivePiece)?;
        let cubes = piece.cubes();
        self.renderer.remove_current_piece();

        self.field.add_cubes(&cubes);
        self.score.fallen_cubes += cubes.len() as u32;
        self.score.fallen_cubes_height = self.field.height(&self.shaft) as u32;
        log::debug!("settled {} cubes at {}", cubes.len(), piece.position());

        self.spawn();

        // Indices shift after every removal, so query again each time.
        let mut removed = 0;
        while let Some(&level) = self.field.find_full_levels(&self.shaft).first() {
            self.field.remove_level(level);
            self.score.removed_rows += 1;
            removed += 1;
            log::debug!("cleared level {level}");
        }
        if removed > 0 {
            self.score.fallen_cubes_height = self.field.height(&self.shaft) as u32;
        }

        self.renderer.render_fallen_cubes(&self.field.cubes());
        self.fire_score();
        Ok(())
    }

    fn spawn(&mut self) {
        let mut offsets = self.pieces.next_offsets(self.settings.block_set, &self.shaft);
        if offsets.is_empty() {
            log::warn!("piece source produced an empty shape, using a single cube");
            offsets.push(Cube::ZERO);
        }
        let max_y = offsets.iter().map(|o| o.y).max().unwrap_or(0);
        let min_y = offsets.iter().map(|o| o.y).min().unwrap_or(0);
        // Top cube in the top layer, but never below the floor.
        let position = Cube::new(
            self.shaft.size_x / 2,
            (self.shaft.size_y - 1 - max_y).max(-min_y),
            self.shaft.size_z / 2,
        );
        let piece = Piece::new(position, offsets);
        let blocked = self.field.collides_with(&piece.cubes());

        log::debug!("spawned {} cubes at {}", piece.len(), position);
        self.renderer
            .render_current_piece(piece.offsets(), piece.position());
        self.piece = Some(piece);

        if blocked {
            log::info!("spawn point is blocked");
            self.stop(true);
        }
    }

    fn fire_state(&mut self) {
        let event = GameEvent::StateChange {
            state: self.state,
            is_game_over: self.is_game_over,
        };
        self.events.fire(&event);
    }

    fn fire_score(&mut self) {
        self.events.fire(&GameEvent::ScoreUpdate(self.score));
    }
}

impl<R: Renderer, A: Animator> std::fmt::Debug for GameSession<R, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("shaft", &self.shaft)
            .field("state", &self.state)
            .field("is_game_over", &self.is_game_over)
            .field("score", &self.score)
            .field("piece", &self.piece)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{InstantAnimator, TweenAnimator};
    use crate::render::NullRenderer;
    use crate::shapes::BlockSet;

    fn settings(x: i32, y: i32, z: i32) -> Settings {
        Settings {
            shaft_size_x: x,
            shaft_size_y: y,
            shaft_size_z: z,
            ..Settings::default()
        }
    }

    fn single_cubes(settings: &Settings) -> GameSession<NullRenderer, InstantAnimator> {
        GameSession::new(settings.clone(), NullRenderer, InstantAnimator)
            .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO])
    }

    #[test]
    fn test_new_session_is_stopped() {
        let session = single_cubes(&Settings::default());
        assert_eq!(session.state(), RunState::Stopped);
        assert!(session.piece().is_none());
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_start_spawns_at_top_centre() {
        let s = settings(4, 10, 4);
        let mut session = single_cubes(&s);
        session.start(&s).unwrap();
        assert_eq!(session.state(), RunState::Running);
        assert_eq!(session.piece().unwrap().position(), Cube::new(2, 9, 2));
    }

    #[test]
    fn test_spawn_keeps_tall_pieces_inside() {
        let s = settings(4, 10, 4);
        let mut session = GameSession::new(s.clone(), NullRenderer, InstantAnimator)
            .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO, Cube::new(0, 1, 0)]);
        session.start(&s).unwrap();
        assert_eq!(session.piece().unwrap().position(), Cube::new(2, 8, 2));
    }

    #[test]
    fn test_commands_ignored_when_not_running() {
        let s = Settings::default();
        let mut session = single_cubes(&s);
        assert_eq!(session.move_left(), Ok(false));
        assert_eq!(session.tick(), Ok(false));
        assert_eq!(session.hard_drop(), Ok(false));
    }

    #[test]
    fn test_paused_setting_starts_paused() {
        let s = Settings {
            paused: true,
            ..Settings::default()
        };
        let mut session = single_cubes(&s);
        session.start(&s).unwrap();
        assert_eq!(session.state(), RunState::Paused);
        assert!(!session.scheduler().is_running());
        assert!(session.resume());
        assert!(session.scheduler().is_running());
    }

    #[test]
    fn test_start_with_other_shaft_fails() {
        let mut session = single_cubes(&Settings::default());
        let err = session.start(&settings(3, 3, 3)).unwrap_err();
        assert!(matches!(err, SessionError::ShaftMismatch { .. }));
        assert_eq!(session.state(), RunState::Stopped);
    }

    #[test]
    fn test_hard_drop_waits_for_animation() {
        let s = settings(4, 10, 4);
        let mut session = GameSession::new(s.clone(), NullRenderer, TweenAnimator::new(0.3))
            .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO]);
        session.start(&s).unwrap();

        assert_eq!(session.hard_drop(), Ok(true));
        assert!(session.is_settle_pending());
        assert_eq!(session.piece().unwrap().position(), Cube::new(2, 0, 2));
        assert_eq!(session.score().fallen_cubes, 0);
        // Commands wait for the settle.
        assert_eq!(session.move_left(), Ok(false));

        session.update(0.4).unwrap();
        assert!(!session.is_settle_pending());
        assert_eq!(session.score().fallen_cubes, 1);
        assert_eq!(session.piece().unwrap().position(), Cube::new(2, 9, 2));
    }

    #[test]
    fn test_tracks_use_animator_duration() {
        let s = settings(4, 10, 4);
        let mut session = GameSession::new(s.clone(), NullRenderer, TweenAnimator::new(1.0))
            .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO]);
        session.start(&s).unwrap();

        assert_eq!(session.hard_drop(), Ok(true));
        session.update(0.4).unwrap();
        assert!(session.is_settle_pending());

        session.update(0.7).unwrap();
        assert!(!session.is_settle_pending());
        assert_eq!(session.score().fallen_cubes, 1);
    }
}

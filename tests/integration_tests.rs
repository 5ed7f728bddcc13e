//! Integration tests for the frame driver: command queue, animations, gravity

use threetris::core::{
    Animator, BlockSet, GameSession, InstantAnimator, NullRenderer, Settings, TweenAnimator,
};
use threetris::types::{Axis, Command, Cube, Direction, RunState, Shaft};

fn settings(falling_speed: f32) -> Settings {
    Settings {
        shaft_size_x: 4,
        shaft_size_y: 10,
        shaft_size_z: 4,
        falling_speed,
        animation_duration: 0.2,
        ..Settings::default()
    }
}

fn tween_session(s: &Settings) -> GameSession<NullRenderer, TweenAnimator> {
    GameSession::new(s.clone(), NullRenderer, TweenAnimator::new(s.animation_duration))
        .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO])
}

fn instant_session(s: &Settings) -> GameSession<NullRenderer, InstantAnimator> {
    GameSession::new(s.clone(), NullRenderer, InstantAnimator)
        .with_piece_source(|_: BlockSet, _: &Shaft| vec![Cube::ZERO])
}

#[test]
fn test_queued_commands_wait_for_animations() {
    let s = settings(100.0);
    let mut session = tween_session(&s);
    session.start(&s).unwrap();

    session.enqueue(Command::MoveLeft);
    session.enqueue(Command::MoveLeft);
    session.enqueue(Command::MoveForward);

    session.update(0.01).unwrap();
    assert_eq!(session.piece().unwrap().position(), Cube::new(1, 9, 2));
    assert_eq!(session.pending_commands(), 2);

    // Still animating the first move.
    session.update(0.1).unwrap();
    assert_eq!(session.piece().unwrap().position(), Cube::new(1, 9, 2));

    session.update(0.15).unwrap();
    assert_eq!(session.piece().unwrap().position(), Cube::new(0, 9, 2));

    session.update(0.25).unwrap();
    assert_eq!(session.piece().unwrap().position(), Cube::new(0, 9, 1));
    assert_eq!(session.pending_commands(), 0);
}

#[test]
fn test_instant_animator_drains_the_queue_in_one_frame() {
    let s = settings(100.0);
    let mut session = instant_session(&s);
    session.start(&s).unwrap();

    for _ in 0..5 {
        session.enqueue(Command::MoveLeft);
    }
    session.enqueue(Command::Rotate(Axis::Y, Direction::Clockwise));
    session.enqueue(Command::MoveBack);
    session.update(0.016).unwrap();

    // Rejected moves are silent and do not stall the queue.
    assert_eq!(session.piece().unwrap().position(), Cube::new(0, 9, 3));
    assert_eq!(session.pending_commands(), 0);
}

#[test]
fn test_hard_drop_settles_when_its_animation_finishes() {
    let s = settings(100.0);
    let mut session = tween_session(&s);
    session.start(&s).unwrap();

    session.enqueue(Command::HardDrop);
    session.enqueue(Command::MoveLeft);
    session.update(0.01).unwrap();
    assert!(session.is_settle_pending());
    assert!(!session.scheduler().is_running());
    assert_eq!(session.score().fallen_cubes, 0);

    session.update(0.25).unwrap();
    assert!(!session.is_settle_pending());
    assert_eq!(session.score().fallen_cubes, 1);
    assert!(session.field().contains(Cube::new(2, 0, 2)));
    assert!(session.scheduler().is_running());

    // The move queued behind the drop applies to the next piece.
    assert_eq!(session.piece().unwrap().position(), Cube::new(1, 9, 2));
}

#[test]
fn test_gravity_runs_from_update() {
    let s = settings(0.5);
    let mut session = instant_session(&s);
    session.start(&s).unwrap();

    session.update(0.3).unwrap();
    assert_eq!(session.piece().unwrap().position().y, 9);

    session.update(0.3).unwrap();
    assert_eq!(session.piece().unwrap().position().y, 8);

    // Exactly one interval is not enough: the timer fires once it is exceeded.
    session.update(0.5).unwrap();
    assert_eq!(session.piece().unwrap().position().y, 8);
    session.update(0.01).unwrap();
    assert_eq!(session.piece().unwrap().position().y, 7);
}

#[test]
fn test_gravity_does_not_wait_for_move_animations() {
    let s = settings(0.1);
    let mut session = tween_session(&s);
    session.start(&s).unwrap();

    session.enqueue(Command::MoveLeft);
    session.update(0.05).unwrap();
    session.update(0.06).unwrap();
    assert!(session.animator().is_playing());
    assert_eq!(session.piece().unwrap().position(), Cube::new(1, 8, 2));
}

#[test]
fn test_update_is_inert_unless_running() {
    let s = settings(0.1);
    let mut session = instant_session(&s);
    session.enqueue(Command::MoveLeft);
    session.update(1.0).unwrap();
    assert!(session.piece().is_none());

    session.start(&s).unwrap();
    session.pause();
    session.enqueue(Command::MoveLeft);
    assert_eq!(session.pending_commands(), 0);
    session.update(1.0).unwrap();
    assert_eq!(session.piece().unwrap().position(), Cube::new(2, 9, 2));
    assert_eq!(session.state(), RunState::Paused);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let s = Settings {
        block_set: BlockSet::Extended,
        ..Settings::default()
    };
    let play = |seed| {
        let mut session = GameSession::new(s.clone(), NullRenderer, InstantAnimator).with_seed(seed);
        session.start(&s).unwrap();
        let mut shapes = Vec::new();
        for _ in 0..10 {
            shapes.push(session.piece().unwrap().offsets().to_vec());
            if session.is_game_over() {
                break;
            }
            session.hard_drop().unwrap();
        }
        shapes
    };
    assert_eq!(play(99), play(99));
}

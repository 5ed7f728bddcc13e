//! Key mapping from terminal events to game commands.

use crate::types::{Axis, Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Session-level controls that are not piece commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Pause a running game or resume a paused one
    TogglePause,
    /// End the current game
    Stop,
    /// Start a fresh game
    Restart,
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Control(Control),
}

fn rotate(axis: Axis, direction: Direction) -> Option<KeyAction> {
    Some(KeyAction::Game(Command::Rotate(axis, direction)))
}

/// Map keyboard input to a game command or control.
///
/// Key releases are ignored so terminals that report them do not double up.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement on the shaft floor
        KeyCode::Left => Some(KeyAction::Game(Command::MoveLeft)),
        KeyCode::Right => Some(KeyAction::Game(Command::MoveRight)),
        KeyCode::Up => Some(KeyAction::Game(Command::MoveForward)),
        KeyCode::Down => Some(KeyAction::Game(Command::MoveBack)),
        KeyCode::Char(' ') => Some(KeyAction::Game(Command::HardDrop)),

        // Rotation
        KeyCode::Char('q') | KeyCode::Char('Q') => rotate(Axis::X, Direction::Clockwise),
        KeyCode::Char('a') | KeyCode::Char('A') => rotate(Axis::X, Direction::CounterClockwise),
        KeyCode::Char('w') | KeyCode::Char('W') => rotate(Axis::Z, Direction::CounterClockwise),
        KeyCode::Char('s') | KeyCode::Char('S') => rotate(Axis::Z, Direction::Clockwise),
        KeyCode::Char('e') | KeyCode::Char('E') => rotate(Axis::Y, Direction::Clockwise),
        KeyCode::Char('d') | KeyCode::Char('D') => rotate(Axis::Y, Direction::CounterClockwise),

        // Session
        KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyAction::Control(Control::TogglePause)),
        KeyCode::Esc => Some(KeyAction::Control(Control::Stop)),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            Some(KeyAction::Control(Control::Restart))
        }

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

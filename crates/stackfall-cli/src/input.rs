use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stackfall_engine::Command;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    /// Leave immediately, whatever the session state.
    Quit,
}

impl KeyAction {
    /// Maps a key press to an action. Unbound keys yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(event.code, KeyCode::Char('c')).then_some(Self::Quit);
        }
        let command = match event.code {
            KeyCode::Enter => Command::Confirm,
            KeyCode::Esc => Command::Cancel,
            KeyCode::Left => Command::MoveLeft,
            KeyCode::Right => Command::MoveRight,
            KeyCode::Down => Command::SoftDrop,
            KeyCode::Up => Command::Rotate,
            KeyCode::Char(' ') => Command::HardDrop,
            KeyCode::Char('r' | 'R') => Command::RestartConfirm,
            KeyCode::Char('q' | 'Q') => return Some(Self::Quit),
            _ => return None,
        };
        Some(Self::Command(command))
    }
}

use crate::ui::Section;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A user intent, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Whatever the visible primary control does: start or advance.
    Primary,
    Start,
    Advance,
    Reset,
    ToggleSection(Section),
    CursorUp,
    CursorDown,
    CrossOff,
    Print,
    Quit,
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Action(Action),
    /// One simulated second from the tick source registered under this generation.
    Tick(u64),
    /// Delayed "time's up" notification, tagged with the expiry that scheduled it.
    Announce(u64),
    /// End of the print window that was opened under this generation.
    RestoreSections(u64),
}

/// Global key bindings of the card.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Print),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Primary),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('i') => Some(Action::ToggleSection(Section::Ingredients)),
        KeyCode::Char('s') => Some(Action::ToggleSection(Section::Instructions)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::Char('x') => Some(Action::CrossOff),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Commands accepted on stdin in pipe mode. An empty line is the primary action.
pub fn action_for_command(line: &str) -> Option<Action> {
    let cmd = line.trim().to_lowercase();
    let action = match cmd.as_str() {
        "" => Action::Primary,
        "start" => Action::Start,
        "next" | "advance" | "finish" => Action::Advance,
        "reset" => Action::Reset,
        "ingredients" => Action::ToggleSection(Section::Ingredients),
        "instructions" | "steps" => Action::ToggleSection(Section::Instructions),
        "print" => Action::Print,
        "quit" | "exit" => Action::Quit,
        _ => return None,
    };
    Some(action)
}

//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::jobs::{JobStatus, Location};

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Right => app.next_hour(),
        KeyCode::Left => app.prev_hour(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Char('p') => app.set_status(JobStatus::Paused),
        KeyCode::Char('s') => app.set_status(JobStatus::Running),
        KeyCode::Char('c') => app.set_status(JobStatus::Completed),
        KeyCode::Char('m') => app.migrate(Location::Iceland),
        KeyCode::Char('l') => app.migrate(Location::London),
        KeyCode::Char('r') => app.reset_jobs(),
        _ => {}
    }
}

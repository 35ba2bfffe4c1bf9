//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::viewport::Gesture;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc if app.gesture() == Gesture::Idle => app.quit = true,
        KeyCode::Esc | KeyCode::Backspace => app.cancel(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('+' | '=') | KeyCode::Up => app.zoom(true),
        KeyCode::Char('-') | KeyCode::Down => app.zoom(false),
        KeyCode::Right => app.pan(true),
        KeyCode::Left => app.pan(false),
        KeyCode::Char('l') => app.drag(true),
        KeyCode::Char('h') => app.drag(false),
        KeyCode::Enter => app.settle(),
        KeyCode::Char('r' | '0') => app.reset(),
        KeyCode::Char('1') => app.switch_preset("heart_rate"),
        KeyCode::Char('2') => app.switch_preset("pace"),
        KeyCode::Char('3') => app.switch_preset("pace_imperial"),
        KeyCode::Char('4') => app.switch_preset("elevation"),
        _ => {}
    }
}

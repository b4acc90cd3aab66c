//! Event handling for the spell preparation TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.move_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.move_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Overlays swallow keys until closed
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
    }
}

/// Handle keys in NORMAL mode (vim-style navigation and hotkeys)
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('/') => {
            app.enter_search_mode();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('q') => EventResult::Quit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.move_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.move_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.cursor_top();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor_bottom();
            EventResult::NeedsRedraw
        }

        // Preparation
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected();
            EventResult::NeedsRedraw
        }

        // Filters
        KeyCode::Char('c') => {
            app.cycle_class(true);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('C') => {
            app.cycle_class(false);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.raise_max_level();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('-') => {
            app.lower_max_level();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c @ '0'..='9') => {
            let level = c.to_digit(10).map(|d| d as u8);
            app.set_level_filter(level);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('a') => {
            app.set_level_filter(None);
            EventResult::NeedsRedraw
        }

        // Catalog and export
        KeyCode::Char('v') => {
            app.switch_version();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('l') => {
            app.toggle_layout();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('e') => {
            app.request_export();
            EventResult::NeedsRedraw
        }

        KeyCode::Esc => {
            app.clear_status();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Handle keys in SEARCH mode (free text input)
fn handle_search_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.exit_search_mode(false);
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.exit_search_mode(true);
            EventResult::NeedsRedraw
        }

        // Input editing
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }

        // The list stays navigable while typing
        KeyCode::Up => {
            app.move_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            app.move_down(1);
            EventResult::NeedsRedraw
        }

        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

/// Handle key when overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

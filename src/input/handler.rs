use crate::app::AppState;
use crate::domain::UiMode;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::TaskForm => {
            handle_form_mode(app, key);
            false
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> bool {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),

        // Timer controls
        KeyCode::Enter | KeyCode::Char('s') => app.start_selected(now),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_pause_selected(now),
        KeyCode::Char('x') => app.stop_selected(),

        // Task list
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('R') => app.reset_all(),

        KeyCode::Char('t') => app.toggle_autoplay(),

        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        _ => {}
    }
    false
}

/// Handle keys while the task form is open
fn handle_form_mode(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('n') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.submit_form_and_add_another();
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        _ => {
            let Some(form) = app.form.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
                KeyCode::BackTab | KeyCode::Up => form.field = form.field.previous(),
                KeyCode::Left => form.cycle_color(false),
                KeyCode::Right => form.cycle_color(true),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.add_char(c),
                _ => {}
            }
        }
    }
}

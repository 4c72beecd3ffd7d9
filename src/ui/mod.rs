pub mod clock_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod mascot_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use chrono::{DateTime, Local};
use clock_pane::render_clock_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use mascot_pane::render_mascot_pane;
use ratatui::Frame;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState, now: DateTime<Local>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);

    render_list_pane(f, app, layout.list_area, now);
    render_mascot_pane(f, app, layout.mascot_area, now);
    render_clock_pane(f, app, layout.clock_area, now);
    render_timer_pane(f, app, layout.timer_area, now);

    if app.ui_mode == UiMode::TaskForm {
        render_input_form(f, app, size);
    }
}

use crate::app::AppState;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = hint_line(app);
    let paragraph = Paragraph::new(Line::raw(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}

fn hint_line(app: &AppState) -> String {
    let pairs = [
        ("↑/↓", "↕"),
        ("Enter", app.t("btn.start")),
        ("Space", app.t("btn.pause")),
        ("x", app.t("btn.stop")),
        ("a", app.t("btn.add")),
        ("e", app.t("btn.edit")),
        ("d", app.t("task.delete")),
        ("t", app.t("autoplay.label")),
        ("R", app.t("btn.reset")),
        ("q", app.t("btn.quit")),
    ];
    let mut line = format!(" {}  ", app.t("app.title"));
    for (key, label) in pairs {
        line.push_str(&format!("{} {}   ", key, label));
    }
    line.trim_end().to_string()
}

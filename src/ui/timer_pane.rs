use crate::app::AppState;
use crate::domain::TimerState;
use crate::ui::styles::{
    border_style, countdown_style, hint_style, task_color, timer_style, title_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the big countdown for the selected task with its controls
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect, now: DateTime<Local>) {
    let selected = app.selected_task();

    let title = match selected {
        Some(task) => format!(" {}: {} ", app.t("timer.title"), task.name),
        None => format!(" {} ", app.t("timer.title")),
    };
    let border = selected.map_or(border_style(), |t| {
        Style::default().fg(task_color(&t.color))
    });

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style()));

    let display = app.display_text(now);
    let display_style = if app.countdown.is_some() && !display.contains(':') {
        countdown_style()
    } else {
        timer_style()
    };

    let state = app.selected.map_or(TimerState::Idle, |id| app.timer_state(id));
    let lines = vec![
        Line::from(Span::styled(spaced(&display), display_style)),
        Line::raw(""),
        Line::from(Span::styled(control_hints(app, state), hint_style())),
        Line::from(Span::styled(autoplay_label(app), hint_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Widen the digits so the countdown reads from across the room
fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Hints for the actions that apply in the current state
fn control_hints(app: &AppState, state: TimerState) -> String {
    match state {
        TimerState::Idle if app.can_start_selected() => {
            format!("Enter {}", app.t("btn.start"))
        }
        TimerState::Idle => String::new(),
        TimerState::Running => {
            format!("Space {}  ·  x {}", app.t("btn.pause"), app.t("btn.stop"))
        }
        TimerState::Paused => {
            format!("Space {}  ·  x {}", app.t("btn.resume"), app.t("btn.stop"))
        }
    }
}

fn autoplay_label(app: &AppState) -> String {
    let value = if app.settings.autoplay {
        app.t("autoplay.on")
    } else {
        app.t("autoplay.off")
    };
    format!("t {}: {}", app.t("autoplay.label"), value)
}

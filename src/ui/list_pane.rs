use crate::app::AppState;
use crate::domain::{format_time, Task, TimerState};
use crate::ui::styles::{
    border_style, default_style, done_style, paused_style, running_style, selected_style,
    task_color, title_style,
};
use chrono::{DateTime, Duration, Local};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect, now: DateTime<Local>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", app.t("tasks.title")), title_style()));

    if app.tasks.is_empty() {
        let hint = Paragraph::new(app.t("tasks.empty").to_string())
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    }

    let selected = app.selected;
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| {
            let state = app.timer_state(task.id);
            let remaining = app.timer_for(task.id).map(|t| t.remaining(now));
            let line = create_task_line(task, state, remaining, app.t("task.minutes"));
            let style = if selected == Some(task.id) {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Create a single line for a task
/// Format: ● Brush teeth  5 min  ▶ 03:12
fn create_task_line(
    task: &Task,
    state: TimerState,
    remaining: Option<Duration>,
    minutes_label: &str,
) -> Line<'static> {
    let mut spans = vec![
        Span::styled("● ".to_string(), Style::default().fg(task_color(&task.color))),
    ];

    let name_style = if task.completed { done_style() } else { Style::default() };
    spans.push(Span::styled(task.name.clone(), name_style));
    spans.push(Span::raw(format!("  {} {}", task.duration_minutes, minutes_label)));

    let remaining = remaining.map(format_time).unwrap_or_default();
    match state {
        TimerState::Running => {
            spans.push(Span::styled(format!("  ▶ {}", remaining), running_style()));
        }
        TimerState::Paused => {
            spans.push(Span::styled(format!("  ⏸ {}", remaining), paused_style()));
        }
        TimerState::Idle if task.completed => {
            spans.push(Span::styled("  ✓".to_string(), done_style()));
        }
        TimerState::Idle => {}
    }

    Line::from(spans)
}

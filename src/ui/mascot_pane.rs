use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use chrono::{DateTime, Local};

const BLINK_CYCLE: u32 = 40; // 40 frames at 10 FPS = one blink every 4 seconds
const BLINK_FRAMES: u32 = 2;
const JUMP_FRAMES: u32 = 3;

pub fn render_mascot_pane(f: &mut Frame, app: &AppState, area: Rect, now: DateTime<Local>) {
    let celebrating = app.mascot.is_celebrating(now);
    let lines = mascot_lines(app.mascot.frame, celebrating, app.t("mascot.cheer"));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.t("mascot.title")))
        .style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mascot = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);

    f.render_widget(mascot, inner);
}

fn mascot_lines(frame: u32, celebrating: bool, cheer: &str) -> Vec<Line<'static>> {
    if celebrating {
        celebrate_frame(frame, cheer)
    } else {
        idle_frame(frame)
    }
}

fn idle_frame(frame: u32) -> Vec<Line<'static>> {
    let eyes = if frame % BLINK_CYCLE < BLINK_FRAMES {
        " ( -   - ) "
    } else {
        " ( o   o ) "
    };

    vec![
        Line::from(""),
        Line::from("  .-----.  "),
        Line::from(eyes),
        Line::from(" (   ‿   ) "),
        Line::from("  '-----'  "),
        Line::from("   /   \\   "),
    ]
}

fn celebrate_frame(frame: u32, cheer: &str) -> Vec<Line<'static>> {
    let up = (frame / JUMP_FRAMES) % 2 == 0;

    let mut lines = if up {
        vec![
            Line::from(" \\ .-----. / "),
            Line::from("  ( ^   ^ )  "),
            Line::from("  (   ▽   )  "),
            Line::from("   '-----'   "),
            Line::from("    /   \\    "),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from("  .-----.  "),
            Line::from(" ( ^   ^ ) "),
            Line::from("\\(   ▽   )/"),
            Line::from("  '-----'  "),
        ]
    };

    lines.push(Line::from(Span::styled(
        format!("★ {} ★", cheer),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

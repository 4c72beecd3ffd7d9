use crate::app::AppState;
use crate::domain::{FormField, TaskForm, TASK_COLORS};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style, task_color},
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit task form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if form.is_editing() {
        format!(" {} ", app.t("modal.editTask"))
    } else {
        format!(" {} ", app.t("modal.newTask"))
    };

    let mut lines = vec![Line::raw("")];

    lines.push(field_label(app.t("modal.name"), form.field == FormField::Name));
    lines.push(text_input(&form.name, form.field == FormField::Name));
    lines.push(Line::raw(""));

    lines.push(field_label(app.t("modal.duration"), form.field == FormField::Duration));
    lines.push(text_input(&form.duration, form.field == FormField::Duration));
    lines.push(Line::raw(""));

    lines.push(field_label(app.t("modal.color"), form.field == FormField::Color));
    lines.push(swatches(form));
    lines.push(Line::raw(""));

    if let Some(error) = form.error {
        lines.push(Line::from(Span::styled(app.t(error.message_key()).to_string(), error_style())));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(Span::styled(instructions(app, form), hint_style())));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn field_label(label: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(Span::styled(format!("{}:", label), modal_title_style()))
    } else {
        Line::raw(format!("{}:", label))
    }
}

fn text_input(value: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

/// One block per palette colour, the chosen one bracketed
fn swatches(form: &TaskForm) -> Line<'static> {
    let mut spans = vec![Span::raw(if form.field == FormField::Color { "◀ " } else { "  " })];
    for color in TASK_COLORS {
        let chosen = color.eq_ignore_ascii_case(&form.color);
        let style = Style::default().fg(task_color(color));
        if chosen {
            spans.push(Span::styled("[██]", style.add_modifier(Modifier::BOLD)));
        } else {
            spans.push(Span::styled(" ██ ", style));
        }
    }
    if form.field == FormField::Color {
        spans.push(Span::raw(" ▶"));
    }
    Line::from(spans)
}

fn instructions(app: &AppState, form: &TaskForm) -> String {
    let mut parts = vec![
        format!("Enter {}", app.t("modal.save")),
    ];
    if !form.is_editing() {
        parts.push(format!("Ctrl+N {}", app.t("modal.saveAdd")));
    }
    parts.push(format!("Esc {}", app.t("modal.cancel")));
    parts.push("Tab ↹".to_string());
    parts.join("  ·  ")
}

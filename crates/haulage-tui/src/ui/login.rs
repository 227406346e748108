//! Login form.
//!
//! Email and password entry with per-field errors, a submission indicator,
//! and the post-login redirect notice.

use haulage_app::{LoginField, LoginForm};
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const FORM_WIDTH: u16 = 46;
const FORM_HEIGHT: u16 = 12;
const FOCUS_MARKER: &str = "> ";
const BLANK_MARKER: &str = "  ";
const MASK: &str = "*";

/// Render the login screen.
pub fn render(frame: &mut Frame, form: &LoginForm, area: Rect) {
    let card = centered(area, FORM_WIDTH, FORM_HEIGHT);
    let block = Block::default().borders(Borders::ALL).title(" Sign in ");
    frame.render_widget(block, card);

    let inner = card.inner(Margin { horizontal: 2, vertical: 1 });
    let mut lines: Vec<Line> = Vec::new();

    for field in [LoginField::Email, LoginField::Password] {
        lines.extend(field_lines(form, field));
        lines.push(Line::raw(""));
    }

    if form.is_submitting() {
        lines.push(Line::from(Span::styled("Signing in...", Style::default().fg(Color::Yellow))));
    }
    if let Some(feedback) = form.feedback() {
        lines.push(super::feedback_line(feedback));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Label, value, and error lines for one field.
fn field_lines(form: &LoginForm, field: LoginField) -> Vec<Line<'_>> {
    let focused = form.focus() == field;
    let marker = if focused { FOCUS_MARKER } else { BLANK_MARKER };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let value = match field {
        LoginField::Email => form.value(field).to_string(),
        LoginField::Password => MASK.repeat(form.value(field).chars().count()),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{marker}{}: ", field.label()), label_style),
        Span::raw(value),
    ])];

    for message in form.errors_for(field) {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

/// Center a fixed-size card inside the available area.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

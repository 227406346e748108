//! Trip creation form.
//!
//! One line per field with the vehicle selector rendered as a left/right
//! carousel, per-field errors underneath, and the submission banner.

use haulage_app::{CreateField, CreateForm};
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const FOCUS_MARKER: &str = "> ";
const BLANK_MARKER: &str = "  ";
const LABEL_WIDTH: usize = 16;

/// Render the trip creation screen.
pub fn render(frame: &mut Frame, form: &CreateForm, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" New trip ");
    frame.render_widget(block, area);

    let inner = area.inner(Margin { horizontal: 2, vertical: 1 });
    let mut lines: Vec<Line> = Vec::new();

    for field in CreateField::ALL {
        lines.extend(field_lines(form, field));
    }

    lines.push(Line::raw(""));
    if form.is_submitting() {
        lines.push(Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow))));
    }
    if let Some(feedback) = form.feedback() {
        lines.push(super::feedback_line(feedback));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Label, value, and error lines for one field.
fn field_lines(form: &CreateForm, field: CreateField) -> Vec<Line<'_>> {
    let focused = form.focus() == field;
    let marker = if focused { FOCUS_MARKER } else { BLANK_MARKER };
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let value = if field == CreateField::Vehicle && focused {
        format!("< {} >", form.value(field))
    } else {
        form.value(field).to_string()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{marker}{label:<width$}", label = field.label(), width = LABEL_WIDTH),
            label_style,
        ),
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

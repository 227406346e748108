//! UI rendering.
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod create;
mod login;
mod trips;

use haulage_app::{App, Feedback, FeedbackKind, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    match app.screen() {
        Screen::Login => login::render(frame, app.login_form(), *main_area),
        Screen::Dashboard => trips::render(frame, app.dashboard(), *main_area),
        Screen::Create => create::render(frame, app.create_form(), *main_area),
    }

    render_status_bar(frame, app, *status_area);
}

/// Render the status bar: screen name, role, and key hints.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (title, hints) = match app.screen() {
        Screen::Login => ("Sign in", "Tab field | Enter submit | Esc quit"),
        Screen::Dashboard => (
            "Trips",
            "Up/Down move | Enter select | a accept | s start | e end | r refresh | Tab create | Esc quit",
        ),
        Screen::Create => (
            "New trip",
            "Up/Down field | Left/Right vehicle | Enter submit | Tab trips | Esc quit",
        ),
    };

    let status_line = Line::from(vec![
        Span::raw(format!(" {title} ")),
        Span::styled(format!("[{}] ", app.role()), Style::default().fg(Color::Yellow)),
        Span::styled(hints, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

/// Feedback banner line, green for success and red for errors.
fn feedback_line(feedback: &Feedback) -> Line<'_> {
    let style = match feedback.kind {
        FeedbackKind::Success => Style::default().fg(Color::Green),
        FeedbackKind::Error => Style::default().fg(Color::Red),
    };
    Line::from(Span::styled(feedback.text.as_str(), style))
}

//! Driver trip list.
//!
//! Two-pane dashboard: trip list on the left, details for the trip under
//! the cursor on the right, with submission state and banners in a footer.

use haulage_app::{Dashboard, LoadState};
use haulage_core::{Trip, TripStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const LIST_WIDTH: u16 = 34;
const DETAIL_MIN_WIDTH: u16 = 30;
const FOOTER_HEIGHT: u16 = 2;
const CURSOR_PREFIX: &str = ">";
const PLAIN_PREFIX: &str = " ";
const SELECTED_MARKER: &str = "*";
const EMPTY_MARKER: &str = "";
const PICKUP_TIME_DISPLAY: &str = "%Y-%m-%d %H:%M";

/// Render the dashboard.
pub fn render(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    if dashboard.trips().is_empty() {
        let message = match dashboard.load() {
            LoadState::Loading => {
                Span::styled("Loading trips...", Style::default().fg(Color::Yellow))
            },
            LoadState::Failed(message) => {
                Span::styled(format!("Error: {message}"), Style::default().fg(Color::Red))
            },
            LoadState::Idle => {
                Span::styled("No active trips found.", Style::default().fg(Color::Gray))
            },
        };
        let block = Block::default().borders(Borders::ALL).title(" Trips ");
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);
    let [main_area, footer_area] = chunks.as_ref() else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(DETAIL_MIN_WIDTH)])
        .split(*main_area);
    let [list_area, detail_area] = columns.as_ref() else {
        return;
    };

    render_list(frame, dashboard, *list_area);
    render_details(frame, dashboard, *detail_area);
    render_footer(frame, dashboard, *footer_area);
}

fn render_list(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let items: Vec<ListItem> = dashboard
        .trips()
        .iter()
        .enumerate()
        .map(|(index, trip)| {
            let prefix = if index == dashboard.cursor() { CURSOR_PREFIX } else { PLAIN_PREFIX };
            let selected = dashboard.selected() == Some(trip.id);
            let marker = if selected { SELECTED_MARKER } else { EMPTY_MARKER };

            let title_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{prefix} ")),
                Span::styled(trip.title(), title_style),
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(" {}", trip.status),
                    Style::default().fg(status_color(trip.status)),
                ),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Trips ");
    frame.render_widget(List::new(items).block(block), area);
}

fn render_details(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(trip) = dashboard.trip_under_cursor() else {
        frame.render_widget(block, area);
        return;
    };
    let selected = dashboard.selected() == Some(trip.id);

    let mut lines = vec![
        Line::from(Span::styled(trip.title(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(trip.status.to_string(), Style::default().fg(status_color(trip.status))),
        ]),
        Line::raw(format!("From:   {}", trip.pickup_location)),
        Line::raw(format!("To:     {}", trip.dropoff_location)),
        Line::raw(format!("Pickup: {}", trip.pickup_time.format(PICKUP_TIME_DISPLAY))),
        Line::raw(format!("Load:   {}", trip.load_description)),
        Line::raw(format!("Vehicle: {}", trip.vehicle_type.label())),
    ];

    if let Some(floors) = trip.number_of_floors {
        lines.push(Line::raw(format!("Floors: {floors}")));
    }
    if let Some(contact) = trip.visible_contact() {
        lines.push(Line::raw(format!("Contact: {contact}")));
    }

    lines.push(Line::raw(""));
    let hints = action_hints(trip, selected).join("  ");
    lines.push(Line::from(Span::styled(hints, Style::default().fg(Color::Cyan))));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let mut lines = Vec::new();

    if dashboard.is_submitting() {
        lines.push(Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow))));
    }
    if let Some(feedback) = dashboard.feedback() {
        lines.push(super::feedback_line(feedback));
    }
    if let LoadState::Failed(message) = dashboard.load() {
        lines.push(Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Key hints for the trip under the cursor.
///
/// Accept is offered for every trip that is not already accepted; the
/// transition table rejects the impossible ones with a readable reason.
/// Start and end need the trip to be selected first.
fn action_hints(trip: &Trip, selected: bool) -> Vec<&'static str> {
    let mut hints = Vec::new();

    if trip.status != TripStatus::Accepted {
        hints.push("[a] accept");
    }
    if !selected && matches!(trip.status, TripStatus::Accepted | TripStatus::InProgress) {
        hints.push("[Enter] select");
    }
    if selected {
        match trip.status {
            TripStatus::Accepted => hints.push("[s] start"),
            TripStatus::InProgress => hints.push("[e] end"),
            TripStatus::Pending | TripStatus::Completed => {},
        }
    }

    hints
}

fn status_color(status: TripStatus) -> Color {
    match status {
        TripStatus::Pending => Color::Yellow,
        TripStatus::Accepted => Color::Cyan,
        TripStatus::InProgress => Color::Green,
        TripStatus::Completed => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use haulage_core::{TripId, VehicleType, parse_pickup_time};

    use super::*;

    fn trip(status: TripStatus) -> Trip {
        Trip {
            id: TripId::random(),
            name: None,
            status,
            bid: None,
            number_of_floors: None,
            load_description: "Pallets".to_string(),
            vehicle_type: VehicleType::Car,
            pickup_location: "A".to_string(),
            dropoff_location: "B".to_string(),
            pickup_time: parse_pickup_time("2024-05-01T08:00").unwrap(),
            dropoff_contact_number: "5550001111".to_string(),
            updated: None,
        }
    }

    #[test]
    fn accept_is_offered_for_every_status_except_accepted() {
        assert!(action_hints(&trip(TripStatus::Pending), false).contains(&"[a] accept"));
        assert!(action_hints(&trip(TripStatus::InProgress), false).contains(&"[a] accept"));
        assert!(!action_hints(&trip(TripStatus::Accepted), false).contains(&"[a] accept"));
    }

    #[test]
    fn start_needs_a_selected_accepted_trip() {
        assert!(action_hints(&trip(TripStatus::Accepted), true).contains(&"[s] start"));
        assert!(!action_hints(&trip(TripStatus::Accepted), false).contains(&"[s] start"));
        assert!(!action_hints(&trip(TripStatus::InProgress), true).contains(&"[s] start"));
    }

    #[test]
    fn end_needs_a_selected_in_progress_trip() {
        assert!(action_hints(&trip(TripStatus::InProgress), true).contains(&"[e] end"));
        assert!(!action_hints(&trip(TripStatus::InProgress), false).contains(&"[e] end"));
        assert!(!action_hints(&trip(TripStatus::Pending), true).contains(&"[e] end"));
    }

    #[test]
    fn selection_hint_only_for_selectable_statuses() {
        assert!(action_hints(&trip(TripStatus::Accepted), false).contains(&"[Enter] select"));
        assert!(!action_hints(&trip(TripStatus::Pending), false).contains(&"[Enter] select"));
        assert!(!action_hints(&trip(TripStatus::Accepted), true).contains(&"[Enter] select"));
    }
}

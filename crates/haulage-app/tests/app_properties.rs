//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences:
//! at most one submission in flight per machine, selection always
//! referencing a listed trip, and completed trips never surfacing.

use std::sync::OnceLock;

use haulage_api::Session;
use haulage_app::{App, AppAction, AppEvent, KeyInput, Screen};
use haulage_core::{
    ActorRole, FieldErrors, LifecyclePolicy, Trip, TripAction, TripId, TripStatus, VehicleType,
    parse_pickup_time,
};
use proptest::prelude::*;

const POOL_SIZE: usize = 4;

/// Fixed trip ids so generated events can collide on purpose.
fn pool() -> &'static [TripId] {
    static POOL: OnceLock<Vec<TripId>> = OnceLock::new();
    POOL.get_or_init(|| (0..POOL_SIZE).map(|_| TripId::random()).collect())
}

fn trip(id: TripId, status: TripStatus) -> Trip {
    Trip {
        id,
        name: None,
        status,
        bid: None,
        number_of_floors: None,
        load_description: "Pallets".to_string(),
        vehicle_type: VehicleType::Truck1,
        pickup_location: "Dock 4".to_string(),
        dropoff_location: "Warehouse 9".to_string(),
        pickup_time: parse_pickup_time("2024-01-01T10:00").unwrap(),
        dropoff_contact_number: "5550001111".to_string(),
        updated: None,
    }
}

/// One trip per distinct pool index, first status wins.
fn realize(entries: Vec<(usize, TripStatus)>) -> Vec<Trip> {
    let mut seen = [false; POOL_SIZE];
    let mut trips = Vec::new();
    for (index, status) in entries {
        if !seen[index] {
            seen[index] = true;
            trips.push(trip(pool()[index], status));
        }
    }
    trips
}

fn status_strategy() -> impl Strategy<Value = TripStatus> {
    prop_oneof![
        Just(TripStatus::Pending),
        Just(TripStatus::Accepted),
        Just(TripStatus::InProgress),
        Just(TripStatus::Completed),
    ]
}

fn action_strategy() -> impl Strategy<Value = TripAction> {
    prop_oneof![Just(TripAction::Accept), Just(TripAction::Start), Just(TripAction::End)]
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        Just(KeyInput::Up),
        Just(KeyInput::Down),
        Just(KeyInput::Enter),
        Just(KeyInput::Tab),
        Just(KeyInput::Backspace),
        Just(KeyInput::Char('a')),
        Just(KeyInput::Char('s')),
        Just(KeyInput::Char('e')),
        Just(KeyInput::Char('r')),
        Just(KeyInput::Char('x')),
        any::<char>().prop_map(KeyInput::Char),
    ]
}

/// Generate random app events, completions included so sequences cover
/// out-of-order arrivals.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        5 => key_strategy().prop_map(AppEvent::Key),
        1 => Just(AppEvent::Tick),
        2 => prop::collection::vec((0..POOL_SIZE, status_strategy()), 0..POOL_SIZE)
            .prop_map(|entries| AppEvent::TripsLoaded { trips: realize(entries) }),
        1 => (0..POOL_SIZE, action_strategy())
            .prop_map(|(i, action)| AppEvent::TransitionApplied { id: pool()[i], action }),
        1 => (0..POOL_SIZE, action_strategy())
            .prop_map(|(i, action)| AppEvent::TransitionFailed { id: pool()[i], action }),
        1 => (0..POOL_SIZE, status_strategy())
            .prop_map(|(i, status)| AppEvent::TripCreated { trip: trip(pool()[i], status) }),
        1 => Just(AppEvent::TripCreateFailed { field_errors: FieldErrors::new() }),
    ]
}

fn driver_app() -> App {
    let mut app =
        App::new(ActorRole::Driver, LifecyclePolicy::default(), Some(Session::new("tok")));
    let _ = app.bootstrap();
    app
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut app = driver_app();

        let mut transition_in_flight = false;
        let mut create_in_flight = false;

        for event in events {
            let completes_transition = matches!(
                event,
                AppEvent::TransitionApplied { .. } | AppEvent::TransitionFailed { .. }
            );
            let completes_create =
                matches!(event, AppEvent::TripCreated { .. } | AppEvent::TripCreateFailed { .. });

            let actions = app.handle(event);

            for action in &actions {
                match action {
                    AppAction::SubmitTransition { .. } => {
                        prop_assert!(!transition_in_flight, "second transition while in flight");
                        transition_in_flight = true;
                    },
                    AppAction::SubmitCreate { .. } => {
                        prop_assert!(!create_in_flight, "second create while in flight");
                        create_in_flight = true;
                    },
                    _ => {},
                }
            }
            if completes_transition {
                transition_in_flight = false;
            }
            if completes_create {
                create_in_flight = false;
            }

            // Selection always references a listed trip
            if let Some(id) = app.dashboard().selected() {
                prop_assert!(app.dashboard().trips().iter().any(|t| t.id == id));
            }
            // Completed trips never surface in the rendered list
            prop_assert!(
                app.dashboard().trips().iter().all(|t| t.status != TripStatus::Completed)
            );
            // Cursor stays in bounds
            let len = app.dashboard().trips().len();
            prop_assert!(app.dashboard().cursor() == 0 || app.dashboard().cursor() < len);
        }
    }

    #[test]
    fn prop_dismiss_always_clears_the_banner(
        events in prop::collection::vec(event_strategy(), 0..40)
    ) {
        let mut app = driver_app();
        for event in events {
            let _ = app.handle(event);
        }

        if app.screen() == Screen::Dashboard {
            let _ = app.handle(AppEvent::Key(KeyInput::Char('x')));
            prop_assert!(app.dashboard().feedback().is_none());
        }
    }
}

#[test]
fn stray_completion_never_selects_an_unlisted_trip() {
    let mut app = driver_app();

    // The list is still empty when an accept acknowledgment arrives
    let _ = app.handle(AppEvent::TransitionApplied {
        id: TripId::random(),
        action: TripAction::Accept,
    });

    assert_eq!(app.dashboard().selected(), None);
}

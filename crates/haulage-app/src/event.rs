//! Application input events.
//!
//! This module defines [`AppEvent`], the full set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and periodic ticks.
//! - Completions of API calls the runtime spawned for earlier actions.

use haulage_api::{LoginFailure, Session};
use haulage_core::{FieldErrors, Trip, TripAction, TripId};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Trip list fetch completed.
    TripsLoaded {
        /// Every trip the server reported, completed ones included.
        trips: Vec<Trip>,
    },

    /// Trip list fetch failed.
    TripsLoadFailed {
        /// Failure description for the list view.
        message: String,
    },

    /// The server acknowledged a status transition.
    TransitionApplied {
        /// Trip the transition was applied to.
        id: TripId,
        /// Action that was submitted.
        action: TripAction,
    },

    /// A status transition was rejected or lost.
    TransitionFailed {
        /// Trip the transition was meant for.
        id: TripId,
        /// Action that was submitted.
        action: TripAction,
    },

    /// The server acknowledged a trip creation.
    TripCreated {
        /// The created trip as the server reports it.
        trip: Trip,
    },

    /// Trip creation failed.
    TripCreateFailed {
        /// Per-field validation errors, empty for non-validation failures.
        field_errors: FieldErrors,
    },

    /// Login exchanged credentials for a token.
    LoginSucceeded {
        /// The fresh session.
        session: Session,
    },

    /// Login failed.
    LoginFailed {
        /// Classified failure, mapped to user-facing feedback.
        failure: LoginFailure,
    },
}

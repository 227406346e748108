//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.
//! Each submission action results in exactly one completion event later.

use haulage_api::Session;
use haulage_core::{NewTrip, TripAction, TripId, TripStatus};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Fetch the trip list.
    FetchTrips,

    /// Submit a status transition for a trip.
    SubmitTransition {
        /// Trip to advance.
        id: TripId,
        /// Lifecycle action being applied, echoed back in the completion.
        action: TripAction,
        /// Status to submit, already validated by the transition table.
        status: TripStatus,
    },

    /// Submit a trip creation.
    SubmitCreate {
        /// The draft exactly as entered.
        draft: NewTrip,
    },

    /// Broadcast a created trip to other clients, best-effort.
    ///
    /// The runtime fires this without awaiting an acknowledgment; failures
    /// are logged and dropped, never reported back as an event.
    Announce {
        /// Creation fields to broadcast.
        draft: NewTrip,
    },

    /// Exchange credentials for a token.
    SubmitLogin {
        /// Entered email.
        email: String,
        /// Entered password.
        password: String,
    },

    /// Persist the session token.
    StoreToken {
        /// Session to persist under the well-known key.
        session: Session,
    },
}

//! Driver trip list state machine.
//!
//! Pure state machine behind the dashboard screen: it consumes completion
//! events and user operations, and produces [`crate::AppAction`]s for the
//! runtime to execute. No I/O here.
//!
//! # Responsibilities
//!
//! - Holds the non-completed trips from the last fetch. Completed trips are
//!   excluded in this view layer, not by the API client.
//! - Tracks the single selected trip the driver is progressing.
//! - Gates accept/start/end through the lifecycle transition table and the
//!   one-in-flight submission flag.
//! - Carries the feedback banner for the last operation.

use haulage_core::{ActorRole, LifecyclePolicy, Trip, TripAction, TripId, TripStatus};

use crate::{
    AppAction,
    state::{Feedback, LoadState, PendingSubmission},
};

/// Banner text after a server-acknowledged transition.
fn success_message(action: TripAction) -> &'static str {
    match action {
        TripAction::Accept => "Trip accepted.",
        TripAction::Start => "Trip has started.",
        TripAction::End => "Trip has completed.",
    }
}

/// Banner text after a failed transition submission.
fn failure_message(action: TripAction) -> &'static str {
    match action {
        TripAction::Accept => "Failed to accept trip. Please try again later.",
        TripAction::Start => "Error starting trip. Please try again later.",
        TripAction::End => "Error ending trip. Please try again later.",
    }
}

/// Driver trip list state machine.
///
/// The list is never mutated locally: a transition only changes what is
/// rendered after the server acknowledged it and the follow-up fetch
/// reported the new state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Non-completed trips from the last fetch.
    trips: Vec<Trip>,
    /// Load state of the list.
    load: LoadState,
    /// The single trip being progressed. `None` if none selected.
    selected: Option<TripId>,
    /// In-flight transition submission. `None` when idle.
    pending: Option<PendingSubmission>,
    /// Cursor into `trips` for keyboard navigation.
    cursor: usize,
    /// Feedback banner for the last operation. `None` if dismissed.
    feedback: Option<Feedback>,
    /// Transition table configuration.
    policy: LifecyclePolicy,
    /// Role of the actor driving this view.
    role: ActorRole,
}

impl Dashboard {
    /// Empty dashboard for the given actor.
    pub fn new(role: ActorRole, policy: LifecyclePolicy) -> Self {
        Self {
            trips: Vec::new(),
            load: LoadState::Idle,
            selected: None,
            pending: None,
            cursor: 0,
            feedback: None,
            policy,
            role,
        }
    }

    /// Fetch the list. Used on entry, after every acknowledged transition,
    /// and as the user-triggered retry after a failed fetch.
    pub fn refresh(&mut self) -> Vec<AppAction> {
        self.load = LoadState::Loading;
        vec![AppAction::FetchTrips, AppAction::Render]
    }

    /// Accept the given trip.
    ///
    /// Gated by the transition table; an ineligible trip produces a readable
    /// rejection banner instead of a request.
    pub fn accept(&mut self, id: TripId) -> Vec<AppAction> {
        if self.pending.is_some() {
            return vec![];
        }
        let Some(status) = self.trip(id).map(|trip| trip.status) else {
            return vec![];
        };
        self.submit(id, status, TripAction::Accept)
    }

    /// Start the selected trip.
    pub fn start(&mut self) -> Vec<AppAction> {
        self.submit_selected(TripAction::Start)
    }

    /// End the selected trip.
    pub fn end(&mut self) -> Vec<AppAction> {
        self.submit_selected(TripAction::End)
    }

    /// Select a trip as the one being progressed.
    ///
    /// Only an `Accepted` or `InProgress` trip is selectable; anything else
    /// leaves the selection unchanged.
    pub fn select(&mut self, id: TripId) -> Vec<AppAction> {
        let selectable = self.trip(id).is_some_and(|trip| {
            matches!(trip.status, TripStatus::Accepted | TripStatus::InProgress)
        });
        if selectable {
            self.selected = Some(id);
        }
        vec![AppAction::Render]
    }

    /// Move the cursor up one trip.
    pub fn cursor_up(&mut self) -> Vec<AppAction> {
        self.cursor = self.cursor.saturating_sub(1);
        vec![AppAction::Render]
    }

    /// Move the cursor down one trip.
    pub fn cursor_down(&mut self) -> Vec<AppAction> {
        if self.cursor + 1 < self.trips.len() {
            self.cursor += 1;
        }
        vec![AppAction::Render]
    }

    /// Dismiss the feedback banner.
    pub fn dismiss_feedback(&mut self) -> Vec<AppAction> {
        self.feedback = None;
        vec![AppAction::Render]
    }

    /// A fetch completed. Completed trips are dropped here; a selection
    /// pointing at a trip no longer listed is cleared.
    pub fn on_trips_loaded(&mut self, all: Vec<Trip>) -> Vec<AppAction> {
        self.trips = all.into_iter().filter(|trip| trip.status != TripStatus::Completed).collect();
        self.load = LoadState::Idle;
        if let Some(id) = self.selected && self.trip(id).is_none() {
            self.selected = None;
        }
        self.clamp_cursor();
        vec![AppAction::Render]
    }

    /// A fetch failed. The stale list stays visible alongside the error.
    pub fn on_trips_load_failed(&mut self, message: String) -> Vec<AppAction> {
        self.load = LoadState::Failed(message);
        vec![AppAction::Render]
    }

    /// The server acknowledged a transition. Accept selects the trip, as
    /// long as a refresh has not dropped it mid-flight; start and end clear
    /// the selection. Always refetches.
    pub fn on_transition_applied(&mut self, id: TripId, action: TripAction) -> Vec<AppAction> {
        self.pending = None;
        self.feedback = Some(Feedback::success(success_message(action)));
        match action {
            TripAction::Accept => {
                if self.trip(id).is_some() {
                    self.selected = Some(id);
                }
            },
            TripAction::Start | TripAction::End => self.selected = None,
        }
        self.refresh()
    }

    /// A transition submission failed. Selection and list stay as they
    /// were; no refetch.
    pub fn on_transition_failed(&mut self, action: TripAction) -> Vec<AppAction> {
        self.pending = None;
        self.feedback = Some(Feedback::error(failure_message(action)));
        vec![AppAction::Render]
    }

    fn submit_selected(&mut self, action: TripAction) -> Vec<AppAction> {
        if self.pending.is_some() {
            return vec![];
        }
        let Some(id) = self.selected else {
            self.feedback = Some(Feedback::error("No trip selected."));
            return vec![AppAction::Render];
        };
        let Some(status) = self.trip(id).map(|trip| trip.status) else {
            // a refresh clears dropped selections; a stale id must never submit
            self.selected = None;
            return vec![AppAction::Render];
        };
        self.submit(id, status, action)
    }

    fn submit(&mut self, id: TripId, status: TripStatus, action: TripAction) -> Vec<AppAction> {
        match self.policy.advance(self.role, status, action) {
            Ok(next) => {
                self.pending = Some(PendingSubmission { id, action });
                vec![AppAction::SubmitTransition { id, action, status: next }, AppAction::Render]
            },
            Err(reason) => {
                self.feedback = Some(Feedback::error(reason.to_string()));
                vec![AppAction::Render]
            },
        }
    }

    fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.trips.len() {
            self.cursor = self.trips.len().saturating_sub(1);
        }
    }

    /// Non-completed trips from the last fetch.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Load state of the list.
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// The selected trip id. `None` if none selected.
    pub fn selected(&self) -> Option<TripId> {
        self.selected
    }

    /// The selected trip. `None` if none selected.
    pub fn selected_trip(&self) -> Option<&Trip> {
        self.selected.and_then(|id| self.trip(id))
    }

    /// In-flight submission, if any.
    pub fn pending(&self) -> Option<PendingSubmission> {
        self.pending
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Cursor position in the list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Trip under the cursor. `None` when the list is empty.
    pub fn trip_under_cursor(&self) -> Option<&Trip> {
        self.trips.get(self.cursor)
    }

    /// Current feedback banner.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Role of the actor driving this view.
    pub fn role(&self) -> ActorRole {
        self.role
    }
}

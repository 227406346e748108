//! Observable application state types.
//!
//! This module defines the small data structures the screens expose for
//! rendering: feedback banners, list load state, the in-flight submission
//! marker, and the active screen. They are the "View Model" side of the
//! state machines; the TUI reads them and draws.

use haulage_core::{TripAction, TripId};

/// Which screen has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Credential entry.
    Login,
    /// Driver trip list.
    Dashboard,
    /// Trip creation form.
    Create,
}

/// Severity of a feedback banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// The last operation succeeded.
    Success,
    /// The last operation failed.
    Error,
}

/// A user-facing feedback banner, dismissable on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Message text, shown verbatim.
    pub text: String,
    /// Banner severity.
    pub kind: FeedbackKind,
}

impl Feedback {
    /// Success banner.
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: FeedbackKind::Success }
    }

    /// Error banner.
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: FeedbackKind::Error }
    }
}

/// Load state of the trip list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// List is current as of the last fetch.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed.
    Failed(String),
}

/// The single transition currently awaiting a server response.
///
/// While one is present every further dashboard submission is a no-op;
/// a rapid double-press submits once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Trip the submission targets.
    pub id: TripId,
    /// Action submitted.
    pub action: TripAction,
}

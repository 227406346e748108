//! Error types for the haulage domain core.
//!
//! Lifecycle rejections are strongly typed so callers can surface the exact
//! reason an action was refused instead of a blanket "invalid" message.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::lifecycle::{ActorRole, TripAction, TripStatus};

/// Per-field validation messages, keyed by field name.
///
/// Mirrors the error payload shape validation endpoints return: each offending
/// field maps to one or more messages. `BTreeMap` keeps display order stable.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors from the trip lifecycle state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The action is not legal from the trip's current status
    #[error("invalid transition: cannot {action} a trip that is {from}")]
    InvalidTransition {
        /// Status the trip held when the action was attempted
        from: TripStatus,
        /// Action that was attempted
        action: TripAction,
    },

    /// The acting role may not apply lifecycle actions
    #[error("a {role} may not {action} trips")]
    RoleForbidden {
        /// Role that attempted the action
        role: ActorRole,
        /// Action that was attempted
        action: TripAction,
    },
}

//! Trip lifecycle state machine.
//!
//! Trip statuses form a linear chain with no back-transitions and no
//! cancellation path. All transition checks go through a single function,
//! [`LifecyclePolicy::advance`], which returns the next status or a typed
//! rejection. The server remains authoritative: callers submit the target
//! status over HTTP after the local check passes and re-fetch afterwards.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐  Accept  ┌──────────┐  Start  ┌────────────┐  End  ┌───────────┐
//! │ Pending │─────────>│ Accepted │────────>│ InProgress │──────>│ Completed │
//! └─────────┘          └──────────┘         └────────────┘       └───────────┘
//! ```
//!
//! `Completed` is terminal. An optional policy knob admits `End` directly from
//! `Accepted`, matching deployments where drivers close short trips without an
//! explicit start.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Lifecycle stage of a trip.
///
/// Serialized in the wire form the trip API uses (`PENDING`, `ACCEPTED`,
/// `IN_PROGRESS`, `COMPLETED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    /// Created, not yet claimed by a driver.
    Pending,
    /// Claimed by a driver; contact details become visible.
    Accepted,
    /// Driver is underway.
    InProgress,
    /// Finished. Terminal; excluded from active list views.
    Completed,
}

impl TripStatus {
    /// Wire name of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Completed
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle action a driver can apply to a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripAction {
    /// Claim a pending trip.
    Accept,
    /// Begin an accepted trip.
    Start,
    /// Finish a trip.
    End,
}

impl TripAction {
    /// Status a trip holds after this action succeeds.
    #[must_use]
    pub fn target(self) -> TripStatus {
        match self {
            Self::Accept => TripStatus::Accepted,
            Self::Start => TripStatus::InProgress,
            Self::End => TripStatus::Completed,
        }
    }
}

impl fmt::Display for TripAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accept => "accept",
            Self::Start => "start",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// Role of the acting user.
///
/// Drivers advance trips through their lifecycle; requesters create them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    /// Operates vehicles and progresses trips.
    Driver,
    /// Books trips and receives loads.
    Requester,
}

impl ActorRole {
    /// Whether this role may apply lifecycle actions.
    #[must_use]
    pub fn may_advance(self) -> bool {
        matches!(self, Self::Driver)
    }

    /// Whether this role may create trips.
    #[must_use]
    pub fn may_create(self) -> bool {
        matches!(self, Self::Requester)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Driver => "driver",
            Self::Requester => "requester",
        };
        f.write_str(name)
    }
}

/// Transition policy for the lifecycle state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecyclePolicy {
    /// Admit `End` directly from `Accepted`, skipping `InProgress`.
    ///
    /// Off by default: the documented chain requires a start before an end.
    pub allow_end_from_accepted: bool,
}

impl LifecyclePolicy {
    /// Evaluate one lifecycle action against the transition table.
    ///
    /// Returns the status the trip will hold if the server acknowledges the
    /// update.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::RoleForbidden`] if `role` may not advance trips
    /// - [`TransitionError::InvalidTransition`] for any pair outside the chain
    pub fn advance(
        &self,
        role: ActorRole,
        status: TripStatus,
        action: TripAction,
    ) -> Result<TripStatus, TransitionError> {
        if !role.may_advance() {
            return Err(TransitionError::RoleForbidden { role, action });
        }

        match (status, action) {
            (TripStatus::Pending, TripAction::Accept) => Ok(TripStatus::Accepted),
            (TripStatus::Accepted, TripAction::Start) => Ok(TripStatus::InProgress),
            (TripStatus::InProgress, TripAction::End) => Ok(TripStatus::Completed),
            (TripStatus::Accepted, TripAction::End) if self.allow_end_from_accepted => {
                Ok(TripStatus::Completed)
            },
            (from, action) => Err(TransitionError::InvalidTransition { from, action }),
        }
    }

    /// Whether the transition table admits this action.
    #[must_use]
    pub fn permits(&self, role: ActorRole, status: TripStatus, action: TripAction) -> bool {
        self.advance(role, status, action).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [TripStatus; 4] = [
        TripStatus::Pending,
        TripStatus::Accepted,
        TripStatus::InProgress,
        TripStatus::Completed,
    ];
    const ALL_ACTIONS: [TripAction; 3] = [TripAction::Accept, TripAction::Start, TripAction::End];

    #[test]
    fn strict_table_is_the_linear_chain() {
        let policy = LifecyclePolicy::default();

        for status in ALL_STATUSES {
            for action in ALL_ACTIONS {
                let result = policy.advance(ActorRole::Driver, status, action);
                match (status, action) {
                    (TripStatus::Pending, TripAction::Accept) => {
                        assert_eq!(result, Ok(TripStatus::Accepted));
                    },
                    (TripStatus::Accepted, TripAction::Start) => {
                        assert_eq!(result, Ok(TripStatus::InProgress));
                    },
                    (TripStatus::InProgress, TripAction::End) => {
                        assert_eq!(result, Ok(TripStatus::Completed));
                    },
                    (from, action) => {
                        assert_eq!(
                            result,
                            Err(TransitionError::InvalidTransition { from, action })
                        );
                    },
                }
            }
        }
    }

    #[test]
    fn permissive_policy_admits_end_from_accepted() {
        let policy = LifecyclePolicy { allow_end_from_accepted: true };

        assert_eq!(
            policy.advance(ActorRole::Driver, TripStatus::Accepted, TripAction::End),
            Ok(TripStatus::Completed)
        );

        // Everything else matches the strict table
        assert!(policy.advance(ActorRole::Driver, TripStatus::Pending, TripAction::End).is_err());
        assert!(policy.advance(ActorRole::Driver, TripStatus::Pending, TripAction::Start).is_err());
    }

    #[test]
    fn completed_is_terminal() {
        let permissive = LifecyclePolicy { allow_end_from_accepted: true };

        for action in ALL_ACTIONS {
            assert!(permissive.advance(ActorRole::Driver, TripStatus::Completed, action).is_err());
        }
        assert!(TripStatus::Completed.is_terminal());
        assert!(!TripStatus::InProgress.is_terminal());
    }

    #[test]
    fn requesters_may_not_advance() {
        let policy = LifecyclePolicy::default();

        let result = policy.advance(ActorRole::Requester, TripStatus::Pending, TripAction::Accept);
        assert_eq!(
            result,
            Err(TransitionError::RoleForbidden {
                role: ActorRole::Requester,
                action: TripAction::Accept,
            })
        );

        assert!(ActorRole::Requester.may_create());
        assert!(!ActorRole::Driver.may_create());
    }

    #[test]
    fn action_targets_match_the_chain() {
        assert_eq!(TripAction::Accept.target(), TripStatus::Accepted);
        assert_eq!(TripAction::Start.target(), TripStatus::InProgress);
        assert_eq!(TripAction::End.target(), TripStatus::Completed);
    }

    #[test]
    fn status_serializes_to_wire_names() {
        for status in ALL_STATUSES {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));

            let back: TripStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }

        assert_eq!(TripStatus::InProgress.as_str(), "IN_PROGRESS");
    }

    #[test]
    fn rejection_reason_is_readable() {
        let policy = LifecyclePolicy::default();
        let err = policy
            .advance(ActorRole::Driver, TripStatus::InProgress, TripAction::Accept)
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid transition: cannot accept a trip that is IN_PROGRESS");
    }
}

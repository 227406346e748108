//! Domain core for Haulage
//!
//! Pure domain types and the trip lifecycle state machine. No I/O: this crate
//! defines what a trip is and which status transitions are legal, leaving
//! transport to the api layer and presentation to the app layer.
//!
//! # Components
//!
//! - [`Trip`] / [`NewTrip`]: the haulage request as the server reports it and
//!   as creation forms submit it.
//! - [`TripStatus`] / [`TripAction`]: lifecycle states and the actions that
//!   move between them.
//! - [`LifecyclePolicy`]: the single transition function, returning the next
//!   status or a typed rejection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod lifecycle;
mod trip;

pub use error::{FieldErrors, TransitionError};
pub use lifecycle::{ActorRole, LifecyclePolicy, TripAction, TripStatus};
pub use trip::{NewTrip, Trip, TripId, VehicleType, parse_pickup_time};

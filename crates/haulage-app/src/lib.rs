//! Application layer for the haulage client.
//!
//! Pure state machines for the login form, driver dashboard, and trip
//! creation form. Each machine consumes [`AppEvent`] inputs and produces
//! [`AppAction`] instructions for a runtime to execute, so every screen is
//! testable without I/O.
//!
//! # Components
//!
//! - [`App`]: screen routing, session state, key dispatch
//! - [`Dashboard`]: trip list, selection, and lifecycle submissions
//! - [`CreateForm`]: trip creation fields and required-field validation
//! - [`LoginForm`]: credential entry and the post-login redirect

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod create;
mod dashboard;
mod event;
mod input;
mod login;
mod state;

pub use action::AppAction;
pub use app::App;
pub use create::{CreateField, CreateForm};
pub use dashboard::Dashboard;
pub use event::AppEvent;
pub use input::KeyInput;
pub use login::{LoginField, LoginForm, REDIRECT_TICKS};
pub use state::{Feedback, FeedbackKind, LoadState, PendingSubmission, Screen};

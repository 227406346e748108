//! Terminal client for the haulage trip workflow.
//!
//! A thin shell over the pure state machines in `haulage_app`: the runtime
//! translates crossterm input into [`haulage_app::AppEvent`]s, executes the
//! returned [`haulage_app::AppAction`]s against the trip API, and renders
//! with ratatui. Without a `--server` argument it runs against an in-process
//! demo server so the whole workflow can be exercised offline.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod runtime;
pub mod server;
pub mod ui;

pub use runtime::{Runtime, RuntimeError};
pub use server::ServerHandle;

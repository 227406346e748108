//! Trip API client for Haulage
//!
//! The I/O layer: an HTTP client for the trip resource, bearer-token session
//! storage, and a best-effort realtime announcer for created trips. The
//! server stays authoritative; callers re-fetch after every mutation instead
//! of patching local state.
//!
//! # Components
//!
//! - [`ApiClient`]: list, create, update-status, and login operations.
//! - [`TokenStore`]: persistence seam for the single access token.
//! - [`TripAnnouncer`]: fire-and-forget `new_trip` broadcast.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod notify;
mod token;

pub use client::{ApiClient, ApiConfig};
pub use error::{ApiError, LoginFailure};
pub use notify::{AnnounceError, NoopAnnouncer, TripAnnouncer, WebSocketAnnouncer};
pub use token::{FileTokenStore, MemoryTokenStore, Session, TOKEN_KEY, TokenStore, TokenStoreError};

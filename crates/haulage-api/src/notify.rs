//! Best-effort trip announcements.
//!
//! Created trips are broadcast to other connected clients as a `new_trip`
//! event over a websocket. The broadcast is fire-and-forget: no
//! acknowledgment is awaited and delivery is not guaranteed. Runtimes spawn
//! the announce call and drop failures after logging them; the create
//! operation's outcome never depends on it.

use async_trait::async_trait;
use futures::SinkExt;
use haulage_core::NewTrip;
use serde::Serialize;
use thiserror::Error;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

/// Errors from announcing a trip.
#[derive(Error, Debug)]
pub enum AnnounceError {
    /// Websocket connect or send failure
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Event payload could not be serialized
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outbound `new_trip` event envelope.
#[derive(Serialize)]
struct AnnounceFrame<'a> {
    event: &'static str,
    data: &'a NewTrip,
}

/// Best-effort broadcast of newly created trips.
#[async_trait]
pub trait TripAnnouncer: Send + Sync {
    /// Announce a created trip.
    ///
    /// # Errors
    ///
    /// Implementations report delivery failures so tests can observe them;
    /// production callers log and drop the error.
    async fn announce(&self, draft: &NewTrip) -> Result<(), AnnounceError>;
}

/// Announcer that sends one `new_trip` frame over a websocket and closes.
#[derive(Debug, Clone)]
pub struct WebSocketAnnouncer {
    endpoint: Url,
}

impl WebSocketAnnouncer {
    /// Announce against the given websocket endpoint (`ws://...`).
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TripAnnouncer for WebSocketAnnouncer {
    async fn announce(&self, draft: &NewTrip) -> Result<(), AnnounceError> {
        let payload = serde_json::to_string(&AnnounceFrame { event: "new_trip", data: draft })?;

        let (mut socket, _response) = connect_async(self.endpoint.as_str()).await?;
        socket.send(Message::Text(payload)).await?;
        socket.close(None).await?;

        tracing::debug!(endpoint = %self.endpoint, "announced new trip");
        Ok(())
    }
}

/// Announcer that drops every event. For tests and announce-less runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnnouncer;

#[async_trait]
impl TripAnnouncer for NoopAnnouncer {
    async fn announce(&self, _draft: &NewTrip) -> Result<(), AnnounceError> {
        tracing::trace!("dropping trip announcement");
        Ok(())
    }
}

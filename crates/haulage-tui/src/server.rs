//! In-process demo server.
//!
//! Serves the trip API over a loopback listener so the client can be
//! exercised without a real deployment. Trips live in memory, any
//! credentials log in, and any bearer token is accepted. The announce
//! endpoint drains `new_trip` frames and logs them.

#![allow(clippy::unused_async, reason = "Handler signatures must be async")]

use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{Duration, Utc};
use haulage_core::{NewTrip, Trip, TripId, TripStatus, VehicleType};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;
use uuid::Uuid;

/// Handle to a running demo server.
pub struct ServerHandle {
    /// Base URL for the trip API.
    pub base_url: Url,
    /// WebSocket endpoint for trip announcements.
    pub announce_url: Url,
    abort: tokio::task::AbortHandle,
}

impl ServerHandle {
    /// Stop the server.
    pub fn stop(&self) {
        self.abort.abort();
    }
}

/// Spawn the demo server on a random loopback port.
///
/// The server runs as a tokio task until stopped or aborted.
pub async fn spawn() -> io::Result<ServerHandle> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let router = router(DemoState::seeded());
    let task = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            tracing::error!("demo server stopped: {err}");
        }
    });

    let base_url = Url::parse(&format!("http://{addr}/")).map_err(io::Error::other)?;
    let announce_url = Url::parse(&format!("ws://{addr}/ws/trips/")).map_err(io::Error::other)?;
    tracing::info!("demo server listening on {addr}");

    Ok(ServerHandle { base_url, announce_url, abort: task.abort_handle() })
}

#[derive(Clone)]
struct DemoState {
    trips: Arc<Mutex<Vec<Trip>>>,
}

impl DemoState {
    fn seeded() -> Self {
        Self { trips: Arc::new(Mutex::new(seeded_trips())) }
    }

    fn with_trips<T>(&self, f: impl FnOnce(&mut Vec<Trip>) -> T) -> T {
        let mut trips = self.trips.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut trips)
    }
}

fn router(state: DemoState) -> Router {
    Router::new()
        .route("/api/trip/", get(list_trips).post(create_trip))
        .route("/api/trip/:id", put(update_trip))
        .route("/api/user/login/", post(login))
        .route("/ws/trips/", get(announce_sink))
        .with_state(state)
}

/// Pending trips a driver can walk through the whole lifecycle.
fn seeded_trips() -> Vec<Trip> {
    vec![
        demo_trip(
            Some("Morning steel run"),
            "Steel coils",
            VehicleType::Truck4,
            "Fremont yard",
            "Port of Oakland, berth 22",
            "5105550142",
            3,
        ),
        demo_trip(
            None,
            "Office furniture",
            VehicleType::Van,
            "450 Mission St",
            "799 Folsom St",
            "4155550198",
            5,
        ),
        demo_trip(
            None,
            "Flour pallets",
            VehicleType::Truck1,
            "Harbor bakery depot",
            "210 Market St",
            "4155550177",
            8,
        ),
    ]
}

fn demo_trip(
    name: Option<&str>,
    load_description: &str,
    vehicle_type: VehicleType,
    pickup: &str,
    dropoff: &str,
    contact: &str,
    hours_ahead: i64,
) -> Trip {
    Trip {
        id: TripId::random(),
        name: name.map(str::to_string),
        status: TripStatus::Pending,
        bid: None,
        number_of_floors: None,
        load_description: load_description.to_string(),
        vehicle_type,
        pickup_location: pickup.to_string(),
        dropoff_location: dropoff.to_string(),
        pickup_time: Utc::now().naive_utc() + Duration::hours(hours_ahead),
        dropoff_contact_number: contact.to_string(),
        updated: Some(Utc::now()),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer "))
}

fn unauthorized() -> Response {
    let body = json!({"detail": "Authentication credentials were not provided."});
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

async fn list_trips(State(state): State<DemoState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let trips = state.with_trips(|trips| trips.clone());
    Json(trips).into_response()
}

async fn create_trip(State(state): State<DemoState>, Json(draft): Json<NewTrip>) -> Response {
    let trip = Trip {
        id: TripId::random(),
        name: None,
        status: TripStatus::Pending,
        bid: None,
        number_of_floors: None,
        load_description: draft.load_description,
        vehicle_type: draft.vehicle_type,
        pickup_location: draft.pickup_location,
        dropoff_location: draft.dropoff_location,
        pickup_time: draft.pickup_time,
        dropoff_contact_number: draft.dropoff_contact_number,
        updated: Some(Utc::now()),
    };

    state.with_trips(|trips| trips.push(trip.clone()));
    tracing::info!("demo trip created: {}", trip.id);

    (StatusCode::CREATED, Json(trip)).into_response()
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: TripStatus,
}

async fn update_trip(
    State(state): State<DemoState>,
    Path(id): Path<TripId>,
    headers: HeaderMap,
    Json(update): Json<StatusUpdate>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let updated = state.with_trips(|trips| {
        trips.iter_mut().find(|trip| trip.id == id).map(|trip| {
            trip.status = update.status;
            trip.updated = Some(Utc::now());
            trip.clone()
        })
    });

    match updated {
        Some(trip) => Json(trip).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Demo login: any non-blank credentials get a token.
async fn login(Json(request): Json<LoginRequest>) -> Response {
    let mut field_errors = serde_json::Map::new();
    if request.email.trim().is_empty() {
        field_errors.insert("email".to_string(), json!(["This field may not be blank."]));
    }
    if request.password.trim().is_empty() {
        field_errors.insert("password".to_string(), json!(["This field may not be blank."]));
    }
    if !field_errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(serde_json::Value::Object(field_errors)))
            .into_response();
    }

    let token = format!("demo-{}", Uuid::new_v4().simple());
    Json(json!({"access": token})).into_response()
}

async fn announce_sink(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(drain_announcements)
}

/// Log `new_trip` frames until the peer hangs up.
async fn drain_announcements(mut socket: WebSocket) {
    while let Some(Ok(message)) = socket.recv().await {
        if let Message::Text(text) = message {
            tracing::info!("trip announcement: {text}");
        }
    }
}

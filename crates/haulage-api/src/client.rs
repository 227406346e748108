//! Trip API client.
//!
//! Wraps the remote trip resource: list, create, update-status, and login.
//! One request per call, no retries, no token refresh; a 401 surfaces as
//! [`ApiError::Unauthorized`] for the caller to handle.

use std::time::Duration;

use haulage_core::{FieldErrors, NewTrip, Trip, TripId, TripStatus};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{error::ApiError, token::Session};

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the trip API server, e.g. `http://localhost:8000`.
    pub base_url: Url,

    /// Per-request timeout. `None` leaves requests unbounded; a hung server
    /// then leaves the operation pending until the user gives up.
    pub request_timeout: Option<Duration>,

    /// Attach the bearer token to create requests when a session is at hand.
    ///
    /// Deployments differ on whether trip creation is an authenticated
    /// write; the choice stays explicit instead of hard-coded.
    pub authenticate_create: bool,
}

impl ApiConfig {
    /// Config with the default knobs: no timeout, authenticated creates.
    pub fn new(base_url: Url) -> Self {
        Self { base_url, request_timeout: None, authenticate_create: true }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: TripStatus,
}

/// HTTP client for the trip resource.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if the HTTP client cannot be constructed
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch every trip visible to the session.
    ///
    /// Returns the server's list unmodified. Excluding `COMPLETED` trips is
    /// a view-layer policy, not part of this contract.
    pub async fn list_trips(&self, session: &Session) -> Result<Vec<Trip>, ApiError> {
        let url = self.endpoint("api/trip/")?;
        let response = self.http.get(url).bearer_auth(session.token()).send().await?;
        let trips: Vec<Trip> = success(response).await?;
        tracing::debug!(count = trips.len(), "listed trips");
        Ok(trips)
    }

    /// Create a trip from the draft. The server assigns the id and starts it
    /// `PENDING`.
    pub async fn create_trip(
        &self,
        draft: &NewTrip,
        session: Option<&Session>,
    ) -> Result<Trip, ApiError> {
        let url = self.endpoint("api/trip/")?;
        let mut request = self.http.post(url).json(draft);
        if self.config.authenticate_create && let Some(session) = session {
            request = request.bearer_auth(session.token());
        }
        let response = request.send().await?;
        let trip: Trip = success(response).await?;
        tracing::debug!(id = %trip.id, "created trip");
        Ok(trip)
    }

    /// Set only the trip's status; returns the updated trip.
    pub async fn update_trip_status(
        &self,
        id: TripId,
        status: TripStatus,
        session: &Session,
    ) -> Result<Trip, ApiError> {
        let url = self.endpoint(&format!("api/trip/{id}"))?;
        let response = self
            .http
            .put(url)
            .bearer_auth(session.token())
            .json(&StatusUpdate { status })
            .send()
            .await?;
        let trip: Trip = success(response).await?;
        tracing::debug!(id = %trip.id, status = %trip.status, "updated trip status");
        Ok(trip)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// A success response without an `access` token is a failure
    /// ([`ApiError::MissingToken`]), never a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.endpoint("api/user/login/")?;
        let response = self.http.post(url).json(&LoginRequest { email, password }).send().await?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        let body: LoginResponse = response.json().await?;
        match body.access {
            Some(token) => {
                tracing::debug!("login succeeded");
                Ok(Session::new(token))
            },
            None => Err(ApiError::MissingToken),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.config.base_url.join(path)?)
    }
}

/// Parse a 2xx response body, or classify the failure.
async fn success<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    Ok(response.json().await?)
}

/// Classify a non-2xx response into the error taxonomy.
async fn failure(response: Response) -> ApiError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }
    let body = response.text().await.unwrap_or_default();
    classify_failure(status.as_u16(), &body)
}

/// 4xx bodies shaped like a field map become [`ApiError::Validation`];
/// everything else stays [`ApiError::Unexpected`].
fn classify_failure(status: u16, body: &str) -> ApiError {
    if (400..500).contains(&status) {
        if let Ok(fields) = serde_json::from_str::<FieldErrors>(body) {
            if !fields.is_empty() {
                return ApiError::Validation(fields);
            }
        }
    }
    ApiError::Unexpected { status, body: body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ApiConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn endpoints_join_against_the_origin() {
        let client = client("http://localhost:8000");

        let list = client.endpoint("api/trip/").unwrap();
        assert_eq!(list.as_str(), "http://localhost:8000/api/trip/");

        let id = TripId::random();
        let update = client.endpoint(&format!("api/trip/{id}")).unwrap();
        assert!(update.path().starts_with("/api/trip/"));
        assert!(!update.path().ends_with('/'));
    }

    #[test]
    fn validation_bodies_become_field_maps() {
        let err = classify_failure(400, r#"{"email": ["This field is required."]}"#);
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields["email"], vec!["This field is required.".to_string()]);
            },
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_bodies_stay_unexpected() {
        assert!(matches!(
            classify_failure(400, "not json"),
            ApiError::Unexpected { status: 400, .. }
        ));
        assert!(matches!(classify_failure(400, "{}"), ApiError::Unexpected { .. }));

        // Field-shaped bodies on server errors are not validation failures
        assert!(matches!(
            classify_failure(500, r#"{"oops": ["server"]}"#),
            ApiError::Unexpected { status: 500, .. }
        ));
    }
}

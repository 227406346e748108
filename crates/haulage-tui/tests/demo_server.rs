//! End-to-end tests for the in-process demo server.
//!
//! The real `ApiClient` drives the demo server the same way the runtime
//! does, so these tests catch wire-format drift between the two.

use haulage_api::{ApiClient, ApiConfig, ApiError, WebSocketAnnouncer};
use haulage_core::{NewTrip, TripId, TripStatus, VehicleType, parse_pickup_time};
use haulage_tui::server;

async fn demo_client() -> (ApiClient, server::ServerHandle) {
    let handle = server::spawn().await.unwrap();
    let client = ApiClient::new(ApiConfig::new(handle.base_url.clone())).unwrap();
    (client, handle)
}

fn sample_draft() -> NewTrip {
    NewTrip {
        pickup_location: "12 Dock Road".to_string(),
        dropoff_location: "88 Mill Lane".to_string(),
        pickup_time: parse_pickup_time("2024-07-15T14:30").unwrap(),
        dropoff_contact_number: "5559876543".to_string(),
        load_description: "Greenhouse panels".to_string(),
        vehicle_type: VehicleType::Truck2,
    }
}

#[tokio::test]
async fn login_lists_and_advances_a_seeded_trip() {
    let (client, handle) = demo_client().await;

    let session = client.login("driver@demo.test", "wheels").await.unwrap();
    let trips = client.list_trips(&session).await.unwrap();
    assert_eq!(trips.len(), 3);
    assert!(trips.iter().all(|trip| trip.status == TripStatus::Pending));

    let id = trips[0].id;
    let updated = client.update_trip_status(id, TripStatus::Accepted, &session).await.unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.status, TripStatus::Accepted);

    let trips = client.list_trips(&session).await.unwrap();
    let accepted = trips.iter().find(|trip| trip.id == id).unwrap();
    assert_eq!(accepted.status, TripStatus::Accepted);

    handle.stop();
}

#[tokio::test]
async fn created_trip_comes_back_pending_with_the_submitted_fields() {
    let (client, handle) = demo_client().await;

    let draft = sample_draft();
    let trip = client.create_trip(&draft, None).await.unwrap();

    assert_eq!(trip.status, TripStatus::Pending);
    assert_eq!(trip.pickup_location, draft.pickup_location);
    assert_eq!(trip.dropoff_location, draft.dropoff_location);
    assert_eq!(trip.pickup_time, draft.pickup_time);
    assert_eq!(trip.vehicle_type, draft.vehicle_type);

    let session = client.login("requester@demo.test", "boxes").await.unwrap();
    let trips = client.list_trips(&session).await.unwrap();
    assert_eq!(trips.len(), 4);

    handle.stop();
}

#[tokio::test]
async fn unknown_trip_id_is_a_not_found_error() {
    let (client, handle) = demo_client().await;
    let session = client.login("driver@demo.test", "wheels").await.unwrap();

    let err = client
        .update_trip_status(TripId::random(), TripStatus::Accepted, &session)
        .await
        .unwrap_err();

    match err {
        ApiError::Unexpected { status, .. } => assert_eq!(status, 404),
        other => panic!("Expected not-found error, got {other:?}"),
    }

    handle.stop();
}

#[tokio::test]
async fn blank_credentials_come_back_as_field_errors() {
    let (client, handle) = demo_client().await;

    let err = client.login("", "").await.unwrap_err();
    match err {
        ApiError::Validation(field_errors) => {
            assert!(field_errors.contains_key("email"));
            assert!(field_errors.contains_key("password"));
        },
        other => panic!("Expected field errors, got {other:?}"),
    }

    handle.stop();
}

#[tokio::test]
async fn announce_endpoint_accepts_new_trip_frames() {
    use haulage_api::TripAnnouncer;

    let (_client, handle) = demo_client().await;

    let announcer = WebSocketAnnouncer::new(handle.announce_url.clone());
    announcer.announce(&sample_draft()).await.unwrap();

    handle.stop();
}

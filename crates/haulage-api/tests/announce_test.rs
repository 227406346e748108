//! Integration test for the websocket trip announcer.
//!
//! An in-process axum websocket endpoint captures the first text frame it
//! receives; the oracle check decodes it and verifies the `new_trip`
//! envelope.

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
    routing::get,
};
use haulage_api::{TripAnnouncer, WebSocketAnnouncer};
use haulage_core::{NewTrip, VehicleType, parse_pickup_time};
use tokio::sync::mpsc;
use url::Url;

async fn ws_handler(ws: WebSocketUpgrade, State(tx): State<mpsc::Sender<String>>) -> Response {
    ws.on_upgrade(move |socket| capture_first_text(socket, tx))
}

async fn capture_first_text(mut socket: WebSocket, tx: mpsc::Sender<String>) {
    while let Some(Ok(message)) = socket.recv().await {
        if let Message::Text(text) = message {
            let _ = tx.send(text).await;
            return;
        }
    }
}

#[tokio::test]
async fn announcer_sends_one_new_trip_frame() {
    let (tx, mut rx) = mpsc::channel(1);
    let app = Router::new().route("/ws", get(ws_handler)).with_state(tx);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let draft = NewTrip {
        pickup_location: "123 Main St".to_string(),
        dropoff_location: "456 Oak Ave".to_string(),
        pickup_time: parse_pickup_time("2024-03-05T09:30").unwrap(),
        dropoff_contact_number: "5551234567".to_string(),
        load_description: "Furniture".to_string(),
        vehicle_type: VehicleType::Van,
    };

    let endpoint = Url::parse(&format!("ws://{addr}/ws")).unwrap();
    WebSocketAnnouncer::new(endpoint).announce(&draft).await.unwrap();

    let raw = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
        .await
        .expect("frame should arrive before the timeout")
        .expect("capture channel should stay open");

    let frame: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(frame["event"], "new_trip");
    assert_eq!(frame["data"]["pickup_location"], "123 Main St");
    assert_eq!(frame["data"]["pickup_time"], "2024-03-05T09:30");
    assert_eq!(frame["data"]["vehicle_type"], "van");
}

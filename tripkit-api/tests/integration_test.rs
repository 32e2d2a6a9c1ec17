use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tripkit_alert::AlertDispatcher;
use tripkit_api::{app, state::AuthConfig, AppState};
use tripkit_catalog::{Catalog, CatalogData, PricingConfig, PricingEngine};
use tripkit_core::channel::UnconfiguredChannel;
use tripkit_core::location::NoLocation;
use tripkit_order::BookingDesk;
use tripkit_shared::Masked;
use tripkit_store::{MemoryAlertRepository, MemoryBookingHistoryRepository};

fn test_catalog() -> Catalog {
    let data: CatalogData = serde_json::from_value(json!({
        "distances": [
            {"city": "Pune", "origin": "Kothrud", "destination": "Baner", "distance_km": 8.0}
        ],
        "flights": [
            {"from_city": "Mumbai", "to_city": "Chennai", "distance_km": 1033.0,
             "duration": "02:00", "airline": "Vistara"}
        ],
        "events": [
            {"id": "e1", "name": "AR Rahman Live", "city": "Mumbai", "venue": "DY Patil Stadium",
             "artist": "AR Rahman", "genres": "festival", "popularity": "90"},
            {"id": "e2", "name": "Open Mic", "city": "Pune", "venue": "Comedy Pub",
             "artist": "", "genres": "comedy", "popularity": "", "price": 299}
        ]
    }))
    .unwrap();
    Catalog::from(data)
}

fn test_app() -> Router {
    let state = AppState {
        pricing: Arc::new(PricingEngine::new(test_catalog(), &PricingConfig::default())),
        desk: Arc::new(BookingDesk::new(Arc::new(MemoryBookingHistoryRepository::new()))),
        alerts: Arc::new(AlertDispatcher::new(
            Arc::new(UnconfiguredChannel::new("Twilio not configured")),
            Arc::new(MemoryAlertRepository::new()),
            Arc::new(NoLocation),
            Duration::from_secs(1),
        )),
        auth: AuthConfig {
            secret: Masked("test-secret".to_string()),
            expiration: 3600,
        },
    };
    app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn guest_token(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/v1/auth/guest", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session_id"].as_str().unwrap().starts_with("guest-"));
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_booking_routes_require_token() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/v1/booking/history", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/v1/booking/history", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_city_price_confirm_history_flow() {
    let app = test_app();
    let token = guest_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/city/price",
        Some(&token),
        Some(json!({
            "city": "Pune", "origin": "Baner", "dest_city": "Pune",
            "destination": "Kothrud", "vehicle_name": "MINI"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Reverse lookup: 8 km * 30 = 240, above the 80 minimum
    assert_eq!(body["pending"]["final_price"], json!(240.0));
    assert_eq!(body["pending"]["vehicle_label"], "🚙 MINI");
    assert_eq!(body["summary"]["type"], "City");
    assert_eq!(body["summary"]["text"][3], "Total Fare: ₹240.00");

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&token),
        Some(json!({"payment_mode": "UPI"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"]["payment_mode"], "UPI");

    let (status, body) = send(&app, Method::GET, "/v1/booking/history", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["final_price"], json!(240.0));

    // Slot is empty again
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "No pending booking.");
}

#[tokio::test]
async fn test_sessions_do_not_share_pending_bookings() {
    let app = test_app();
    let alice = guest_token(&app).await;
    let bob = guest_token(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/booking/flight/price",
        Some(&alice),
        Some(json!({"from_city": "Mumbai", "to_city": "Chennai"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&bob),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&alice),
        Some(json!({"payment_mode": "Card"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 4000 + 1033 * 3.5 = 7615.5, rounded half to even
    assert_eq!(body["saved"]["final_price"], json!(7616.0));
    assert_eq!(body["saved"]["vehicle_label"], "✈️ Flight");
}

#[tokio::test]
async fn test_pricing_errors_are_bad_requests() {
    let app = test_app();
    let token = guest_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/city/price",
        Some(&token),
        Some(json!({
            "city": "Pune", "origin": "Baner", "dest_city": "Pune",
            "destination": "Kothrud", "vehicle_name": "HELICOPTER"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid vehicle.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/city/price",
        Some(&token),
        Some(json!({"city": "Pune"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/flight/price",
        Some(&token),
        Some(json!({"from_city": "Chennai", "to_city": "Mumbai"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No direct flight from Chennai to Mumbai.");

    // Failed quotes never stage a booking
    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reference_data_routes() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/v1/booking/config", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicles"]["AUTO"]["fare_per_km"], json!(12.0));
    assert_eq!(body["states"]["Maharashtra"], json!(["Mumbai", "Pune"]));
    assert_eq!(body["flight_cities"], json!(["Chennai", "Mumbai"]));

    let (status, body) = send(
        &app,
        Method::GET,
        "/v1/booking/flight_info?from_city=Mumbai&to_city=Chennai",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], json!(true));
    assert_eq!(body["duration"], "2:00");

    let (_, body) = send(
        &app,
        Method::GET,
        "/v1/booking/flight_info?from_city=Mumbai",
        None,
        None,
    )
    .await;
    assert_eq!(body["available"], json!(false));
    assert_eq!(body["message"], "Select both cities to view flight details.");
}

#[tokio::test]
async fn test_events_listing_and_city_filter() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/v1/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], json!(2));

    let (_, body) = send(&app, Method::GET, "/v1/events?city=mumbai", None, None).await;
    assert_eq!(body["count"], json!(1));
    let event = &body["events"][0];
    assert_eq!(event["location"], "Mumbai - DY Patil Stadium");
    assert_eq!(event["price"], json!(7800.0));
    assert_eq!(event["category"], "Festival");
}

#[tokio::test]
async fn test_sos_queues_when_channel_unconfigured() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/sos",
        None,
        Some(json!({"latitude": 18.52, "longitude": 73.85})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
    assert_eq!(body["message"], "No internet/SMS failed. Saved offline.");

    let (_, body) = send(&app, Method::GET, "/v1/sos/status", None, None).await;
    assert_eq!(body["configured"], json!(false));
    assert_eq!(body["pending_count"], json!(1));

    // Still undeliverable, so nothing moves
    let (status, body) = send(&app, Method::POST, "/v1/sos/retry", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["retried"], json!(0));

    let (_, body) = send(&app, Method::GET, "/v1/sos/status", None, None).await;
    assert_eq!(body["pending_count"], json!(1));
}

#[tokio::test]
async fn test_sos_without_body() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/v1/sos", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
}

#[tokio::test]
async fn test_confirm_without_body_keeps_prior_payment_mode() {
    let app = test_app();
    let token = guest_token(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/booking/flight/price",
        Some(&token),
        Some(json!({"from_city": "Mumbai", "to_city": "Chennai"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/v1/booking/confirm", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"]["final_price"], json!(7616.0));
    assert_eq!(body["saved"]["payment_mode"], Value::Null);

    let (_, body) = send(&app, Method::GET, "/v1/booking/history", Some(&token), None).await;
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_payload_is_structured_bad_request() {
    let app = test_app();
    let token = guest_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/city/price",
        Some(&token),
        Some(json!({
            "city": "Pune", "origin": "Baner", "dest_city": "Pune",
            "destination": "Kothrud", "vehicle_name": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/booking/confirm",
        Some(&token),
        Some(json!({"payment_mode": ["UPI"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/sos",
        None,
        Some(json!({"latitude": "north"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

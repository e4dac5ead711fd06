//! End-to-end API tests over the assembled application.
//!
//! Exercises the same app factory the binary uses (routing, CORS, JSON error
//! handling, request logging), backed by fresh in-memory stores per test.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use serde_json::{Value, json};

use backend::domain::ports::AccountStore;
use backend::domain::{CredentialService, TokenSigner, TripService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{MemoryAccountStore, MemoryTripStore};
use backend::server::{AppDependencies, build_app};

fn deps() -> AppDependencies {
    let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
    let credentials = Arc::new(CredentialService::new(
        Arc::clone(&accounts),
        TokenSigner::new(b"trip-api-integration-tests"),
    ));
    let trips = Arc::new(TripService::new(Arc::new(MemoryTripStore::new())));

    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    AppDependencies {
        state: web::Data::new(HttpState::new(credentials, trips, accounts)),
        health,
        frontend_origin: Some("http://localhost:5173".to_owned()),
    }
}

async fn signup(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
    email: &str,
) -> Value {
    let request = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "username": username, "email": email, "password": "pw123456" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

fn token_of(session: &Value) -> String {
    session
        .get("token")
        .and_then(Value::as_str)
        .expect("session token")
        .to_owned()
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn signup_create_delete_list_happy_path() {
    let app = test::init_service(build_app(deps())).await;

    let session = signup(&app, "alice", "alice@x.com").await;
    let token = token_of(&session);

    let create = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header(bearer(&token))
        .set_json(json!({
            "title": "Coastal Run",
            "locations": [{ "name": "Pier", "latitude": 34.0, "longitude": -118.5 }]
        }))
        .to_request();
    let response = test::call_service(&app, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(response).await;
    let locations = created
        .get("locations")
        .and_then(Value::as_array)
        .expect("locations array");
    assert_eq!(locations.len(), 1);
    assert_eq!(
        locations[0].get("name").and_then(Value::as_str),
        Some("Pier")
    );
    let trip_id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("trip id")
        .to_owned();

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/trips/{trip_id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, delete).await.status(),
        StatusCode::OK
    );

    let list = test::TestRequest::get()
        .uri("/api/trips")
        .insert_header(bearer(&token))
        .to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, list).await).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn login_returns_the_registered_identity() {
    let app = test::init_service(build_app(deps())).await;
    let session = signup(&app, "alice", "alice@x.com").await;

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "alice@x.com", "password": "pw123456" }))
        .to_request();
    let response = test::call_service(&app, login).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("_id"), session.get("_id"));
    assert_eq!(body.get("username").and_then(Value::as_str), Some("alice"));
}

#[actix_web::test]
async fn a_foreign_delete_is_forbidden_and_changes_nothing() {
    let app = test::init_service(build_app(deps())).await;
    let alice = token_of(&signup(&app, "alice", "alice@x.com").await);
    let bob = token_of(&signup(&app, "bob", "bob@x.com").await);

    let create = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header(bearer(&alice))
        .set_json(json!({
            "title": "Coastal Run",
            "locations": [{ "name": "Pier", "latitude": 34.0, "longitude": -118.5 }]
        }))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, create).await).await;
    let trip_id = created
        .get("_id")
        .and_then(Value::as_str)
        .expect("trip id")
        .to_owned();

    let foreign_delete = test::TestRequest::delete()
        .uri(&format!("/api/trips/{trip_id}"))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(
        test::call_service(&app, foreign_delete).await.status(),
        StatusCode::FORBIDDEN
    );

    let list = test::TestRequest::get()
        .uri("/api/trips")
        .insert_header(bearer(&alice))
        .to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, list).await).await;
    let titles: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Coastal Run"]);
}

#[actix_web::test]
async fn trips_list_keeps_creation_order() {
    let app = test::init_service(build_app(deps())).await;
    let token = token_of(&signup(&app, "alice", "alice@x.com").await);

    for title in ["First", "Second", "Third"] {
        let create = test::TestRequest::post()
            .uri("/api/trips")
            .insert_header(bearer(&token))
            .set_json(json!({
                "title": title,
                "locations": [{ "name": "Pier", "latitude": 34.0, "longitude": -118.5 }]
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, create).await.status(),
            StatusCode::CREATED
        );
    }

    let list = test::TestRequest::get()
        .uri("/api/trips")
        .insert_header(bearer(&token))
        .to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, list).await).await;
    let titles: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[actix_web::test]
async fn malformed_json_bodies_use_the_error_envelope() {
    let app = test::init_service(build_app(deps())).await;

    let request = test::TestRequest::post()
        .uri("/api/auth/signup")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert!(body.get("error").and_then(Value::as_str).is_some());
    assert!(body.get("stack").is_some());
}

#[actix_web::test]
async fn unauthenticated_trip_requests_are_rejected() {
    let app = test::init_service(build_app(deps())).await;

    let list = test::TestRequest::get().uri("/api/trips").to_request();
    let response = test::call_service(&app, list).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("error").and_then(Value::as_str), Some("no token"));

    let create = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .set_json(json!({
            "title": "Coastal Run",
            "locations": [{ "name": "Pier", "latitude": 34.0, "longitude": -118.5 }]
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, create).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn health_probes_respond() {
    let app = test::init_service(build_app(deps())).await;

    for path in ["/health/live", "/health/ready"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

//! Guards de papel e rejeições que acontecem antes de qualquer acesso ao banco.

mod common;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use terrain_booking::models::auth::Role;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: Method, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _) = common::build_test_app();
    let response = app.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn client_route_without_token_is_401() {
    let (app, _) = common::build_test_app();
    let response = app
        .oneshot(get("/api/my-reservations", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Jeton d'authentification invalide ou absent."
    );
}

#[tokio::test]
async fn garbage_token_is_401() {
    let (app, _) = common::build_test_app();
    let response = app
        .oneshot(get("/admin/stats", Some("Bearer nao-e-um-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_header_is_401_json() {
    for header in ["Basic dXNlcjpwYXNz", "Bearer", "token abc"] {
        let (app, _) = common::build_test_app();
        let response = app
            .oneshot(get("/api/my-reservations", Some(header)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header: {}", header);
        assert_eq!(
            body_json(response).await["message"],
            "Jeton d'authentification invalide ou absent."
        );
    }
}

#[tokio::test]
async fn refresh_token_cannot_be_used_as_access() {
    let (app, state) = common::build_test_app();
    let auth = common::refresh_bearer_for(&state, Role::Client);
    let response = app
        .oneshot(get("/api/my-reservations", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_token_on_client_route_is_403() {
    let (app, state) = common::build_test_app();
    let auth = common::bearer_for(&state, Role::Admin);
    let response = app
        .oneshot(get("/api/my-reservations", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn client_token_on_owner_and_admin_routes_is_403() {
    let (app, state) = common::build_test_app();
    let auth = common::bearer_for(&state, Role::Client);

    let response = app
        .clone()
        .oneshot(get("/api/owners/dashboard-stats", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get("/admin/stats", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_token_cannot_delete_reservations() {
    let (app, state) = common::build_test_app();
    let auth = common::bearer_for(&state, Role::Owner);
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/reservations/5")
        .header(AUTHORIZATION, &auth)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn publishing_an_annonce_needs_a_client_token() {
    let (app, _) = common::build_test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/annonces",
            None,
            json!({ "terrainId": 1, "date": "2025-06-14T18:00:00", "nbrJoueur": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_method_on_shared_path_is_405() {
    let (app, _) = common::build_test_app();
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/complexes/1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn signup_with_short_password_is_400() {
    let (app, _) = common::build_test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/auth/client/signup",
            None,
            json!({ "email": "ana@example.com", "password": "123", "nom": "Ana" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn reservation_ending_before_start_is_400() {
    let (app, state) = common::build_test_app();
    let auth = common::bearer_for(&state, Role::Client);
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/reservations",
            Some(&auth),
            json!({
                "terrainId": 1,
                "date": "2025-06-14",
                "heureDebut": "16:00:00",
                "heureFin": "14:00:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

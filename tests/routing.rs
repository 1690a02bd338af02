//! Routing coverage over the production route table.
//!
//! Uses a lazy pool pointing at an unreachable address: requests that
//! reach a database-backed handler fail with 500, which distinguishes
//! "route exists and is guarded" (401 without a token, 500 with one)
//! from "route missing" (404) without needing a live database.

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use neighborhood_service::config::{
    AppConfig, AuthConfig, Config, CorsConfig, DatabaseConfig, ProfileConfig,
};
use neighborhood_service::routes;
use neighborhood_service::security::jwt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy("postgresql://127.0.0.1:1/unreachable")
        .unwrap()
}

fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_string(),
        },
        database: DatabaseConfig {
            url: "postgresql://127.0.0.1:1/unreachable".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "routing-test-secret".to_string(),
        },
        profile: ProfileConfig {
            required_fields: vec!["phone".to_string()],
        },
    }
}

macro_rules! test_app {
    () => {{
        jwt::initialize("routing-test-secret");
        test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(test_config()))
                .configure(routes::configure),
        )
        .await
    }};
}

// Middleware rejections surface as service errors rather than
// responses, so fold both into a status code.
macro_rules! status_of {
    ($app:expr, $req:expr) => {
        match test::try_call_service(&$app, $req).await {
            Ok(resp) => resp.status(),
            Err(err) => HttpResponse::from_error(err).status(),
        }
    };
}

fn bearer(user_id: Uuid, username: &str) -> (&'static str, String) {
    let token = jwt::issue_access_token(user_id, username).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

#[actix_rt::test]
async fn logout_route_is_reachable_behind_auth() {
    let app = test_app!();
    let user_id = Uuid::new_v4();
    let refresh = jwt::issue_refresh_token(user_id, "alice").unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(user_id, "alice"))
        .set_json(serde_json::json!({ "refresh": refresh }))
        .to_request();

    // The route must resolve past the public auth endpoints; the
    // revocation write then hits the unreachable database.
    let status = status_of!(app, req);
    assert_ne!(status, StatusCode::NOT_FOUND);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn delete_account_route_is_reachable_behind_auth() {
    let app = test_app!();

    let req = test::TestRequest::delete()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(Uuid::new_v4(), "alice"))
        .to_request();

    let status = status_of!(app, req);
    assert_ne!(status, StatusCode::NOT_FOUND);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn guarded_auth_routes_reject_missing_token() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(serde_json::json!({ "refresh": "x" }))
        .to_request();
    assert_eq!(status_of!(app, req), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete().uri("/api/v1/auth/me").to_request();
    assert_eq!(status_of!(app, req), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn public_auth_routes_skip_the_middleware() {
    let app = test_app!();

    // Invalid signup body fails validation before any database access,
    // proving the route is reachable without a token.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(serde_json::json!({ "username": "ab", "password": "short" }))
        .to_request();
    assert_eq!(status_of!(app, req), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn entity_routes_require_a_token() {
    let app = test_app!();

    for uri in [
        "/api/v1/posts",
        "/api/v1/events",
        "/api/v1/volunteers",
        "/api/v1/neighbors",
        "/api/v1/my-profile",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_eq!(status_of!(app, req), StatusCode::UNAUTHORIZED, "GET {uri}");
    }
}

#[actix_rt::test]
async fn entity_routes_resolve_with_a_token() {
    let app = test_app!();
    let header = bearer(Uuid::new_v4(), "alice");

    for uri in [
        "/api/v1/posts",
        "/api/v1/events",
        "/api/v1/volunteers",
        "/api/v1/neighbors",
        "/api/v1/my-profile",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(header.clone())
            .to_request();
        // Reaches the handler, then fails on the unreachable database.
        assert_eq!(
            status_of!(app, req),
            StatusCode::INTERNAL_SERVER_ERROR,
            "GET {uri}"
        );
    }
}

#[actix_rt::test]
async fn join_event_route_resolves_with_a_token() {
    let app = test_app!();
    let event_id = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/join-event/{event_id}"))
        .insert_header(bearer(Uuid::new_v4(), "alice"))
        .to_request();

    let status = status_of!(app, req);
    assert_ne!(status, StatusCode::NOT_FOUND);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn unknown_paths_are_not_found() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/unknown")
        .insert_header(bearer(Uuid::new_v4(), "alice"))
        .to_request();
    assert_eq!(status_of!(app, req), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn health_is_public() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/health/live")
        .to_request();
    assert_eq!(status_of!(app, req), StatusCode::OK);
}

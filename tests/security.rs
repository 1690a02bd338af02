//! Authentication and authorization behavior through the public API,
//! no database required.

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use neighborhood_service::models::Post;
use neighborhood_service::security::jwt;
use neighborhood_service::security::ownership::ensure_can_modify;
use neighborhood_service::AppError;
use uuid::Uuid;

fn sample_post(owner: Uuid) -> Post {
    Post {
        id: Uuid::new_v4(),
        profile_id: Uuid::new_v4(),
        created_by_user_id: owner,
        created_by: "alice".to_string(),
        title: "Street cleanup".to_string(),
        content: "Saturday at ten.".to_string(),
        image_url: None,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn access_token_authenticates_and_refresh_does_not() {
    jwt::initialize("integration-test-secret");

    let user_id = Uuid::new_v4();
    let access = jwt::issue_access_token(user_id, "alice").unwrap();
    let refresh = jwt::issue_refresh_token(user_id, "alice").unwrap();

    let claims = jwt::validate_token_of_type(&access, jwt::TOKEN_TYPE_ACCESS).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.username, "alice");

    // A refresh token must never pass as an access token, and vice versa.
    assert!(jwt::validate_token_of_type(&refresh, jwt::TOKEN_TYPE_ACCESS).is_err());
    assert!(jwt::validate_token_of_type(&access, jwt::TOKEN_TYPE_REFRESH).is_err());
}

#[test]
fn token_pair_carries_distinct_jtis() {
    jwt::initialize("integration-test-secret");

    let user_id = Uuid::new_v4();
    let access = jwt::issue_access_token(user_id, "bob").unwrap();
    let refresh = jwt::issue_refresh_token(user_id, "bob").unwrap();

    let a = jwt::validate_token_of_type(&access, jwt::TOKEN_TYPE_ACCESS).unwrap();
    let r = jwt::validate_token_of_type(&refresh, jwt::TOKEN_TYPE_REFRESH).unwrap();

    // Revoking one token by jti must not revoke the other.
    assert_ne!(a.jti, r.jti);
}

#[test]
fn only_the_creator_may_modify_a_post() {
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let post = sample_post(owner);

    assert!(ensure_can_modify(owner, &post).is_ok());

    let err = ensure_can_modify(stranger, &post).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    assert!(err.to_string().contains("your own post"));
}

#[test]
fn error_envelope_statuses() {
    let cases = [
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
        (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
        (AppError::Conflict("x".into()), StatusCode::CONFLICT),
        (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
    ];

    for (err, status) in cases {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_response().status(), status);
    }
}

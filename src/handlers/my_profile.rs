/// My-profile handlers - the caller's own profile bundle and updates
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::services::profiles::UpdateProfileFields;
use crate::services::ProfileService;
use crate::validators;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 10))]
    pub house_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub street: Option<String>,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(min = 1, max = 15))]
    pub phone: Option<String>,

    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

/// The caller's own bundle: profile, posts, created events, joined
/// events and the `profile_complete` flag.
/// GET /api/v1/my-profile
pub async fn get_my_profile(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    let bundle = service
        .my_bundle(user.id, &config.profile.required_fields)
        .await?;

    Ok(HttpResponse::Ok().json(bundle))
}

/// Partial update of the caller's own profile. Absent fields keep
/// their prior values.
/// PUT /api/v1/my-profile
pub async fn update_my_profile(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    if let Some(phone) = req.phone.as_deref() {
        if !validators::validate_phone(phone) {
            return Err(AppError::Validation("invalid phone number".to_string()));
        }
    }

    let fields = UpdateProfileFields {
        house_number: req.house_number.clone(),
        street: req.street.clone(),
        postal_code: req.postal_code.clone(),
        phone: req.phone.clone(),
        bio: req.bio.clone(),
    };

    let service = ProfileService::new((**pool).clone());
    let profile = service.update_my(user.id, &fields).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_body_leaves_other_fields_unset() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"phone": "555-1000", "bio": "hi"}"#).unwrap();

        assert_eq!(req.phone.as_deref(), Some("555-1000"));
        assert_eq!(req.bio.as_deref(), Some("hi"));
        assert!(req.house_number.is_none());
        assert!(req.street.is_none());
        assert!(req.postal_code.is_none());
        assert!(req.validate().is_ok());
    }
}

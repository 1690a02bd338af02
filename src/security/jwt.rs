/// JWT issuance and validation
///
/// Single-service deployment: both issuance and validation happen here,
/// so tokens are signed with HS256 and a shared secret loaded once at
/// startup. Access tokens authenticate API requests; refresh tokens are
/// exchanged for new access tokens and can be revoked at logout (the
/// revocation list lives in the database, keyed by `jti`).
use crate::error::{AppError, Result};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Access token lifetime: 15 minutes
pub const ACCESS_TOKEN_TTL_SECS: i64 = 900;

/// Refresh token lifetime: 7 days
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims: standard fields plus the username (used for the
/// volunteer name match) and a token type discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    /// "access" or "refresh"
    pub token_type: String,
    /// Token id, referenced by the revocation list
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("invalid subject claim".to_string()))
    }
}

struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

static KEYS: OnceCell<JwtKeys> = OnceCell::new();

/// Install the signing secret. Safe to call more than once; later calls
/// are ignored so tests can initialize freely.
pub fn initialize(secret: &str) {
    let _ = KEYS.set(JwtKeys {
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
    });
}

fn keys() -> Result<&'static JwtKeys> {
    KEYS.get()
        .ok_or_else(|| AppError::Internal("JWT keys not initialized".to_string()))
}

fn issue_token(user_id: Uuid, username: &str, token_type: &str, ttl_secs: i64) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        token_type: token_type.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, &keys()?.encoding)
        .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))
}

/// Issue a short-lived access token
pub fn issue_access_token(user_id: Uuid, username: &str) -> Result<String> {
    issue_token(user_id, username, TOKEN_TYPE_ACCESS, ACCESS_TOKEN_TTL_SECS)
}

/// Issue a refresh token
pub fn issue_refresh_token(user_id: Uuid, username: &str) -> Result<String> {
    issue_token(
        user_id,
        username,
        TOKEN_TYPE_REFRESH,
        REFRESH_TOKEN_TTL_SECS,
    )
}

/// Validate signature and expiry; returns the decoded claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(token, &keys()?.decoding, &validation)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))
}

/// Validate a token and require a specific token type.
pub fn validate_token_of_type(token: &str, token_type: &str) -> Result<Claims> {
    let data = validate_token(token)?;
    if data.claims.token_type != token_type {
        return Err(AppError::Unauthorized(format!(
            "expected a {} token",
            token_type
        )));
    }
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        initialize("test-secret");
    }

    #[test]
    fn access_token_round_trip() {
        init();
        let user_id = Uuid::new_v4();
        let token = issue_access_token(user_id, "alice").unwrap();
        let claims = validate_token_of_type(&token, TOKEN_TYPE_ACCESS).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.username, "alice");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        init();
        let token = issue_refresh_token(Uuid::new_v4(), "bob").unwrap();

        assert!(validate_token_of_type(&token, TOKEN_TYPE_ACCESS).is_err());
        assert!(validate_token_of_type(&token, TOKEN_TYPE_REFRESH).is_ok());
    }

    #[test]
    fn tampered_token_is_rejected() {
        init();
        let token = issue_access_token(Uuid::new_v4(), "mallory").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('a') { 'b' } else { 'a' });

        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        init();
        assert!(validate_token("not-a-token").is_err());
    }
}

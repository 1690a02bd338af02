/// Configuration management for neighborhood-service
///
/// Loads configuration from environment variables with development
/// defaults. Production deployments must set the JWT secret explicitly.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub profile: ProfileConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for access and refresh tokens
    pub jwt_secret: String,
}

/// Profile completeness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Profile fields that must be non-empty for `profile_complete`.
    /// Names must match neighbor profile columns; unknown names count
    /// as incomplete and are logged at startup.
    pub required_fields: Vec<String>,
}

/// Default required-field set. The upstream checklist drifted from the
/// actual profile schema; this is the reconciled list of columns that
/// exist on a neighbor profile.
pub const DEFAULT_PROFILE_REQUIRED_FIELDS: &[&str] = &["phone", "street", "postal_code"];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(value) if !value.trim().is_empty() => value,
            _ if app_env.eq_ignore_ascii_case("production") => {
                anyhow::bail!("JWT_SECRET must be set in production");
            }
            _ => "dev-only-insecure-secret".to_string(),
        };

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if app_env.eq_ignore_ascii_case("production") => {
                anyhow::bail!("CORS_ALLOWED_ORIGINS must be set in production");
            }
            Err(_) => "http://localhost:3000".to_string(),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/neighborhood".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig { jwt_secret },
            profile: ProfileConfig {
                required_fields: parse_required_fields(),
            },
        })
    }
}

fn parse_required_fields() -> Vec<String> {
    match std::env::var("PROFILE_REQUIRED_FIELDS") {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => DEFAULT_PROFILE_REQUIRED_FIELDS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_required_fields_name_real_columns() {
        // Guard against the checklist drifting from the schema again.
        let columns = ["house_number", "street", "postal_code", "phone", "bio"];
        for field in DEFAULT_PROFILE_REQUIRED_FIELDS {
            assert!(columns.contains(field), "unknown profile field: {field}");
        }
    }
}

/// Neighborhood Service Library
///
/// Backend for a neighborhood social platform: neighbor profiles, posts,
/// events and volunteer participation behind a JSON HTTP API.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: the HTTP route table
/// - `models`: Data structures for profiles, posts, events, volunteers
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: HTTP middleware for authentication
/// - `security`: Tokens, password hashing, ownership checks
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};

/// Security utilities: token issuance/validation, password hashing,
/// and the resource ownership guard.
pub mod jwt;
pub mod ownership;
pub mod password;

/// Business logic layer
///
/// Services own the decision logic: ownership checks before writes, the
/// aggregate profile bundles, and the idempotent join-event workflow.
/// Handlers stay thin; repositories stay dumb.
pub mod auth;
pub mod events;
pub mod posts;
pub mod profiles;
pub mod volunteers;

pub use auth::AuthService;
pub use events::EventService;
pub use posts::PostService;
pub use profiles::ProfileService;
pub use volunteers::VolunteerService;

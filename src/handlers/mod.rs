/// HTTP request handlers - thin request/response mapping over the
/// service layer.
pub mod auth;
pub mod events;
pub mod health;
pub mod my_profile;
pub mod neighbors;
pub mod posts;
pub mod volunteers;

pub use auth::*;
pub use events::*;
pub use health::*;
pub use my_profile::*;
pub use neighbors::*;
pub use posts::*;
pub use volunteers::*;

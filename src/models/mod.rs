/// Data models for neighborhood-service
pub mod event;
pub mod post;
pub mod profile;
pub mod user;
pub mod volunteer;

pub use event::{Event, EventVolunteer, EventWithVolunteers};
pub use post::Post;
pub use profile::{NeighborProfile, ProfileBundle};
pub use user::User;
pub use volunteer::Volunteer;

//! Dream journal and account domain module

mod auth;
mod dream;
mod profile;

pub use auth::{AuthSession, AuthUser};
pub use dream::{Dream, DreamStatus, DreamUpdate, InputType, NewDream};
pub use profile::{Profile, ProfileUpdate, SubscriptionTier};

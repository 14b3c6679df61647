//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    refresh_session::{OwnedRefreshSession, RefreshSession, SessionState},
    user::{User, UserProfile},
};
pub use repository::{RefreshSessionRepository, UserRepository};

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every method fails only with infrastructure errors, except
//! [`UserRepository::create`], which reports a duplicate email as
//! `AuthError::EmailExists`.

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    refresh_session::{OwnedRefreshSession, RefreshSession},
    user::User,
};
use crate::domain::value_object::{email::Email, refresh_token::RefreshToken, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A duplicate email is `AuthError::EmailExists`,
    /// even when it loses a race with a concurrent insert.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}

/// Refresh session repository trait
#[trait_variant::make(RefreshSessionRepository: Send)]
pub trait LocalRefreshSessionRepository {
    /// Create a new session
    async fn create(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Find a session by token, together with its owner
    async fn find_by_token(&self, token: &RefreshToken)
    -> AuthResult<Option<OwnedRefreshSession>>;

    /// Find all sessions for a user, newest first
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<RefreshSession>>;

    /// Atomically consume `consumed` and persist `replacement`.
    ///
    /// Returns `false` (and inserts nothing) when `consumed` no longer
    /// exists, e.g. because a concurrent rotation already took it.
    async fn rotate(&self, consumed: &RefreshToken, replacement: &RefreshSession)
    -> AuthResult<bool>;

    /// Delete one session. Returns whether it existed.
    async fn delete(&self, token: &RefreshToken) -> AuthResult<bool>;

    /// Delete all sessions for a user. Idempotent.
    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Delete sessions created strictly before `cutoff`
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}

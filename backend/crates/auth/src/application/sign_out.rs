//! Sign Out Use Case
//!
//! Ends every refresh session of a user.

use std::sync::Arc;

use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete all sessions of `user_id`. Succeeds when there are none, and
    /// does not check that the user exists.
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = self.session_repo.delete_all_for_user(user_id).await?;

        tracing::info!(user_id = %user_id, deleted = deleted, "User signed out");

        Ok(deleted)
    }
}

//! Session Cleanup Use Case
//!
//! Removes refresh sessions that are already past their lifetime. Such
//! sessions can never be refreshed again, so deleting them changes nothing
//! a client can observe.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::domain::repository::RefreshSessionRepository;
use crate::error::AuthResult;

pub struct SessionCleanupUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionCleanupUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self) -> AuthResult<u64> {
        self.execute_at(Utc::now()).await
    }

    /// Delete sessions that are expired as of `now`
    pub async fn execute_at(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let cutoff = now - self.config.refresh_token_lifetime();
        let deleted = self.session_repo.delete_created_before(cutoff).await?;

        if deleted > 0 {
            tracing::info!(sessions_deleted = deleted, "Cleaned up expired refresh sessions");
        }

        Ok(deleted)
    }
}

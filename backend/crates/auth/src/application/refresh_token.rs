//! Refresh Token Use Case
//!
//! Exchanges a live refresh token for a new access token and a new refresh
//! token. The presented token is consumed: it can succeed at most once.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::refresh_session::{OwnedRefreshSession, RefreshSession};
use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<S> RefreshTokenUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<RefreshTokenOutput> {
        if token.is_empty() {
            return Err(AuthError::RefreshTokenNotFound);
        }
        let presented = RefreshToken::from_raw(token);

        let Some(OwnedRefreshSession { session, owner }) =
            self.session_repo.find_by_token(&presented).await?
        else {
            return Err(AuthError::RefreshTokenNotFound);
        };

        // Expired rows are left for the sweep
        if session.is_expired_at(Utc::now(), self.config.refresh_token_lifetime()) {
            tracing::warn!(
                session_id = %session.session_id,
                user_id = %owner.user_id,
                "Refresh rejected: session expired"
            );
            return Err(AuthError::RefreshTokenExpired);
        }

        let access_token = self.tokens.issue_access_token(&owner)?;
        let replacement = RefreshSession::new(owner.user_id, self.tokens.generate_refresh_token());

        if !self
            .session_repo
            .rotate(&session.token, &replacement)
            .await?
        {
            // Lost the race against another refresh of the same token
            tracing::warn!(
                session_id = %session.session_id,
                "Refresh rejected: session already consumed"
            );
            return Err(AuthError::RefreshTokenNotFound);
        }

        tracing::info!(
            user_id = %owner.user_id,
            consumed = %session.session_id,
            session_id = %replacement.session_id,
            "Refresh session rotated"
        );

        Ok(RefreshTokenOutput {
            access_token,
            refresh_token: replacement.token.into_string(),
        })
    }
}

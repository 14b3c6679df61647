//! Sign In Use Case
//!
//! Verifies credentials and opens a refresh session.

use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::application::validation::Violations;
use crate::domain::entity::{refresh_session::RefreshSession, user::UserProfile};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    tokens: Arc<TokenIssuer>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            user_repo,
            session_repo,
            tokens,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let mut violations = Violations::default();
        let email = violations.check(Email::new(input.email));
        let password = violations.check(RawPassword::new(input.password));

        let (Some(email), Some(password)) = (email, password) else {
            return Err(violations.into_error());
        };

        // Unknown email and wrong password are reported identically
        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::warn!("Sign-in failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || stored.verify(&password)).await?;
        if !verified {
            tracing::warn!(user_id = %user.user_id, "Sign-in failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access_token(&user)?;
        let session = RefreshSession::new(user.user_id, self.tokens.generate_refresh_token());
        RefreshSessionRepository::create(&*self.session_repo, &session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            access_token,
            refresh_token: session.token.into_string(),
            user: user.profile(),
        })
    }
}

//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    user_password::{RawPassword, UserPassword},
};
use crate::application::validation::Violations;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<UserProfile> {
        let mut violations = Violations::default();
        let email = violations.check(Email::new(input.email));
        let password = violations.check(RawPassword::for_sign_up(input.password));
        let first_name = violations.check(PersonName::first(input.first_name));
        let last_name = violations.check(PersonName::last(input.last_name));

        let (Some(email), Some(password), Some(first_name), Some(last_name)) =
            (email, password, first_name, last_name)
        else {
            return Err(violations.into_error());
        };

        // Fast path only; the store's unique constraint is the real guard
        if self.user_repo.find_by_email(&email).await?.is_some() {
            tracing::debug!("Sign-up rejected: email already registered");
            return Err(AuthError::EmailExists);
        }

        let password_hash = tokio::task::spawn_blocking(move || UserPassword::from_raw(&password))
            .await?
            .map_err(|e| AuthError::Internal(e.message().to_owned()))?;

        let user = User::new(email, first_name, last_name, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(user.profile())
    }
}

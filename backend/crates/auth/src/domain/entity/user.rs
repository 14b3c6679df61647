//! User Entity
//!
//! A registered account. Created on sign-up and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::{
    email::Email, person_name::PersonName, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Argon2id hash; never leaves the crate through a projection
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        password_hash: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            first_name,
            last_name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Public projection, safe to return to clients
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            first_name: self.first_name.as_str().to_owned(),
            last_name: self.last_name.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
            display_name: self.display_name(),
        }
    }
}

/// The subset of a user that may leave the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip)]
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            Email::new("a@x.com").unwrap(),
            PersonName::first("User").unwrap(),
            PersonName::last("Test").unwrap(),
            UserPassword::from_db("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0"),
        )
    }

    #[test]
    fn test_new_user_timestamps() {
        let user = sample();
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_profile_has_no_hash() {
        let user = sample();
        let profile = user.profile();
        assert_eq!(profile.display_name, "User Test");
        assert_eq!(profile.user_id, user.user_id);

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.to_lowercase().contains("password"));
    }
}

//! In-memory Repository Implementation
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! kept in process maps. Used by the test suite and for running the router
//! without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{
    refresh_session::{OwnedRefreshSession, RefreshSession},
    user::User,
};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, refresh_token::RefreshToken, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// Keyed by token string
    sessions: HashMap<String, RefreshSession>,
}

/// In-memory auth repository
///
/// Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.tables.write().await;

        // Checked under the write lock, so concurrent inserts cannot both pass
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailExists);
        }
        tables.users.insert(user.user_id, user.clone());

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| &u.email == email).cloned())
    }
}

impl RefreshSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &RefreshSession) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        insert_session(&mut tables, session)
    }

    async fn find_by_token(
        &self,
        token: &RefreshToken,
    ) -> AuthResult<Option<OwnedRefreshSession>> {
        let tables = self.tables.read().await;

        let Some(session) = tables.sessions.get(token.as_str()) else {
            return Ok(None);
        };
        let Some(owner) = tables.users.get(&session.user_id) else {
            return Ok(None);
        };

        Ok(Some(OwnedRefreshSession {
            session: session.clone(),
            owner: owner.clone(),
        }))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<RefreshSession>> {
        let tables = self.tables.read().await;

        let mut sessions: Vec<RefreshSession> = tables
            .sessions
            .values()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(sessions)
    }

    async fn rotate(
        &self,
        consumed: &RefreshToken,
        replacement: &RefreshSession,
    ) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.sessions.remove(consumed.as_str()).is_none() {
            return Ok(false);
        }
        insert_session(&mut tables, replacement)?;

        Ok(true)
    }

    async fn delete(&self, token: &RefreshToken) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.sessions.remove(token.as_str()).is_some())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;

        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| &s.user_id != user_id);

        Ok((before - tables.sessions.len()) as u64)
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut tables = self.tables.write().await;

        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.created_at >= cutoff);

        Ok((before - tables.sessions.len()) as u64)
    }
}

/// Mirrors the foreign key and the unique token constraint
fn insert_session(tables: &mut Tables, session: &RefreshSession) -> AuthResult<()> {
    if !tables.users.contains_key(&session.user_id) {
        return Err(AuthError::Internal(format!(
            "Session owner {} does not exist",
            session.user_id
        )));
    }
    if tables.sessions.contains_key(session.token.as_str()) {
        return Err(AuthError::Internal("Duplicate refresh token".to_owned()));
    }

    tables
        .sessions
        .insert(session.token.as_str().to_owned(), session.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        person_name::PersonName, user_password::UserPassword,
    };
    use chrono::Duration;

    fn user(email: &str) -> User {
        User::new(
            Email::new(email).unwrap(),
            PersonName::first("User").unwrap(),
            PersonName::last("Test").unwrap(),
            UserPassword::from_db("hash"),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAuthRepository::new();
        UserRepository::create(&repo, &user("a@x.com")).await.unwrap();

        let err = UserRepository::create(&repo, &user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailExists));

        // Case sensitive
        UserRepository::create(&repo, &user("A@x.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_session_requires_owner() {
        let repo = InMemoryAuthRepository::new();
        let orphan = RefreshSession::new(UserId::new(), RefreshToken::generate(20));
        assert!(RefreshSessionRepository::create(&repo, &orphan).await.is_err());
    }

    #[tokio::test]
    async fn test_rotate_is_single_use() {
        let repo = InMemoryAuthRepository::new();
        let owner = user("a@x.com");
        UserRepository::create(&repo, &owner).await.unwrap();

        let first = RefreshSession::new(owner.user_id, RefreshToken::generate(20));
        RefreshSessionRepository::create(&repo, &first).await.unwrap();

        let second = RefreshSession::new(owner.user_id, RefreshToken::generate(20));
        assert!(repo.rotate(&first.token, &second).await.unwrap());

        let third = RefreshSession::new(owner.user_id, RefreshToken::generate(20));
        assert!(!repo.rotate(&first.token, &third).await.unwrap());
        assert!(repo.find_by_token(&third.token).await.unwrap().is_none());
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_created_before() {
        let repo = InMemoryAuthRepository::new();
        let owner = user("a@x.com");
        UserRepository::create(&repo, &owner).await.unwrap();

        let now = Utc::now();
        let old = RefreshSession::issued_at(
            owner.user_id,
            RefreshToken::generate(20),
            now - Duration::days(40),
        );
        let fresh = RefreshSession::issued_at(owner.user_id, RefreshToken::generate(20), now);
        RefreshSessionRepository::create(&repo, &old).await.unwrap();
        RefreshSessionRepository::create(&repo, &fresh).await.unwrap();

        let deleted = repo
            .delete_created_before(now - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let remaining = repo.find_by_user_id(&owner.user_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].token, fresh.token);
    }

    #[tokio::test]
    async fn test_delete_single_session() {
        let repo = InMemoryAuthRepository::new();
        let owner = user("a@x.com");
        UserRepository::create(&repo, &owner).await.unwrap();

        let session = RefreshSession::new(owner.user_id, RefreshToken::generate(20));
        RefreshSessionRepository::create(&repo, &session).await.unwrap();

        assert!(repo.delete(&session.token).await.unwrap());
        assert!(!repo.delete(&session.token).await.unwrap());
    }
}

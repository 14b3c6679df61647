//! Refresh Session Entity
//!
//! Binds one refresh token to one user. There is no expiry column: the
//! session is alive while its age is within the configured lifetime, and is
//! consumed by deleting it.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    refresh_token::RefreshToken, session_id::RefreshSessionId, user_id::UserId,
};

/// Refresh session entity
#[derive(Debug, Clone)]
pub struct RefreshSession {
    pub session_id: RefreshSessionId,
    pub user_id: UserId,
    pub token: RefreshToken,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Liveness of a session at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
}

impl RefreshSession {
    /// Create a new session for `user_id`, issued now
    pub fn new(user_id: UserId, token: RefreshToken) -> Self {
        Self::issued_at(user_id, token, Utc::now())
    }

    /// Create a session with an explicit issue instant
    pub fn issued_at(user_id: UserId, token: RefreshToken, at: DateTime<Utc>) -> Self {
        Self {
            session_id: RefreshSessionId::new(),
            user_id,
            token,
            created_at: at,
            updated_at: at,
        }
    }

    /// A session exactly `lifetime` old is still active.
    pub fn state_at(&self, now: DateTime<Utc>, lifetime: Duration) -> SessionState {
        if now - self.created_at > lifetime {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        self.state_at(now, lifetime) == SessionState::Expired
    }
}

/// A session together with its owning user, as returned by a token lookup
#[derive(Debug, Clone)]
pub struct OwnedRefreshSession {
    pub session: RefreshSession,
    pub owner: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_created(ago: Duration, now: DateTime<Utc>) -> RefreshSession {
        RefreshSession::issued_at(UserId::new(), RefreshToken::generate(20), now - ago)
    }

    #[test]
    fn test_fresh_session_is_active() {
        let now = Utc::now();
        let session = session_created(Duration::zero(), now);
        assert_eq!(session.state_at(now, Duration::days(30)), SessionState::Active);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let now = Utc::now();
        let lifetime = Duration::days(30);

        let at_limit = session_created(lifetime, now);
        assert!(!at_limit.is_expired_at(now, lifetime));

        let past_limit = session_created(lifetime + Duration::seconds(1), now);
        assert!(past_limit.is_expired_at(now, lifetime));
    }

    #[test]
    fn test_forty_days_exceeds_thirty_day_lifetime() {
        let now = Utc::now();
        let session = session_created(Duration::days(40), now);
        assert_eq!(session.state_at(now, Duration::days(30)), SessionState::Expired);
    }

    #[test]
    fn test_new_session_timestamps() {
        let session = RefreshSession::new(UserId::new(), RefreshToken::generate(20));
        assert_eq!(session.created_at, session.updated_at);
    }
}

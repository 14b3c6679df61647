//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    refresh_session::{OwnedRefreshSession, RefreshSession},
    user::User,
};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, person_name::PersonName, refresh_token::RefreshToken,
    session_id::RefreshSessionId, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // users_email_key; a concurrent sign-up won the race
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailExists,
            other => AuthError::Database(other),
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                first_name,
                last_name,
                email,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }
}

// ============================================================================
// Refresh Session Repository Implementation
// ============================================================================

impl RefreshSessionRepository for PgAuthRepository {
    async fn create(&self, session: &RefreshSession) -> AuthResult<()> {
        insert_session(&self.pool, session).await?;
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &RefreshToken,
    ) -> AuthResult<Option<OwnedRefreshSession>> {
        let row = sqlx::query_as::<_, OwnedSessionRow>(
            r#"
            SELECT
                s.session_id,
                s.token,
                s.user_id,
                s.created_at,
                s.updated_at,
                u.first_name,
                u.last_name,
                u.email,
                u.password_hash,
                u.created_at AS user_created_at,
                u.updated_at AS user_updated_at
            FROM refresh_sessions s
            JOIN users u ON u.user_id = s.user_id
            WHERE s.token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OwnedSessionRow::into_owned_session))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<RefreshSession>> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                token,
                user_id,
                created_at,
                updated_at
            FROM refresh_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SessionRow::into_session).collect())
    }

    async fn rotate(
        &self,
        consumed: &RefreshToken,
        replacement: &RefreshSession,
    ) -> AuthResult<bool> {
        let mut tx = self.pool.begin().await?;

        // A concurrent rotation of the same token blocks on the row lock and
        // then sees zero affected rows.
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE token = $1")
            .bind(consumed.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        insert_session(&mut *tx, replacement).await?;
        tx.commit().await?;

        Ok(true)
    }

    async fn delete(&self, token: &RefreshToken) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

async fn insert_session<'e, E>(executor: E, session: &RefreshSession) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO refresh_sessions (
            session_id,
            token,
            user_id,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(session.session_id.as_uuid())
    .bind(session.token.as_str())
    .bind(session.user_id.as_uuid())
    .bind(session.created_at)
    .bind(session.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            password_hash: UserPassword::from_db(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    token: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> RefreshSession {
        RefreshSession {
            session_id: RefreshSessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            token: RefreshToken::from_raw(self.token),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnedSessionRow {
    #[sqlx(flatten)]
    session: SessionRow,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    user_created_at: DateTime<Utc>,
    user_updated_at: DateTime<Utc>,
}

impl OwnedSessionRow {
    fn into_owned_session(self) -> OwnedRefreshSession {
        let owner = UserRow {
            user_id: self.session.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.user_created_at,
            updated_at: self.user_updated_at,
        }
        .into_user();

        OwnedRefreshSession {
            session: self.session.into_session(),
            owner,
        }
    }
}

//! Token Issuance
//!
//! Access tokens are HS256 JWTs carrying the user id and email. Refresh
//! tokens are opaque random strings; see [`RefreshToken`].

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{refresh_token::RefreshToken, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Claims embedded in an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id (UUID string)
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    /// Typed user id from `sub`
    pub fn user_id(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::Unauthenticated)
    }
}

/// Signs and verifies access tokens, mints refresh tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: chrono::Duration,
    refresh_token_bytes: usize,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&config.signing_key),
            decoding: DecodingKey::from_secret(&config.signing_key),
            access_ttl: chrono::Duration::seconds(config.access_token_ttl_secs()),
            refresh_token_bytes: config.refresh_token_bytes,
        }
    }

    /// Sign an access token for `user`, valid from now
    pub fn issue_access_token(&self, user: &User) -> AuthResult<String> {
        self.issue_access_token_at(user, Utc::now())
    }

    pub fn issue_access_token_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = AccessClaims {
            sub: user.user_id.to_string(),
            email: user.email.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify signature and expiry.
    ///
    /// Any failure is `Unauthenticated`; the reason is only logged.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        let validation = Validation::new(Algorithm::HS256);

        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::Unauthenticated
            })
    }

    pub fn generate_refresh_token(&self) -> RefreshToken {
        RefreshToken::generate(self.refresh_token_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email, person_name::PersonName, user_password::UserPassword,
    };

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn issuer(key: &str) -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::new(key).unwrap())
    }

    fn user() -> User {
        User::new(
            Email::new("a@x.com").unwrap(),
            PersonName::first("User").unwrap(),
            PersonName::last("Test").unwrap(),
            UserPassword::from_db("unused"),
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let issuer = issuer(KEY);
        let user = user();
        let token = issuer.issue_access_token(&user).unwrap();

        let claims = issuer.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_access_token_rejected() {
        let issuer = issuer(KEY);
        let token = issuer
            .issue_access_token_at(&user(), Utc::now() - chrono::Duration::hours(3))
            .unwrap();
        assert!(matches!(
            issuer.verify_access_token(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_foreign_key_rejected() {
        let token = issuer(KEY).issue_access_token(&user()).unwrap();
        let other = issuer("fedcba9876543210fedcba9876543210");
        assert!(other.verify_access_token(&token).is_err());
        assert!(other.verify_access_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_refresh_tokens_use_configured_length() {
        let token = issuer(KEY).generate_refresh_token();
        assert_eq!(token.as_str().len(), 40);
    }
}

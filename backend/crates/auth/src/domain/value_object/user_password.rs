//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! // Create from user input
//! let raw = RawPassword::for_sign_up("Password12345").unwrap();
//!
//! // Hash for storage
//! let hashed = UserPassword::from_raw(&raw).unwrap();
//!
//! // Verify later
//! assert!(hashed.verify(&raw));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

/// Minimum password length accepted at sign-up (characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length accepted at sign-up (characters)
pub const MAX_PASSWORD_LENGTH: usize = 20;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept any password that is not blank.
    ///
    /// Used at sign-in, where the stored hash is the only judge.
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw);
        if clear_text.as_str().trim().is_empty() {
            return Err(AppError::bad_request("Password must not be empty"));
        }
        Ok(Self(clear_text))
    }

    /// Accept a password for a new account: non-empty and
    /// 8 to 20 characters inclusive.
    pub fn for_sign_up(raw: impl Into<String>) -> AppResult<Self> {
        let password = Self::new(raw)?;

        let len = password.0.char_count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        Ok(password)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password.
    ///
    /// Argon2 is deliberately slow; call this from the blocking pool.
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw.inner().hash().map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
        })?;

        Ok(Self(hashed))
    }

    /// Wrap a hash read from the database.
    ///
    /// Not parsed here: a corrupt value makes `verify` return false instead
    /// of failing the whole lookup.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_password_validation() {
        assert!(RawPassword::for_sign_up("Password12345").is_ok());
        assert!(RawPassword::for_sign_up("a".repeat(MIN_PASSWORD_LENGTH)).is_ok());
        assert!(RawPassword::for_sign_up("a".repeat(MAX_PASSWORD_LENGTH)).is_ok());

        assert!(RawPassword::for_sign_up("a".repeat(MIN_PASSWORD_LENGTH - 1)).is_err());
        assert!(RawPassword::for_sign_up("a".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_empty_password_reports_single_rule() {
        let err = RawPassword::for_sign_up("").unwrap_err();
        assert_eq!(err.message(), "Password must not be empty");
    }

    #[test]
    fn test_sign_in_password_only_requires_content() {
        assert!(RawPassword::new("x").is_ok());
        assert!(RawPassword::new("a".repeat(200)).is_ok());
        assert!(RawPassword::new("").is_err());
    }

    #[test]
    fn test_whitespace_only_password_is_blank() {
        let err = RawPassword::new("   ").unwrap_err();
        assert_eq!(err.message(), "Password must not be empty");

        let err = RawPassword::for_sign_up(" ".repeat(MIN_PASSWORD_LENGTH)).unwrap_err();
        assert_eq!(err.message(), "Password must not be empty");

        // Surrounding spaces are part of the password, not trimmed away
        assert!(RawPassword::for_sign_up("  pass word  ").is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::for_sign_up("TestPassword123!").unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();

        assert!(hashed.verify(&raw));

        let wrong = RawPassword::new("WrongPassword123!").unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_db_roundtrip() {
        let raw = RawPassword::for_sign_up("TestPassword123!").unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();

        let restored = UserPassword::from_db(hashed.as_phc_string());
        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_corrupt_stored_hash_does_not_verify() {
        let raw = RawPassword::new("whatever").unwrap();
        assert!(!UserPassword::from_db("").verify(&raw));
        assert!(!UserPassword::from_db("whatever").verify(&raw));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!").unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
        assert!(!debug.contains("argon2"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 8 characters, 24 bytes
        let raw = RawPassword::for_sign_up("パスワードです!").unwrap();
        let hashed = UserPassword::from_raw(&raw).unwrap();
        assert!(hashed.verify(&raw));
    }
}

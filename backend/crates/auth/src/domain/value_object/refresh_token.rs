//! Refresh Token Value Object
//!
//! Opaque capability string: random bytes rendered as lowercase hex. It has
//! no internal structure and is only ever compared for equality.

use std::fmt;

/// Refresh token string
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Generate a fresh token from `bytes` bytes of OS randomness
    pub fn generate(bytes: usize) -> Self {
        Self(platform::crypto::random_hex(bytes))
    }

    /// Wrap a client-presented or stored token.
    ///
    /// No validation: an unknown string is simply never found.
    pub fn from_raw(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Tokens are bearer secrets; only a short prefix is ever printed.
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "RefreshToken({prefix}...)")
    }
}

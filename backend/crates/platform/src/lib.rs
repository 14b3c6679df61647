//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographically secure randomness and hex encoding
//! - Password hashing (Argon2id)

pub mod crypto;
pub mod password;

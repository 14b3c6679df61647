//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Sign-up with email, password and name
//! - Sign-in returning a JWT access token and an opaque refresh token
//! - Refresh token rotation (each refresh token works once)
//! - Sign-out revoking every refresh session of the user
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking thread pool
//! - Access tokens: HS256, short lived, never stored
//! - Refresh tokens: 160 random bits, single use, lifetime measured from
//!   issuance
//! - Unknown email and wrong password are indistinguishable to clients

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use application::{SessionCleanupUseCase, TokenIssuer};
pub use error::{AuthError, AuthResult, ErrorCode};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

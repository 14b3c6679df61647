//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod refresh_token;
pub mod session_cleanup;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
mod validation;

// Re-exports
pub use config::AuthConfig;
pub use refresh_token::{RefreshTokenOutput, RefreshTokenUseCase};
pub use session_cleanup::SessionCleanupUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{AccessClaims, TokenIssuer};

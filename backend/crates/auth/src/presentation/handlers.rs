//! HTTP Handlers
//!
//! Each endpoint picks its own status for engine error codes; infrastructure
//! faults always become a generic 500.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    RefreshTokenUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::error::ErrorCode;
use crate::presentation::dto::{
    SignInRequest, SignInResponse, SignUpRequest, SignUpResponse, TokenPairResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> Response
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    match use_case.execute(input).await {
        Ok(profile) => (StatusCode::CREATED, Json(SignUpResponse::from(profile))).into_response(),
        Err(e) => e.respond_with(|_| StatusCode::BAD_REQUEST),
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> Response
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    match use_case.execute(input).await {
        Ok(output) => Json(SignInResponse {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
            user: output.user.into(),
        })
        .into_response(),
        Err(e) => e.respond_with(|_| StatusCode::UNAUTHORIZED),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout (behind `require_bearer`)
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Response
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone());

    match use_case.execute(&user.user_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.respond_with(|_| StatusCode::INTERNAL_SERVER_ERROR),
    }
}

// ============================================================================
// Refresh Token
// ============================================================================

/// POST /api/auth/refreshtoken
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(token): Json<String>,
) -> Response
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RefreshTokenUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(output) => Json(TokenPairResponse {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        })
        .into_response(),
        Err(e) => e.respond_with(|code| match code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }),
    }
}

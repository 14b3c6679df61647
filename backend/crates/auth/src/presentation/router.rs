//! Auth Router

use axum::{Router, middleware, routing::post};

use crate::application::config::AuthConfig;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    let protected = Router::new()
        .route("/signout", post(handlers::sign_out::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/refreshtoken", post(handlers::refresh_token::<R>))
        .merge(protected)
        .with_state(state)
}

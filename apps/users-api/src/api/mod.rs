//! API routes module

pub mod health;

use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};
use domain_users::{SqlUserRepository, UserService, handlers, pages};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Domain routes: JSON API under `/users`, HTML index at `/`
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let service = UserService::new(SqlUserRepository::new(state.db.clone()));

    Ok(Router::new()
        .nest(handlers::BASE_PATH, handlers::router(service.clone()))
        .merge(pages::router(service)?))
}

/// `/ready` with a live database check
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Full application: domain routes, docs, health endpoints and middleware
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state)?);

    Ok(router
        .merge(health_router(state.config.app.clone()))
        .merge(ready_router(state.clone())))
}

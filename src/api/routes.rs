use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::interceptor::{intercept, Interceptor};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let interceptor = Interceptor::new(state.config.scope.clone(), state.store.clone());
    tracing::info!(scope = %interceptor.scope(), "Site interceptor activated");

    Router::new()
        // Internal
        .route("/_internal/health", get(handlers::health))
        .fallback(handlers::not_found)
        // Site requests are answered before routing
        .layer(middleware::from_fn_with_state(interceptor, intercept))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    extract::Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, Authenticator, SharedAuthenticator};
use crate::endpoints::kudos::{create, delete, list, show, update};
use crate::kudo::service::{KudoService, SharedKudoService};

/// Collaborators handed to the handlers through request extensions.
#[derive(Clone)]
pub struct AppState {
    pub service: SharedKudoService,
    pub authenticator: SharedAuthenticator,
}

impl AppState {
    pub fn new(service: impl KudoService + 'static, authenticator: impl Authenticator + 'static) -> Self {
        Self {
            service: Arc::new(service),
            authenticator: Arc::new(authenticator),
        }
    }
}

/// Builds the full route table. The kudo routes sit behind the bearer-token
/// middleware; `/health` does not.
pub fn router(state: AppState) -> Router {
    let kudo_routes = Router::new()
        .route("/kudos", get(list::index::handler).post(create::index::handler))
        .route(
            "/kudo/{id}",
            get(show::index::handler)
                .put(update::index::handler)
                .delete(delete::index::handler),
        )
        .route_layer(middleware::from_fn(auth_middleware));

    Router::new()
        .route("/health", get(health))
        .merge(kudo_routes)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(Extension(state.service))
        .layer(Extension(state.authenticator))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "method not allowed" })))
}

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::endpoints::kudos::common::{HandlerError, KudoId};
use crate::kudo::service::SharedKudoService;

/// Axum handler: DELETE /kudo/{id}
pub async fn handler(
    Extension(service): Extension<SharedKudoService>,
    Extension(user): Extension<AuthenticatedUser>,
    KudoId(id): KudoId,
) -> Result<impl IntoResponse, HandlerError> {
    if !service.delete_kudo_for(&user, id)? {
        return Err(HandlerError::KudoNotFound);
    }

    info!(user = %user.email, repo_id = id, "kudo deleted");
    Ok((StatusCode::OK, Json(json!({}))))
}

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::endpoints::kudos::common::{load_github_repo, HandlerError, KudoId};
use crate::kudo::service::SharedKudoService;

/// Axum handler: PUT /kudo/{id}
///
/// Responds with the validated input, not the stored record.
pub async fn handler(
    Extension(service): Extension<SharedKudoService>,
    Extension(user): Extension<AuthenticatedUser>,
    KudoId(id): KudoId,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let repo = load_github_repo(&body?)?;

    if !service.update_kudo_with(&user, id, &repo)? {
        return Err(HandlerError::KudoNotFound);
    }

    info!(user = %user.email, repo_id = id, "kudo updated");
    Ok((StatusCode::OK, Json(repo)))
}

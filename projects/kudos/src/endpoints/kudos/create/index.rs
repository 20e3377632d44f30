use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::endpoints::kudos::common::{load_github_repo, HandlerError};
use crate::kudo::service::SharedKudoService;

/// Axum handler: POST /kudos
pub async fn handler(
    Extension(service): Extension<SharedKudoService>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let repo = load_github_repo(&body?)?;
    let kudo = service.create_kudo_for(&user, &repo)?;

    info!(user = %user.email, repo_id = kudo.repo.repo_id, "kudo created");
    Ok((StatusCode::OK, Json(kudo)))
}

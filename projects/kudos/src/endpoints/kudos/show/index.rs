use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::AuthenticatedUser;
use crate::endpoints::kudos::common::{HandlerError, KudoId};
use crate::kudo::service::SharedKudoService;

/// Axum handler: GET /kudo/{id}
pub async fn handler(
    Extension(service): Extension<SharedKudoService>,
    Extension(user): Extension<AuthenticatedUser>,
    KudoId(id): KudoId,
) -> Result<impl IntoResponse, HandlerError> {
    let kudo = service
        .find_kudo(&user, id)?
        .ok_or(HandlerError::KudoNotFound)?;

    Ok((StatusCode::OK, Json(kudo)))
}

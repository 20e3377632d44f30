use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::AuthenticatedUser;
use crate::endpoints::kudos::common::HandlerError;
use crate::kudo::service::SharedKudoService;

/// Axum handler: GET /kudos
pub async fn handler(
    Extension(service): Extension<SharedKudoService>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HandlerError> {
    let kudos = service.find_all_kudos(&user)?;
    Ok((StatusCode::OK, Json(kudos)))
}

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequestParts, Json, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::kudo::schema::{GithubRepo, ValidationErrors, SCHEMA_KEY};
use crate::kudo::service::KudoServiceError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("InvalidKudo: {errors:?}")]
    InvalidKudo { errors: ValidationErrors },
    #[error("KudoNotFound")]
    KudoNotFound,
    #[error("ReadBody: {source}")]
    ReadBody {
        #[from]
        source: BytesRejection,
    },
    #[error("KudoService: {source}")]
    KudoService {
        #[from]
        source: KudoServiceError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::InvalidKudo { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "msg": "invalid kudo", "errors": errors })),
            )
                .into_response(),
            HandlerError::KudoNotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "kudo not found" }))).into_response()
            }
            HandlerError::ReadBody { source } => {
                (source.status(), Json(json!({ "error": source.body_text() }))).into_response()
            }
            HandlerError::KudoService { source } => {
                error!(error = %source, "kudo service failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Decodes a request body and validates it as a [`GithubRepo`].
pub fn load_github_repo(body: &Bytes) -> Result<GithubRepo, HandlerError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| {
        let mut errors = ValidationErrors::new();
        errors.add(SCHEMA_KEY, "Invalid JSON body.");
        HandlerError::InvalidKudo { errors }
    })?;

    GithubRepo::load(&value).map_err(|errors| HandlerError::InvalidKudo { errors })
}

/// `{id}` path segment. Only positive integers address a kudo; anything else
/// is answered as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KudoId(pub i64);

impl<S> FromRequestParts<S> for KudoId
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| HandlerError::KudoNotFound)?;

        parse_kudo_id(&raw).map(KudoId).ok_or(HandlerError::KudoNotFound)
    }
}

fn parse_kudo_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kudo_ids_must_be_positive_integers() {
        assert_eq!(parse_kudo_id("5"), Some(5));
        assert_eq!(parse_kudo_id("0099"), Some(99));
        for bad in ["", "0", "-3", "+3", "abc", "1.5", " 7", "99999999999999999999"] {
            assert_eq!(parse_kudo_id(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn malformed_body_is_a_validation_error() {
        let err = load_github_repo(&Bytes::from_static(b"{not json")).unwrap_err();
        match err {
            HandlerError::InvalidKudo { errors } => {
                assert_eq!(errors.get(SCHEMA_KEY), Some(&["Invalid JSON body.".to_string()][..]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_body_is_loaded() {
        let repo = load_github_repo(&Bytes::from_static(br#"{"repo_id": 42, "language": "Rust"}"#)).unwrap();
        assert_eq!(repo.repo_id, 42);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
    }
}

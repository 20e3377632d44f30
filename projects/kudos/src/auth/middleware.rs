use axum::{
    extract::{Json, Request},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use serde_json::json;
use tracing::warn;

use super::SharedAuthenticator;

/// Rejects the request with 401 unless it carries a bearer token the
/// authenticator recognises. On success the resolved user is stored in the
/// request extensions for handlers to extract.
pub async fn auth_middleware(
    Extension(authenticator): Extension<SharedAuthenticator>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        warn!(path = %req.uri().path(), "missing bearer token");
        return unauthorized();
    };

    let Some(user) = authenticator.authenticate(token) else {
        warn!(path = %req.uri().path(), "unknown bearer token");
        return unauthorized();
    };

    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Token of an `Authorization` value. The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

fn unauthorized() -> Response {
    let mut response = (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_ignores_case() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER  abc "), Some("abc"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_rejected() {
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearerabc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token(""), None);
    }
}

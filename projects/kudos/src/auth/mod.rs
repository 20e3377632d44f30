//! Bearer-token authentication for the kudo routes.
//!
//! - `middleware` resolves the token and injects [`AuthenticatedUser`]
//! - `tokens` holds the static token table configured from the environment

pub mod middleware;
pub mod tokens;

use std::sync::Arc;

pub use middleware::auth_middleware;
pub use tokens::{ParseTokenTableError, StaticTokenAuthenticator};

/// The user a request acts on behalf of. `email` doubles as the kudo owner id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<AuthenticatedUser>;
}

pub type SharedAuthenticator = Arc<dyn Authenticator>;

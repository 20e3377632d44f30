use std::collections::HashMap;

use thiserror::Error;

use super::{AuthenticatedUser, Authenticator};
use crate::kudo::schema::is_valid_email;

/// Fixed `token -> email` table, parsed from `token=email,token=email`.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTokenTableError {
    #[error("Malformed token entry at position {position}, expected token=email")]
    MalformedEntry { position: usize },
    #[error("Invalid email for token at position {position}: {email}")]
    InvalidEmail { position: usize, email: String },
    #[error("Duplicate token at position {position}")]
    DuplicateToken { position: usize },
}

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, email: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), email.into());
        self
    }

    pub fn parse(table: &str) -> Result<Self, ParseTokenTableError> {
        let mut tokens = HashMap::new();

        let entries = table.split(',').map(str::trim).filter(|e| !e.is_empty());
        for (position, entry) in entries.enumerate() {
            let (token, email) = entry
                .split_once('=')
                .map(|(t, e)| (t.trim(), e.trim()))
                .filter(|(t, _)| !t.is_empty())
                .ok_or(ParseTokenTableError::MalformedEntry { position })?;

            if !is_valid_email(email) {
                return Err(ParseTokenTableError::InvalidEmail {
                    position,
                    email: email.to_string(),
                });
            }
            if tokens.insert(token.to_string(), email.to_string()).is_some() {
                return Err(ParseTokenTableError::DuplicateToken { position });
            }
        }

        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(&self, token: &str) -> Option<AuthenticatedUser> {
        self.tokens
            .get(token)
            .map(|email| AuthenticatedUser { email: email.clone() })
    }
}

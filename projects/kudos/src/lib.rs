//! Kudo service: user-scoped appreciation records for GitHub repositories
//!
//! - Resource schema and validation in `kudo::schema`
//! - Service contract and in-memory store in `kudo::service`
//! - REST endpoints in `endpoints/`, wired up by `router`
//! - PostgreSQL models and queries in `db/`

pub mod auth;
pub mod config;
pub mod db;
pub mod endpoints;
pub mod kudo;
pub mod router;

pub use router::{router, AppState};

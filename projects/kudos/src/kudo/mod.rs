pub mod schema;
pub mod service;

pub use schema::{GithubRepo, Kudo, ValidationErrors};
pub use service::{KudoService, KudoServiceError, MemoryKudoService, SharedKudoService};

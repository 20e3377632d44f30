use chrono::Utc;
use tracing::debug;

use crate::auth::AuthenticatedUser;
use crate::db::kudo::{
    models::{KudoChanges, NewKudo},
    queries::{delete_kudo, get_kudo, list_kudos, update_kudo, upsert_kudo},
};
use crate::db::PgPool;
use crate::kudo::schema::{GithubRepo, Kudo};
use crate::kudo::service::{KudoService, KudoServiceError};

/// Kudo storage in the `kudos` Postgres table.
#[derive(Clone)]
pub struct PgKudoService {
    pool: PgPool,
}

impl PgKudoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl KudoService for PgKudoService {
    fn find_all_kudos(&self, user: &AuthenticatedUser) -> Result<Vec<Kudo>, KudoServiceError> {
        let mut conn = self.pool.get().map_err(KudoServiceError::store)?;
        let rows = list_kudos(&mut conn, &user.email).map_err(KudoServiceError::store)?;
        Ok(rows.into_iter().map(Kudo::from).collect())
    }

    fn create_kudo_for(&self, user: &AuthenticatedUser, repo: &GithubRepo) -> Result<Kudo, KudoServiceError> {
        let mut conn = self.pool.get().map_err(KudoServiceError::store)?;
        let new = NewKudo::new(&user.email, repo);
        let changes = KudoChanges::new(repo, Utc::now().naive_utc());
        let row = upsert_kudo(&mut conn, &new, &changes).map_err(KudoServiceError::store)?;
        debug!(kudo_id = %row.id, repo_id = row.repo_id, "kudo stored");
        Ok(Kudo::from(row))
    }

    fn find_kudo(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<Option<Kudo>, KudoServiceError> {
        let mut conn = self.pool.get().map_err(KudoServiceError::store)?;
        let row = get_kudo(&mut conn, &user.email, repo_id).map_err(KudoServiceError::store)?;
        Ok(row.map(Kudo::from))
    }

    fn update_kudo_with(
        &self,
        user: &AuthenticatedUser,
        repo_id: i64,
        repo: &GithubRepo,
    ) -> Result<bool, KudoServiceError> {
        let mut conn = self.pool.get().map_err(KudoServiceError::store)?;
        let changes = KudoChanges::new(repo, Utc::now().naive_utc());
        update_kudo(&mut conn, &user.email, repo_id, &changes).map_err(KudoServiceError::store)
    }

    fn delete_kudo_for(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<bool, KudoServiceError> {
        let mut conn = self.pool.get().map_err(KudoServiceError::store)?;
        delete_kudo(&mut conn, &user.email, repo_id).map_err(KudoServiceError::store)
    }
}

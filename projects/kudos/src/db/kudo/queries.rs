use diesel::{dsl::exists, prelude::*};
use thiserror::Error;
use crate::db::{kudo::models::*, schema::kudos::dsl::*};

#[derive(Debug, Error)]
pub enum UpsertKudoError {
    #[error("UpsertKudo: {source}")]
    UpsertKudo {
        #[from]
        source: diesel::result::Error,
    },
}

/// Inserts the kudo, or overwrites the repo fields of the one the user
/// already holds for the same `repo_id`.
pub fn upsert_kudo(
    conn: &mut PgConnection,
    new: &NewKudo,
    changes: &KudoChanges,
) -> Result<KudoRow, UpsertKudoError> {
    diesel::insert_into(kudos)
        .values(new)
        .on_conflict((user_id, repo_id))
        .do_update()
        .set(changes)
        .returning(KudoRow::as_returning())
        .get_result(conn)
        .map_err(|source| UpsertKudoError::UpsertKudo { source })
}

#[derive(Debug, Error)]
pub enum ListKudosError {
    #[error("ListKudos: {source}")]
    ListKudos {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn list_kudos(
    conn: &mut PgConnection,
    user_id_val: &str,
) -> Result<Vec<KudoRow>, ListKudosError> {
    kudos
        .filter(user_id.eq(user_id_val))
        .order_by(repo_id.asc())
        .select(KudoRow::as_select())
        .load(conn)
        .map_err(|source| ListKudosError::ListKudos { source })
}

#[derive(Debug, Error)]
pub enum GetKudoError {
    #[error("GetKudo: {source}")]
    GetKudo {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_kudo(
    conn: &mut PgConnection,
    user_id_val: &str,
    repo_id_val: i64,
) -> Result<Option<KudoRow>, GetKudoError> {
    kudos
        .filter(user_id.eq(user_id_val))
        .filter(repo_id.eq(repo_id_val))
        .select(KudoRow::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetKudoError::GetKudo { source })
}

#[derive(Debug, Error)]
pub enum UpdateKudoError {
    #[error("UpdateKudo: {source}")]
    UpdateKudo {
        #[from]
        source: diesel::result::Error,
    },
}

/// Returns `false` when the user has no kudo at `repo_id_val`. Moving a kudo
/// onto another `repo_id` drops whatever the user held there.
pub fn update_kudo(
    conn: &mut PgConnection,
    user_id_val: &str,
    repo_id_val: i64,
    changes: &KudoChanges,
) -> Result<bool, UpdateKudoError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let found = diesel::select(exists(
            kudos
                .filter(user_id.eq(user_id_val))
                .filter(repo_id.eq(repo_id_val)),
        ))
        .get_result::<bool>(conn)?;

        if !found {
            return Ok(false);
        }

        if changes.repo_id != repo_id_val {
            diesel::delete(
                kudos
                    .filter(user_id.eq(user_id_val))
                    .filter(repo_id.eq(changes.repo_id)),
            )
            .execute(conn)?;
        }

        let updated = diesel::update(
            kudos
                .filter(user_id.eq(user_id_val))
                .filter(repo_id.eq(repo_id_val)),
        )
        .set(changes)
        .execute(conn)?;

        Ok(updated > 0)
    })
    .map_err(|source| UpdateKudoError::UpdateKudo { source })
}

#[derive(Debug, Error)]
pub enum DeleteKudoError {
    #[error("DeleteKudo: {source}")]
    DeleteKudo {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn delete_kudo(
    conn: &mut PgConnection,
    user_id_val: &str,
    repo_id_val: i64,
) -> Result<bool, DeleteKudoError> {
    diesel::delete(
        kudos
            .filter(user_id.eq(user_id_val))
            .filter(repo_id.eq(repo_id_val)),
    )
    .execute(conn)
    .map(|deleted| deleted > 0)
    .map_err(|source| DeleteKudoError::DeleteKudo { source })
}

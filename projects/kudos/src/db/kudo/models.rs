use chrono::NaiveDateTime;
use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::kudos;
use crate::kudo::schema::{GithubRepo, Kudo};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = kudos)]
pub struct KudoRow {
    pub id: Uuid,
    pub user_id: String,
    pub repo_id: i64,
    pub repo_name: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = kudos)]
pub struct NewKudo<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub repo_id: i64,
    pub repo_name: Option<&'a str>,
    pub language: Option<&'a str>,
    pub description: Option<&'a str>,
    pub repo_url: Option<&'a str>,
}

/// Full replacement of the repo fields; `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = kudos)]
#[diesel(treat_none_as_null = true)]
pub struct KudoChanges<'a> {
    pub repo_id: i64,
    pub repo_name: Option<&'a str>,
    pub language: Option<&'a str>,
    pub description: Option<&'a str>,
    pub repo_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewKudo<'a> {
    pub fn new(user_id: &'a str, repo: &'a GithubRepo) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            repo_id: repo.repo_id,
            repo_name: repo.repo_name.as_deref(),
            language: repo.language.as_deref(),
            description: repo.description.as_deref(),
            repo_url: repo.repo_url.as_deref(),
        }
    }
}

impl<'a> KudoChanges<'a> {
    pub fn new(repo: &'a GithubRepo, updated_at: NaiveDateTime) -> Self {
        Self {
            repo_id: repo.repo_id,
            repo_name: repo.repo_name.as_deref(),
            language: repo.language.as_deref(),
            description: repo.description.as_deref(),
            repo_url: repo.repo_url.as_deref(),
            updated_at,
        }
    }
}

impl From<KudoRow> for Kudo {
    fn from(row: KudoRow) -> Self {
        Kudo {
            user_id: row.user_id,
            repo: GithubRepo {
                repo_id: row.repo_id,
                repo_name: row.repo_name,
                language: row.language,
                description: row.description,
                repo_url: row.repo_url,
            },
        }
    }
}

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::auth::AuthenticatedUser;
use crate::kudo::schema::{GithubRepo, Kudo};

/// Persistence and lookup of kudos. Every call is scoped to the user it is
/// given; a kudo belonging to someone else behaves as if it did not exist.
pub trait KudoService: Send + Sync {
    fn find_all_kudos(&self, user: &AuthenticatedUser) -> Result<Vec<Kudo>, KudoServiceError>;

    /// Stores `repo` for `user`, replacing any kudo the user already has for the same repo.
    fn create_kudo_for(&self, user: &AuthenticatedUser, repo: &GithubRepo) -> Result<Kudo, KudoServiceError>;

    fn find_kudo(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<Option<Kudo>, KudoServiceError>;

    /// Replaces every field of the kudo at `repo_id`. `Ok(false)` when there is none.
    fn update_kudo_with(
        &self,
        user: &AuthenticatedUser,
        repo_id: i64,
        repo: &GithubRepo,
    ) -> Result<bool, KudoServiceError>;

    /// `Ok(false)` when nothing was removed.
    fn delete_kudo_for(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<bool, KudoServiceError>;
}

pub type SharedKudoService = Arc<dyn KudoService>;

#[derive(Debug, Error)]
pub enum KudoServiceError {
    #[error("Store: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("LockPoisoned")]
    LockPoisoned,
}

impl KudoServiceError {
    pub fn store<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            source: Box::new(source),
        }
    }
}

type KudoKey = (String, i64);

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryKudoService {
    kudos: RwLock<BTreeMap<KudoKey, Kudo>>,
}

impl MemoryKudoService {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(user: &AuthenticatedUser, repo_id: i64) -> KudoKey {
    (user.email.clone(), repo_id)
}

impl KudoService for MemoryKudoService {
    fn find_all_kudos(&self, user: &AuthenticatedUser) -> Result<Vec<Kudo>, KudoServiceError> {
        let kudos = self.kudos.read().map_err(|_| KudoServiceError::LockPoisoned)?;
        Ok(kudos
            .range(key(user, i64::MIN)..=key(user, i64::MAX))
            .map(|(_, kudo)| kudo.clone())
            .collect())
    }

    fn create_kudo_for(&self, user: &AuthenticatedUser, repo: &GithubRepo) -> Result<Kudo, KudoServiceError> {
        let kudo = Kudo {
            user_id: user.email.clone(),
            repo: repo.clone(),
        };
        let mut kudos = self.kudos.write().map_err(|_| KudoServiceError::LockPoisoned)?;
        kudos.insert(key(user, repo.repo_id), kudo.clone());
        Ok(kudo)
    }

    fn find_kudo(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<Option<Kudo>, KudoServiceError> {
        let kudos = self.kudos.read().map_err(|_| KudoServiceError::LockPoisoned)?;
        Ok(kudos.get(&key(user, repo_id)).cloned())
    }

    fn update_kudo_with(
        &self,
        user: &AuthenticatedUser,
        repo_id: i64,
        repo: &GithubRepo,
    ) -> Result<bool, KudoServiceError> {
        let mut kudos = self.kudos.write().map_err(|_| KudoServiceError::LockPoisoned)?;
        if kudos.remove(&key(user, repo_id)).is_none() {
            return Ok(false);
        }
        kudos.insert(
            key(user, repo.repo_id),
            Kudo {
                user_id: user.email.clone(),
                repo: repo.clone(),
            },
        );
        Ok(true)
    }

    fn delete_kudo_for(&self, user: &AuthenticatedUser, repo_id: i64) -> Result<bool, KudoServiceError> {
        let mut kudos = self.kudos.write().map_err(|_| KudoServiceError::LockPoisoned)?;
        Ok(kudos.remove(&key(user, repo_id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            email: email.to_string(),
        }
    }

    fn repo(repo_id: i64, name: &str) -> GithubRepo {
        GithubRepo {
            repo_id,
            repo_name: Some(name.to_string()),
            language: None,
            description: None,
            repo_url: None,
        }
    }

    #[test]
    fn create_then_find() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");

        let created = service.create_kudo_for(&alice, &repo(7, "tokio")).unwrap();
        assert_eq!(created.user_id, "alice@example.com");
        assert_eq!(service.find_kudo(&alice, 7).unwrap(), Some(created));
        assert_eq!(service.find_kudo(&alice, 8).unwrap(), None);
    }

    #[test]
    fn kudos_are_scoped_to_their_owner() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");

        service.create_kudo_for(&alice, &repo(1, "axum")).unwrap();
        service.create_kudo_for(&bob, &repo(2, "hyper")).unwrap();

        assert_eq!(service.find_kudo(&bob, 1).unwrap(), None);
        assert!(!service.update_kudo_with(&bob, 1, &repo(1, "stolen")).unwrap());
        assert!(!service.delete_kudo_for(&bob, 1).unwrap());

        let listed: Vec<i64> = service
            .find_all_kudos(&alice)
            .unwrap()
            .iter()
            .map(|k| k.repo.repo_id)
            .collect();
        assert_eq!(listed, [1]);
    }

    #[test]
    fn list_is_ordered_by_repo_id() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");
        for id in [30, -4, 12] {
            service.create_kudo_for(&alice, &repo(id, "r")).unwrap();
        }

        let ids: Vec<i64> = service
            .find_all_kudos(&alice)
            .unwrap()
            .iter()
            .map(|k| k.repo.repo_id)
            .collect();
        assert_eq!(ids, [-4, 12, 30]);
        assert!(service.find_all_kudos(&user("nobody@example.com")).unwrap().is_empty());
    }

    #[test]
    fn create_replaces_existing_kudo_for_same_repo() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");

        service.create_kudo_for(&alice, &repo(3, "old")).unwrap();
        service.create_kudo_for(&alice, &repo(3, "new")).unwrap();

        let kudos = service.find_all_kudos(&alice).unwrap();
        assert_eq!(kudos.len(), 1);
        assert_eq!(kudos[0].repo.repo_name.as_deref(), Some("new"));
    }

    #[test]
    fn update_replaces_all_fields() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");
        let mut original = repo(5, "serde");
        original.language = Some("Rust".to_string());
        service.create_kudo_for(&alice, &original).unwrap();

        assert!(service.update_kudo_with(&alice, 5, &repo(5, "serde_json")).unwrap());

        let updated = service.find_kudo(&alice, 5).unwrap().unwrap();
        assert_eq!(updated.repo.repo_name.as_deref(), Some("serde_json"));
        assert_eq!(updated.repo.language, None);
    }

    #[test]
    fn delete_is_reported_once() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");
        service.create_kudo_for(&alice, &repo(9, "rayon")).unwrap();

        assert!(service.delete_kudo_for(&alice, 9).unwrap());
        assert!(!service.delete_kudo_for(&alice, 9).unwrap());
    }

    #[test]
    fn update_onto_other_repo_id_replaces_it() {
        let service = MemoryKudoService::new();
        let alice = user("alice@example.com");
        service.create_kudo_for(&alice, &repo(1, "first")).unwrap();
        service.create_kudo_for(&alice, &repo(2, "second")).unwrap();

        assert!(service.update_kudo_with(&alice, 1, &repo(2, "moved")).unwrap());

        let listed = service.find_all_kudos(&alice).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].repo, repo(2, "moved"));
        assert_eq!(service.find_kudo(&alice, 1).unwrap(), None);
    }

    #[test]
    fn store_error_keeps_its_source_message() {
        let err = KudoServiceError::store(std::io::Error::other("connection refused"));
        assert_eq!(err.to_string(), "Store: connection refused");
        assert!(matches!(err, KudoServiceError::Store { .. }));
    }
}

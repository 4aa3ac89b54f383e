use std::sync::Arc;

use crate::application::repos::{AuthorsRepo, RepoError};
use crate::domain::entities::AuthorRecord;

/// Resolves the acting author asserted by the authenticating proxy into a
/// persisted record.
#[derive(Clone)]
pub struct AuthorService {
    repo: Arc<dyn AuthorsRepo>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorsRepo>) -> Self {
        Self { repo }
    }

    pub async fn ensure_author(&self, username: &str) -> Result<AuthorRecord, RepoError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RepoError::InvalidInput {
                message: "username must not be empty".to_string(),
            });
        }

        self.repo.ensure_author(username).await
    }

    pub async fn find_author(&self, username: &str) -> Result<Option<AuthorRecord>, RepoError> {
        self.repo.find_by_username(username).await
    }
}

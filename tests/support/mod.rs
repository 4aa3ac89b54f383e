#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use pennino::application::authors::AuthorService;
use pennino::application::posts::PostService;
use pennino::application::repos::{
    AuthorsRepo, CreatePostParams, HealthRepo, PostsRepo, PostsWriteRepo, RepoError,
    UpdatePostParams,
};
use pennino::domain::entities::{AuthorRecord, PostRecord};
use pennino::domain::posts::{ContentLimits, is_publicly_listed};
use pennino::infra::http::HttpState;

/// In-memory stand-in for the Postgres repositories, behind the same traits.
#[derive(Default)]
pub struct MemoryRepositories {
    authors: Mutex<Vec<AuthorRecord>>,
    posts: Mutex<Vec<PostRecord>>,
}

impl MemoryRepositories {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_author(&self, username: &str) -> AuthorRecord {
        let mut authors = self.authors.lock().unwrap();
        if let Some(existing) = authors.iter().find(|a| a.username == username) {
            return existing.clone();
        }

        let record = AuthorRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        authors.push(record.clone());
        record
    }

    pub fn seed_post(
        &self,
        author: &AuthorRecord,
        title: &str,
        text: &str,
        created_at: OffsetDateTime,
        published_at: Option<OffsetDateTime>,
    ) -> PostRecord {
        let record = PostRecord {
            id: Uuid::new_v4(),
            author_id: author.id,
            author_username: author.username.clone(),
            title: title.to_string(),
            text: text.to_string(),
            created_at,
            published_at,
        };
        self.posts.lock().unwrap().push(record.clone());
        record
    }

    pub fn post_by_id(&self, id: Uuid) -> Option<PostRecord> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostsRepo for MemoryRepositories {
    async fn list_published(&self, until: OffsetDateTime) -> Result<Vec<PostRecord>, RepoError> {
        let mut posts: Vec<PostRecord> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| is_publicly_listed(p, until))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn list_drafts(&self) -> Result<Vec<PostRecord>, RepoError> {
        let mut posts: Vec<PostRecord> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_draft())
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.post_by_id(id))
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let author_username = self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == params.author_id)
            .map(|a| a.username.clone())
            .ok_or(RepoError::InvalidInput {
                message: "unknown author".to_string(),
            })?;

        let record = PostRecord {
            id: Uuid::new_v4(),
            author_id: params.author_id,
            author_username,
            title: params.title,
            text: params.text,
            created_at: OffsetDateTime::now_utc(),
            published_at: params.published_at,
        };
        self.posts.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == params.id)
            .ok_or(RepoError::NotFound)?;

        post.title = params.title;
        post.text = params.text;
        post.published_at = params.published_at;
        Ok(post.clone())
    }

    async fn set_published_at(
        &self,
        id: Uuid,
        published_at: Option<OffsetDateTime>,
    ) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.published_at = published_at;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorsRepo for MemoryRepositories {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthorRecord>, RepoError> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn ensure_author(&self, username: &str) -> Result<AuthorRecord, RepoError> {
        Ok(self.seed_author(username))
    }
}

#[async_trait]
impl HealthRepo for MemoryRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

pub fn post_service(repo: &Arc<MemoryRepositories>) -> PostService {
    let reader: Arc<dyn PostsRepo> = repo.clone();
    let writer: Arc<dyn PostsWriteRepo> = repo.clone();
    PostService::new(reader, writer)
}

pub fn http_state(repo: &Arc<MemoryRepositories>) -> HttpState {
    let authors: Arc<dyn AuthorsRepo> = repo.clone();
    let health: Arc<dyn HealthRepo> = repo.clone();

    HttpState {
        posts: Arc::new(post_service(repo)),
        authors: Arc::new(AuthorService::new(authors)),
        health,
        limits: ContentLimits::default(),
        user_header: Arc::from("x-remote-user"),
    }
}

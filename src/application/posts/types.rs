use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::RepoError;
use crate::domain::posts::{PostAction, PostContent};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub content: PostContent,
    pub action: PostAction,
}

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub id: Uuid,
    pub content: PostContent,
    pub publish: PublishPolicy,
}

/// How an edit resolves the post's publish state.
#[derive(Debug, Clone, Copy)]
pub enum PublishPolicy {
    /// Full-page edits republish on every successful save.
    Republish,
    /// Fragment edits re-derive the publish state from the submitted
    /// action, so an edit can unpublish.
    FromAction(PostAction),
}

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("post not found")]
    NotFound,
    #[error("author `{actor}` does not own the post")]
    NotOwner { actor: String },
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for PostServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

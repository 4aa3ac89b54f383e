use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{AuthorRecord, PostRecord};

use super::service::PostService;
use super::types::PostServiceError;

impl PostService {
    /// Posts published at or before `now`, newest publish first.
    pub async fn published_feed(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<PostRecord>, PostServiceError> {
        self.reader
            .list_published(now)
            .await
            .map_err(PostServiceError::from)
    }

    /// Unpublished posts, newest creation first.
    pub async fn draft_feed(&self) -> Result<Vec<PostRecord>, PostServiceError> {
        self.reader
            .list_drafts()
            .await
            .map_err(PostServiceError::from)
    }

    /// Detail lookup is not gated by publish state.
    pub async fn load_post(&self, id: Uuid) -> Result<Option<PostRecord>, PostServiceError> {
        self.reader
            .find_by_id(id)
            .await
            .map_err(PostServiceError::from)
    }

    /// Load a post the actor owns; any other author gets `NotOwner` and no
    /// further access.
    pub async fn load_owned_post(
        &self,
        actor: &AuthorRecord,
        id: Uuid,
    ) -> Result<PostRecord, PostServiceError> {
        let post = self.load_post(id).await?.ok_or(PostServiceError::NotFound)?;

        if post.author_id != actor.id {
            return Err(PostServiceError::NotOwner {
                actor: actor.username.clone(),
            });
        }

        Ok(post)
    }
}

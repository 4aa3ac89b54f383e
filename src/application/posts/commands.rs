use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, UpdatePostParams};
use crate::domain::entities::{AuthorRecord, PostRecord};

use super::service::PostService;
use super::types::{CreatePostCommand, PostServiceError, PublishPolicy, UpdatePostCommand};

impl PostService {
    /// Persist a new post owned by `actor`. The submitted action decides
    /// whether the post goes live immediately or stays a draft.
    pub async fn create_post(
        &self,
        actor: &AuthorRecord,
        command: CreatePostCommand,
    ) -> Result<PostRecord, PostServiceError> {
        let params = CreatePostParams {
            author_id: actor.id,
            title: command.content.title,
            text: command.content.text,
            published_at: command.action.published_at(OffsetDateTime::now_utc()),
        };

        let post = self.writer.create_post(params).await?;
        Ok(post)
    }

    /// Replace title and text, resolving the publish state per the edit
    /// surface's policy. The actor must own the post.
    pub async fn update_post(
        &self,
        actor: &AuthorRecord,
        command: UpdatePostCommand,
    ) -> Result<PostRecord, PostServiceError> {
        self.load_owned_post(actor, command.id).await?;

        let published_at = match command.publish {
            PublishPolicy::Republish => Some(OffsetDateTime::now_utc()),
            PublishPolicy::FromAction(action) => action.published_at(OffsetDateTime::now_utc()),
        };

        let params = UpdatePostParams {
            id: command.id,
            title: command.content.title,
            text: command.content.text,
            published_at,
        };

        let post = self.writer.update_post(params).await?;
        Ok(post)
    }

    /// Stamp the publish instant; a no-op when the post is already live.
    pub async fn publish_post(
        &self,
        actor: &AuthorRecord,
        id: Uuid,
    ) -> Result<PostRecord, PostServiceError> {
        let post = self.load_owned_post(actor, id).await?;

        if post.published_at.is_some() {
            return Ok(post);
        }

        let post = self
            .writer
            .set_published_at(id, Some(OffsetDateTime::now_utc()))
            .await?;
        Ok(post)
    }

    /// Irreversible removal. The actor must own the post.
    pub async fn delete_post(
        &self,
        actor: &AuthorRecord,
        id: Uuid,
    ) -> Result<(), PostServiceError> {
        self.load_owned_post(actor, id).await?;
        self.writer.delete_post(id).await?;
        Ok(())
    }
}

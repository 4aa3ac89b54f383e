use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::PostRecord;

use super::{PostgresRepositories, map_sqlx_error};

const POST_COLUMNS: &str = "p.id, p.author_id, a.username AS author_username, \
     p.title, p.text, p.created_at, p.published_at";

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    author_username: String,
    title: String,
    text: String,
    created_at: OffsetDateTime,
    published_at: Option<OffsetDateTime>,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            author_username: row.author_username,
            title: row.title,
            text: row.text,
            created_at: row.created_at,
            published_at: row.published_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_published(&self, until: OffsetDateTime) -> Result<Vec<PostRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             JOIN authors a ON a.id = p.author_id
             WHERE p.published_at IS NOT NULL AND p.published_at <= $1
             ORDER BY p.published_at DESC"
        ))
        .bind(until)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn list_drafts(&self) -> Result<Vec<PostRecord>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             JOIN authors a ON a.id = p.author_id
             WHERE p.published_at IS NULL
             ORDER BY p.created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS}
             FROM posts p
             JOIN authors a ON a.id = p.author_id
             WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let CreatePostParams {
            author_id,
            title,
            text,
            published_at,
        } = params;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, PostRow>(
            "WITH inserted AS (
                 INSERT INTO posts (id, author_id, title, text, created_at, published_at)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, author_id, title, text, created_at, published_at
             )
             SELECT p.id, p.author_id, a.username AS author_username,
                    p.title, p.text, p.created_at, p.published_at
             FROM inserted p
             JOIN authors a ON a.id = p.author_id",
        )
        .bind(id)
        .bind(author_id)
        .bind(title)
        .bind(text)
        .bind(now)
        .bind(published_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let UpdatePostParams {
            id,
            title,
            text,
            published_at,
        } = params;

        let row = sqlx::query_as::<_, PostRow>(
            "WITH updated AS (
                 UPDATE posts
                 SET title = $2,
                     text = $3,
                     published_at = $4
                 WHERE id = $1
                 RETURNING id, author_id, title, text, created_at, published_at
             )
             SELECT p.id, p.author_id, a.username AS author_username,
                    p.title, p.text, p.created_at, p.published_at
             FROM updated p
             JOIN authors a ON a.id = p.author_id",
        )
        .bind(id)
        .bind(title)
        .bind(text)
        .bind(published_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        Ok(PostRecord::from(row))
    }

    async fn set_published_at(
        &self,
        id: Uuid,
        published_at: Option<OffsetDateTime>,
    ) -> Result<PostRecord, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            "WITH updated AS (
                 UPDATE posts
                 SET published_at = $2
                 WHERE id = $1
                 RETURNING id, author_id, title, text, created_at, published_at
             )
             SELECT p.id, p.author_id, a.username AS author_username,
                    p.title, p.text, p.created_at, p.published_at
             FROM updated p
             JOIN authors a ON a.id = p.author_id",
        )
        .bind(id)
        .bind(published_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        Ok(PostRecord::from(row))
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

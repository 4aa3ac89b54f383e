//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub title: String,
    pub text: String,
    pub created_at: OffsetDateTime,
    pub published_at: Option<OffsetDateTime>,
}

impl PostRecord {
    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub username: String,
    pub created_at: OffsetDateTime,
}

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::comment::model::{Comment, CommentWithAuthor};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    InvalidDocument(String),
}

/// Persistence for comments. Update and delete are ownership-scoped: the
/// filter carries both the comment id and the owner id, so lookup and
/// authorization happen in one atomic store call.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, StoreError>;

    /// Comments on `movie_id`, newest first, with author profiles resolved.
    async fn find_by_movie(&self, movie_id: &str) -> Result<Vec<CommentWithAuthor>, StoreError>;

    /// Sets `text` (when given) and bumps `updatedAt`. Returns the document
    /// after the update, or `None` when no comment matches `id` and `owner`.
    async fn update_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        text: Option<String>,
    ) -> Result<Option<Comment>, StoreError>;

    async fn delete_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
    ) -> Result<Option<Comment>, StoreError>;
}

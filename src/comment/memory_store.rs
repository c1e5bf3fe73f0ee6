use crate::comment::model::{AuthorProfile, Comment, CommentWithAuthor};
use crate::comment::store::{CommentStore, StoreError};
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId};
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`CommentStore`] for handler tests.
#[derive(Default)]
pub struct MemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
    users: RwLock<HashMap<ObjectId, AuthorProfile>>,
}

impl MemoryCommentStore {
    pub async fn add_user(&self, profile: AuthorProfile) {
        self.users.write().await.insert(profile.id, profile);
    }

    pub async fn get(&self, id: &ObjectId) -> Option<Comment> {
        self.comments
            .read()
            .await
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.comments.read().await.len()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn insert(&self, comment: Comment) -> Result<Comment, StoreError> {
        self.comments.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_movie(&self, movie_id: &str) -> Result<Vec<CommentWithAuthor>, StoreError> {
        let users = self.users.read().await;
        let mut found: Vec<CommentWithAuthor> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.movie_id == movie_id)
            .map(|c| CommentWithAuthor {
                id: c.id,
                author: users.get(&c.user_id).cloned(),
                movie_id: c.movie_id.clone(),
                text: c.text.clone(),
                created_at: c.created_at,
                updated_at: c.updated_at,
            })
            .collect();

        found.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(found)
    }

    async fn update_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        text: Option<String>,
    ) -> Result<Option<Comment>, StoreError> {
        let mut comments = self.comments.write().await;
        let Some(comment) = comments
            .iter_mut()
            .find(|c| &c.id == id && &c.user_id == owner)
        else {
            return Ok(None);
        };

        if let Some(text) = text {
            comment.text = text;
        }
        let now = bson::DateTime::now();
        let bumped = bson::DateTime::from_millis(comment.updated_at.timestamp_millis() + 1);
        comment.updated_at = now.max(bumped);

        Ok(Some(comment.clone()))
    }

    async fn delete_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
    ) -> Result<Option<Comment>, StoreError> {
        let mut comments = self.comments.write().await;
        let position = comments
            .iter()
            .position(|c| &c.id == id && &c.user_id == owner);

        Ok(position.map(|i| comments.remove(i)))
    }
}

/// A store whose every call fails, for the 500 paths.
pub struct FailingCommentStore;

fn unavailable() -> StoreError {
    StoreError::InvalidDocument("connection refused".to_string())
}

#[async_trait]
impl CommentStore for FailingCommentStore {
    async fn insert(&self, _comment: Comment) -> Result<Comment, StoreError> {
        Err(unavailable())
    }

    async fn find_by_movie(&self, _movie_id: &str) -> Result<Vec<CommentWithAuthor>, StoreError> {
        Err(unavailable())
    }

    async fn update_owned(
        &self,
        _id: &ObjectId,
        _owner: &ObjectId,
        _text: Option<String>,
    ) -> Result<Option<Comment>, StoreError> {
        Err(unavailable())
    }

    async fn delete_owned(
        &self,
        _id: &ObjectId,
        _owner: &ObjectId,
    ) -> Result<Option<Comment>, StoreError> {
        Err(unavailable())
    }
}

use crate::comment::model::{Comment, CommentWithAuthor};
use crate::comment::store::{CommentStore, StoreError};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, IndexModel};

const COMMENTS_COLLECTION: &str = "comments";
const USERS_COLLECTION: &str = "users";

/// MongoDB-backed [`CommentStore`].
pub struct CommentService {
    collection: Collection<Comment>,
}

impl CommentService {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client
            .database(database)
            .collection::<Comment>(COMMENTS_COLLECTION);
        CommentService { collection }
    }

    /// Index backing the per-movie listing and its sort order.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "movieId": 1, "createdAt": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

/// Match on movie, newest first, then swap `userId` for the author's public
/// fields. A dangling `userId` ends up absent.
fn listing_pipeline(movie_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "movieId": movie_id } },
        doc! { "$sort": { "createdAt": -1, "_id": -1 } },
        doc! {
            "$lookup": {
                "from": USERS_COLLECTION,
                "localField": "userId",
                "foreignField": "_id",
                "pipeline": [ { "$project": { "firstName": 1, "lastName": 1, "email": 1 } } ],
                "as": "author",
            }
        },
        doc! { "$set": { "userId": { "$arrayElemAt": [ "$author", 0 ] } } },
        doc! { "$unset": "author" },
    ]
}

/// `updatedAt` must move forward even when two writes land in the same
/// millisecond.
fn update_pipeline(text: Option<String>) -> Vec<Document> {
    let mut set = doc! {
        "updatedAt": { "$max": [ "$$NOW", { "$add": [ "$updatedAt", 1 ] } ] },
    };
    if let Some(text) = text {
        set.insert("text", doc! { "$literal": text });
    }
    vec![doc! { "$set": set }]
}

/// The server must echo back the `_id` the comment was created with.
fn check_inserted_id(inserted: &Bson, expected: &ObjectId) -> Result<(), StoreError> {
    match inserted.as_object_id() {
        Some(id) if id == *expected => Ok(()),
        _ => Err(StoreError::InvalidDocument(format!(
            "unexpected inserted comment id: {}",
            inserted
        ))),
    }
}

fn owned_filter(id: &ObjectId, owner: &ObjectId) -> Document {
    doc! { "_id": id, "userId": owner }
}

#[async_trait]
impl CommentStore for CommentService {
    async fn insert(&self, comment: Comment) -> Result<Comment, StoreError> {
        let result = self.collection.insert_one(&comment).await?;
        check_inserted_id(&result.inserted_id, &comment.id)?;
        Ok(comment)
    }

    async fn find_by_movie(&self, movie_id: &str) -> Result<Vec<CommentWithAuthor>, StoreError> {
        let cursor = self
            .collection
            .aggregate(listing_pipeline(movie_id))
            .with_type::<CommentWithAuthor>()
            .await?;

        let comments: Vec<CommentWithAuthor> = cursor.try_collect().await?;
        Ok(comments)
    }

    async fn update_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        text: Option<String>,
    ) -> Result<Option<Comment>, StoreError> {
        let updated = self
            .collection
            .find_one_and_update(owned_filter(id, owner), update_pipeline(text))
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_owned(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
    ) -> Result<Option<Comment>, StoreError> {
        let deleted = self
            .collection
            .find_one_and_delete(owned_filter(id, owner))
            .await?;

        Ok(deleted)
    }
}

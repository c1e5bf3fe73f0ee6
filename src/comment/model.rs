use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A comment as stored in the `comments` collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub movie_id: String,
    pub text: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Comment {
    pub fn new(user_id: ObjectId, movie_id: String, text: String) -> Self {
        let now = bson::DateTime::now();
        Comment {
            id: ObjectId::new(),
            user_id,
            movie_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public fields of a user, as resolved from `userId` on listings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A comment with `userId` replaced by the author's profile. `author` is
/// `None` when the user document no longer exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "userId")]
    pub author: Option<AuthorProfile>,
    pub movie_id: String,
    pub text: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Scalars are accepted for string fields and stored in their string form.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `""`, `0`, `false` and `null` count as missing.
fn required_field(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Bool(false) => None,
        other => scalar_to_string(other).filter(|s| !s.is_empty()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub movie_id: Option<Value>,
    pub text: Option<Value>,
}

impl CreateCommentRequest {
    /// `(movie_id, text)` when both are present and non-empty.
    pub fn into_required(self) -> Option<(String, String)> {
        Some((required_field(self.movie_id)?, required_field(self.text)?))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<Value>,
}

impl UpdateCommentRequest {
    pub fn into_text(self) -> Option<String> {
        self.text.and_then(scalar_to_string)
    }
}

// ---- wire representations ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: CommentAuthor,
    pub movie_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `userId` is a plain id on single-comment responses and an embedded
/// profile (or `null`) on listings.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommentAuthor {
    Id(String),
    Profile(AuthorResponse),
    Missing,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn to_utc(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id.to_hex(),
            user_id: CommentAuthor::Id(comment.user_id.to_hex()),
            movie_id: comment.movie_id,
            text: comment.text,
            created_at: to_utc(comment.created_at),
            updated_at: to_utc(comment.updated_at),
        }
    }
}

impl From<AuthorProfile> for AuthorResponse {
    fn from(profile: AuthorProfile) -> Self {
        AuthorResponse {
            id: profile.id.to_hex(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
        }
    }
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        let user_id = match comment.author {
            Some(profile) => CommentAuthor::Profile(profile.into()),
            None => CommentAuthor::Missing,
        };

        CommentResponse {
            id: comment.id.to_hex(),
            user_id,
            movie_id: comment.movie_id,
            text: comment.text,
            created_at: to_utc(comment.created_at),
            updated_at: to_utc(comment.updated_at),
        }
    }
}

use crate::comment::model::{
    Comment, CommentResponse, CreateCommentRequest, UpdateCommentRequest,
};
use crate::comment::store::{CommentStore, StoreError};
use crate::middleware::auth::AuthenticatedUser;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, web};
use log::error;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

const MISSING_FIELDS: &str = "Faltan campos requeridos";
const NOT_FOUND_OR_UNAUTHORIZED: &str = "Comentario no encontrado o no autorizado";
const NO_COMMENTS_FOR_MOVIE: &str = "No hay comentarios para esta película.";
const DELETED: &str = "Comentario eliminado correctamente";

const CREATE_FAILED: &str = "Error al crear el comentario";
const LIST_FAILED: &str = "Error al obtener comentarios";
const UPDATE_FAILED: &str = "Error al actualizar comentario";
const DELETE_FAILED: &str = "Error al eliminar comentario";

fn store_failure(operation: &str, message: &str, err: StoreError) -> ApiError {
    error!("❌ [{}] {}: {}", operation, message, err);
    ApiError::InternalServerError {
        message: message.to_string(),
        error: err.to_string(),
    }
}

fn not_found_or_unauthorized() -> ApiError {
    ApiError::NotFoundError(NOT_FOUND_OR_UNAUTHORIZED.to_string())
}

/// Create a comment on a movie, owned by the caller
/// POST /api/comments
pub async fn create_comment(
    user: AuthenticatedUser,
    store: web::Data<dyn CommentStore>,
    body: Option<web::Json<CreateCommentRequest>>,
) -> Result<HttpResponse, ApiError> {
    // A missing or unreadable body is treated as `{}`.
    let (movie_id, text) = body
        .map(web::Json::into_inner)
        .unwrap_or_default()
        .into_required()
        .ok_or_else(|| ApiError::ValidationError(MISSING_FIELDS.to_string()))?;

    let comment = store
        .insert(Comment::new(user.id, movie_id, text))
        .await
        .map_err(|e| store_failure("create_comment", CREATE_FAILED, e))?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

async fn comments_for_movie(
    store: &dyn CommentStore,
    operation: &str,
    movie_id: &str,
) -> Result<Vec<CommentResponse>, ApiError> {
    let comments = store
        .find_by_movie(movie_id)
        .await
        .map_err(|e| store_failure(operation, LIST_FAILED, e))?;

    Ok(comments.into_iter().map(CommentResponse::from).collect())
}

/// All comments on a movie, newest first; empty is fine
/// GET /api/comments/movie/{movie_id}
pub async fn get_comments_by_movie(
    store: web::Data<dyn CommentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let comments =
        comments_for_movie(store.get_ref(), "get_comments_by_movie", &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Same listing, but a movie without comments is a 404
/// GET /api/movies/{movie_id}/comments
pub async fn get_comments_by_movie_id(
    store: web::Data<dyn CommentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let comments =
        comments_for_movie(store.get_ref(), "get_comments_by_movie_id", &path.into_inner())
            .await?;

    if comments.is_empty() {
        return Err(ApiError::NotFoundError(NO_COMMENTS_FOR_MOVIE.to_string()));
    }

    Ok(HttpResponse::Ok().json(comments))
}

/// Replace the text of one of the caller's comments
/// PUT|PATCH /api/comments/{id}
pub async fn update_comment(
    user: AuthenticatedUser,
    store: web::Data<dyn CommentStore>,
    path: web::Path<String>,
    body: Option<web::Json<UpdateCommentRequest>>,
) -> Result<HttpResponse, ApiError> {
    // An id that is not an ObjectId cannot match any comment.
    let comment_id =
        ObjectId::parse_str(path.into_inner()).map_err(|_| not_found_or_unauthorized())?;

    let text = body
        .map(web::Json::into_inner)
        .unwrap_or_default()
        .into_text();

    let comment = store
        .update_owned(&comment_id, &user.id, text)
        .await
        .map_err(|e| store_failure("update_comment", UPDATE_FAILED, e))?
        .ok_or_else(not_found_or_unauthorized)?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// Delete one of the caller's comments
/// DELETE /api/comments/{id}
pub async fn delete_comment(
    user: AuthenticatedUser,
    store: web::Data<dyn CommentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let comment_id =
        ObjectId::parse_str(path.into_inner()).map_err(|_| not_found_or_unauthorized())?;

    store
        .delete_owned(&comment_id, &user.id)
        .await
        .map_err(|e| store_failure("delete_comment", DELETE_FAILED, e))?
        .ok_or_else(not_found_or_unauthorized)?;

    Ok(HttpResponse::Ok().json(json!({ "message": DELETED })))
}

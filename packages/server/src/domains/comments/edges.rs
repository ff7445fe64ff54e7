use axum::{extract::Path, http::StatusCode, Extension, Json};
use tracing::info;

use super::models::{Comment, CreateComment, UpdateComment};
use crate::common::auth::{Action, ResourceKind, Subject};
use crate::common::{CommentId, PostId};
use crate::kernel::Content;
use crate::server::app::AppState;
use crate::server::guard::{authorize, require_user};
use crate::server::ApiError;

pub async fn list_comments(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(post_id): Path<PostId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post = state.posts.get(post_id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::View, post.resource())?;
    authorize(&state, &subject, Action::View, ResourceKind::Comment)?;

    Ok(Json(state.comments.filter(|c| c.post_id == post_id).await))
}

pub async fn create_comment(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(post_id): Path<PostId>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let post = state.posts.get(post_id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::View, post.resource())?;
    authorize(&state, &subject, Action::Create, ResourceKind::Comment)?;
    let author_id = require_user(&subject)?;
    input.validate()?;

    let comment = state
        .comments
        .insert(input.into_comment(post_id, author_id))
        .await;

    // delete_post removes the post before sweeping its comments, so a post
    // still present here will take this comment with it.
    if state.posts.get(post_id).await.is_none() {
        state.comments.remove(comment.id).await;
        return Err(ApiError::NotFound);
    }

    info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update_comment(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<CommentId>,
    Json(input): Json<UpdateComment>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.comments.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Edit, comment.resource())?;
    input.validate()?;

    let comment = state
        .comments
        .update(id, |comment| input.apply(comment))
        .await
        .ok_or(ApiError::NotFound)?;
    info!(comment_id = %id, "Comment updated");
    Ok(Json(comment))
}

pub async fn delete_comment(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<CommentId>,
) -> Result<StatusCode, ApiError> {
    let comment = state.comments.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Delete, comment.resource())?;

    state.comments.remove(id).await;
    info!(comment_id = %id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

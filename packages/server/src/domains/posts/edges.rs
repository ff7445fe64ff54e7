use axum::{extract::Path, http::StatusCode, Extension, Json};
use tracing::info;

use super::models::{CreatePost, Post, UpdatePost};
use crate::common::auth::{Action, ResourceKind, Subject};
use crate::common::PostId;
use crate::kernel::Content;
use crate::server::app::AppState;
use crate::server::guard::{authorize, require_user};
use crate::server::ApiError;

pub async fn list_posts(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Vec<Post>>, ApiError> {
    authorize(&state, &subject, Action::View, ResourceKind::Post)?;
    let mut posts = state.posts.list().await;
    // Newest first
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(Json(posts))
}

pub async fn get_post(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<PostId>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::View, post.resource())?;
    Ok(Json(post))
}

pub async fn create_post(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    authorize(&state, &subject, Action::Create, ResourceKind::Post)?;
    let author_id = require_user(&subject)?;
    input.validate()?;

    let post = state.posts.insert(input.into_post(author_id)).await;
    info!(post_id = %post.id, author_id = %author_id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<PostId>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Edit, post.resource())?;
    input.validate()?;

    let post = state
        .posts
        .update(id, |post| input.apply(post))
        .await
        .ok_or(ApiError::NotFound)?;
    info!(post_id = %id, "Post updated");
    Ok(Json(post))
}

/// Deleting a post also drops its comments.
pub async fn delete_post(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    let post = state.posts.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Delete, post.resource())?;

    state.posts.remove(id).await;
    let comments = state.comments.remove_where(|c| c.post_id == id).await;
    info!(post_id = %id, comments_removed = comments, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

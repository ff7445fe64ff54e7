use axum::{extract::Path, http::StatusCode, Extension, Json};
use tracing::info;

use super::models::{Author, AuthorDetail, CreateAuthor, UpdateAuthor};
use crate::common::auth::{Action, ResourceKind, Subject};
use crate::common::AuthorId;
use crate::kernel::Content;
use crate::server::app::AppState;
use crate::server::guard::{authorize, require_user};
use crate::server::ApiError;

pub async fn list_authors(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Vec<Author>>, ApiError> {
    authorize(&state, &subject, Action::View, ResourceKind::Author)?;
    Ok(Json(state.authors.list().await))
}

/// One author with their books. The nested books are a separate collection,
/// so viewing them is checked on its own.
pub async fn get_author(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<AuthorId>,
) -> Result<Json<AuthorDetail>, ApiError> {
    let author = state.authors.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::View, author.resource())?;
    authorize(&state, &subject, Action::View, ResourceKind::Book)?;

    let books = state.books.filter(|b| b.author_id == id).await;
    Ok(Json(AuthorDetail { author, books }))
}

pub async fn create_author(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Json(input): Json<CreateAuthor>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    authorize(&state, &subject, Action::Create, ResourceKind::Author)?;
    let owner_id = require_user(&subject)?;
    input.validate()?;

    let author = state.authors.insert(input.into_author(owner_id)).await;
    info!(author_id = %author.id, owner_id = %owner_id, "Author created");
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update_author(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<AuthorId>,
    Json(input): Json<UpdateAuthor>,
) -> Result<Json<Author>, ApiError> {
    let author = state.authors.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Edit, author.resource())?;
    input.validate()?;

    let author = state
        .authors
        .update(id, |author| input.apply(author))
        .await
        .ok_or(ApiError::NotFound)?;
    info!(author_id = %id, "Author updated");
    Ok(Json(author))
}

/// Deleting an author also drops the books that credit them.
pub async fn delete_author(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<AuthorId>,
) -> Result<StatusCode, ApiError> {
    let author = state.authors.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Delete, author.resource())?;

    state.authors.remove(id).await;
    let books = state.books.remove_where(|b| b.author_id == id).await;
    info!(author_id = %id, books_removed = books, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}

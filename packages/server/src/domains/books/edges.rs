use axum::{extract::Path, http::StatusCode, Extension, Json};
use tracing::info;

use super::models::{Book, CreateBook, UpdateBook};
use crate::common::auth::{Action, ResourceKind, Subject};
use crate::common::{AuthorId, BookId, ValidationError};
use crate::kernel::Content;
use crate::server::app::AppState;
use crate::server::guard::{authorize, require_user};
use crate::server::ApiError;

pub async fn list_books(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Vec<Book>>, ApiError> {
    authorize(&state, &subject, Action::View, ResourceKind::Book)?;
    Ok(Json(state.books.list().await))
}

pub async fn get_book(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::View, book.resource())?;
    Ok(Json(book))
}

pub async fn create_book(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Json(input): Json<CreateBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    authorize(&state, &subject, Action::Create, ResourceKind::Book)?;
    let owner_id = require_user(&subject)?;
    input.validate()?;
    require_author(&state, input.author_id).await?;

    let book = state.books.insert(input.into_book(owner_id)).await;
    info!(book_id = %book.id, owner_id = %owner_id, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<BookId>,
    Json(input): Json<UpdateBook>,
) -> Result<Json<Book>, ApiError> {
    let book = state.books.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Edit, book.resource())?;
    input.validate()?;
    if let Some(author_id) = input.author_id {
        require_author(&state, author_id).await?;
    }

    let book = state
        .books
        .update(id, |book| input.apply(book))
        .await
        .ok_or(ApiError::NotFound)?;
    info!(book_id = %id, "Book updated");
    Ok(Json(book))
}

pub async fn delete_book(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<BookId>,
) -> Result<StatusCode, ApiError> {
    let book = state.books.get(id).await.ok_or(ApiError::NotFound)?;
    authorize(&state, &subject, Action::Delete, book.resource())?;

    state.books.remove(id).await;
    info!(book_id = %id, "Book deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Books must credit an author already in the catalogue.
async fn require_author(state: &AppState, author_id: AuthorId) -> Result<(), ApiError> {
    if state.authors.get(author_id).await.is_none() {
        return Err(ValidationError::new("author_id", "unknown author").into());
    }
    Ok(())
}

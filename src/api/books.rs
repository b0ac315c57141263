//! Book endpoints: listing, detail and the editing views

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetails, BookForm, BookUpdateForm},
        form::{self, FormOutcome},
        pagination::{BookPage, Page, PageQuery},
        user::{Caller, Permission},
    },
    AppState,
};

use super::{record_id, reject_form, render_form, see_other, ConfirmDelete, API_PREFIX};

fn book_url(id: i32) -> String {
    format!("{}/books/{}", API_PREFIX, id)
}

/// List books, a page at a time
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = BookPage),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Book>>> {
    let page = state.services.catalog.list_books(query.page.as_deref()).await?;
    Ok(Json(page))
}

/// Get a book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(record_id(&id, "Book")?).await?;
    Ok(Json(book))
}

/// Empty book form
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book form with initial values"),
        (status = 403, description = "Missing catalog.add_book")
    )
)]
pub async fn new_book(State(state): State<AppState>, caller: Caller) -> AppResult<Response> {
    caller.require(Permission::AddBook)?;
    Ok(render_form(state.services.catalog.new_book_form(), None::<Book>))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookForm,
    responses(
        (status = 303, description = "Created, redirect to the book"),
        (status = 403, description = "Missing catalog.add_book"),
        (status = 422, description = "Form rejected with field errors")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> AppResult<Response> {
    caller.require(Permission::AddBook)?;

    let form = match form::decode::<BookForm>(&body) {
        Ok(form) => form,
        Err((form, errors)) => return Ok(reject_form(form, None::<Book>, &errors)),
    };

    match state.services.catalog.create_book(&form).await? {
        FormOutcome::Saved(book) => Ok(see_other(book_url(book.id))),
        FormOutcome::Invalid(errors) => Ok(reject_form(form, None::<Book>, &errors)),
    }
}

/// Book form pre-filled from the stored book
#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form with current values"),
        (status = 403, description = "Missing catalog.change_book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Response> {
    caller.require(Permission::ChangeBook)?;
    let (book, form) = state.services.catalog.edit_book_form(record_id(&id, "Book")?).await?;
    Ok(render_form(form, Some(book)))
}

/// Update author, summary, genres and language of a book
#[utoipa::path(
    post,
    path = "/books/{id}/edit",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookUpdateForm,
    responses(
        (status = 303, description = "Updated, redirect to the book"),
        (status = 403, description = "Missing catalog.change_book"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Form rejected with field errors")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    caller.require(Permission::ChangeBook)?;
    let stored = state.services.catalog.book(record_id(&id, "Book")?).await?;

    let form = match form::decode::<BookUpdateForm>(&body) {
        Ok(form) => form,
        Err((form, errors)) => return Ok(reject_form(form, Some(stored), &errors)),
    };

    match state.services.catalog.update_book(stored.id, &form).await? {
        FormOutcome::Saved(book) => Ok(see_other(book_url(book.id))),
        FormOutcome::Invalid(errors) => Ok(reject_form(form, Some(stored), &errors)),
    }
}

/// Confirm deleting a book
#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book about to be deleted"),
        (status = 403, description = "Missing catalog.delete_book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn confirm_delete_book(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<ConfirmDelete<BookDetails>>> {
    caller.require(Permission::DeleteBook)?;
    let object = state.services.catalog.get_book(record_id(&id, "Book")?).await?;
    Ok(Json(ConfirmDelete { object }))
}

/// Delete a book that has no copies left
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the book list"),
        (status = 403, description = "Missing catalog.delete_book"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book still has copies")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Response> {
    caller.require(Permission::DeleteBook)?;
    state.services.catalog.delete_book(record_id(&id, "Book")?).await?;
    Ok(see_other(format!("{}/books", API_PREFIX)))
}

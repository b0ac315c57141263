//! Author endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetails, AuthorForm},
        form::{self, FormOutcome},
        pagination::{AuthorPage, Page, PageQuery},
        user::{Caller, Permission},
    },
    AppState,
};

use super::{record_id, reject_form, render_form, see_other, ConfirmDelete, API_PREFIX};

fn author_url(id: i32) -> String {
    format!("{}/authors/{}", API_PREFIX, id)
}

/// List authors by last name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of authors", body = AuthorPage),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Author>>> {
    let page = state.services.catalog.list_authors(query.page.as_deref()).await?;
    Ok(Json(page))
}

/// Get an author with their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state.services.catalog.get_author(record_id(&id, "Author")?).await?;
    Ok(Json(author))
}

#[utoipa::path(
    get,
    path = "/authors/new",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Author form with initial values"),
        (status = 403, description = "Missing catalog.add_author")
    )
)]
pub async fn new_author(caller: Caller) -> AppResult<Response> {
    caller.require(Permission::AddAuthor)?;
    Ok(render_form(AuthorForm::initial(), None::<Author>))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Created, redirect to the author"),
        (status = 403, description = "Missing catalog.add_author"),
        (status = 422, description = "Form rejected with field errors")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> AppResult<Response> {
    caller.require(Permission::AddAuthor)?;

    let form = match form::decode::<AuthorForm>(&body) {
        Ok(form) => form,
        Err((form, errors)) => return Ok(reject_form(form, None::<Author>, &errors)),
    };

    match state.services.catalog.create_author(&form).await? {
        FormOutcome::Saved(author) => Ok(see_other(author_url(author.id))),
        FormOutcome::Invalid(errors) => Ok(reject_form(form, None::<Author>, &errors)),
    }
}

#[utoipa::path(
    get,
    path = "/authors/{id}/edit",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form with current values"),
        (status = 403, description = "Missing catalog.change_author"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn edit_author(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Response> {
    caller.require(Permission::ChangeAuthor)?;
    let author = state.services.catalog.author(record_id(&id, "Author")?).await?;
    Ok(render_form(AuthorForm::from_author(&author), Some(author)))
}

/// Overwrite every field of an author
#[utoipa::path(
    post,
    path = "/authors/{id}/edit",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Updated, redirect to the author"),
        (status = 403, description = "Missing catalog.change_author"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Form rejected with field errors")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    caller.require(Permission::ChangeAuthor)?;
    let stored = state.services.catalog.author(record_id(&id, "Author")?).await?;

    let form = match form::decode::<AuthorForm>(&body) {
        Ok(form) => form,
        Err((form, errors)) => return Ok(reject_form(form, Some(stored), &errors)),
    };

    match state.services.catalog.update_author(stored.id, &form).await? {
        FormOutcome::Saved(author) => Ok(see_other(author_url(author.id))),
        FormOutcome::Invalid(errors) => Ok(reject_form(form, Some(stored), &errors)),
    }
}

#[utoipa::path(
    get,
    path = "/authors/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author about to be deleted"),
        (status = 403, description = "Missing catalog.delete_author"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn confirm_delete_author(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Json<ConfirmDelete<Author>>> {
    caller.require(Permission::DeleteAuthor)?;
    let object = state.services.catalog.author(record_id(&id, "Author")?).await?;
    Ok(Json(ConfirmDelete { object }))
}

/// Delete an author; their books are kept without an author
#[utoipa::path(
    post,
    path = "/authors/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the author list"),
        (status = 403, description = "Missing catalog.delete_author"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Response> {
    caller.require(Permission::DeleteAuthor)?;
    state.services.catalog.delete_author(record_id(&id, "Author")?).await?;
    Ok(see_other(format!("{}/authors", API_PREFIX)))
}

//! Loan endpoints: the borrower's own loans, the staff overview and renewal

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{LoanedCopy, RenewBookForm},
        form::{self, FormOutcome},
        pagination::{LoanPage, Page, PageQuery},
        user::{Caller, Permission},
    },
    AppState,
};

use super::{reject_form, render_form, see_other, LoginRequired, API_PREFIX};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// An id that is not a UUID cannot name a copy
fn parse_copy_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Book instance {} not found", raw)))
}

/// Copies on loan to the signed-in user
#[utoipa::path(
    get,
    path = "/loans/mine",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Caller's loans, soonest due first", body = LoanPage),
        (status = 303, description = "Not signed in, redirect to login"),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn my_loans(
    State(state): State<AppState>,
    LoginRequired(claims): LoginRequired,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<LoanedCopy>>> {
    let page = state
        .services
        .loans
        .borrowed_by(claims.user_id, query.page.as_deref(), today())
        .await?;
    Ok(Json(page))
}

/// Every copy on loan
#[utoipa::path(
    get,
    path = "/loans/all",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All loans, soonest due first", body = LoanPage),
        (status = 403, description = "Missing catalog.can_mark_returned"),
        (status = 404, description = "Invalid page")
    )
)]
pub async fn all_loans(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<LoanedCopy>>> {
    caller.require(Permission::CanMarkReturned)?;

    let page = state
        .services
        .loans
        .all_borrowed(query.page.as_deref(), today())
        .await?;
    Ok(Json(page))
}

/// Renewal form for a copy
#[utoipa::path(
    get,
    path = "/book-instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Renewal form proposing a new due date"),
        (status = 403, description = "Missing catalog.can_mark_returned"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn renewal_form(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> AppResult<Response> {
    caller.require(Permission::CanMarkReturned)?;
    let id = parse_copy_id(&id)?;

    let (copy, form) = state.services.loans.renewal_form(id, today()).await?;
    Ok(render_form(form, Some(copy)))
}

/// Set a new due date on a copy
#[utoipa::path(
    post,
    path = "/book-instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body = RenewBookForm,
    responses(
        (status = 303, description = "Renewed, redirect to all loans"),
        (status = 403, description = "Missing catalog.can_mark_returned"),
        (status = 404, description = "Book instance not found"),
        (status = 422, description = "Date rejected, nothing written")
    )
)]
pub async fn renew_book_instance(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    caller.require(Permission::CanMarkReturned)?;
    let id = parse_copy_id(&id)?;

    let form = match form::decode::<RenewBookForm>(&body) {
        Ok(form) => form,
        Err((form, errors)) => {
            let copy = state.services.loans.get_copy(id).await?;
            return Ok(reject_form(form, Some(copy), &errors));
        }
    };

    match state.services.loans.renew(id, &form, today()).await? {
        (_, FormOutcome::Saved(_)) => Ok(see_other(format!("{}/loans/all", API_PREFIX))),
        (copy, FormOutcome::Invalid(errors)) => Ok(reject_form(form, Some(copy), &errors)),
    }
}

//! API handlers for the Local Library REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod health;
pub mod home;
pub mod loans;
pub mod openapi;

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::ValidationErrors;

use crate::{
    error::AppError,
    models::{
        form,
        user::{Caller, UserClaims},
    },
    AppState,
};

/// Mount point of every versioned route
pub const API_PREFIX: &str = "/api/v1";

/// Resolve the caller from an optional bearer token.
/// No header means an anonymous caller; a bad token is rejected.
#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Caller::Anonymous);
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(Caller::User(claims))
    }
}

/// Extractor for views that need a signed-in user.
/// Anonymous callers are sent to the login page instead.
pub struct LoginRequired(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Caller::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?
        {
            Caller::User(claims) => Ok(LoginRequired(claims)),
            Caller::Anonymous => {
                let uri = parts
                    .extensions
                    .get::<OriginalUri>()
                    .map(|original| original.0.clone())
                    .unwrap_or_else(|| parts.uri.clone());
                let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
                Err(login_redirect(&state.config.auth.login_url, next).into_response())
            }
        }
    }
}

/// Integer id from the path. Anything but digits names no record.
pub fn record_id(raw: &str, kind: &str) -> Result<i32, AppError> {
    raw.bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| raw.parse::<i32>().ok())
        .flatten()
        .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", kind, raw)))
}

/// `303 See Other` to `location`
pub fn see_other(location: impl AsRef<str>) -> Response {
    Redirect::to(location.as_ref()).into_response()
}

pub fn login_redirect(login_url: &str, next: &str) -> Redirect {
    Redirect::to(&format!("{}?next={}", login_url, urlencoding::encode(next)))
}

/// A form as shown to the client: current values, the record it edits
/// and any field errors from the last submission
#[derive(Debug, Serialize)]
pub struct FormPage<F, O> {
    pub form: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<O>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Show a form with its initial values
pub fn render_form<F: Serialize, O: Serialize>(form: F, object: Option<O>) -> Response {
    Json(FormPage {
        form,
        object,
        errors: BTreeMap::new(),
    })
    .into_response()
}

/// Send a rejected submission back with its field errors
pub fn reject_form<F: Serialize, O: Serialize>(
    form: F,
    object: Option<O>,
    errors: &ValidationErrors,
) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(FormPage {
            form,
            object,
            errors: form::field_messages(errors),
        }),
    )
        .into_response()
}

/// Confirmation page shown before a delete
#[derive(Debug, Serialize)]
pub struct ConfirmDelete<O> {
    pub object: O,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        // Home
        .route("/index", get(home::index))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/edit", get(books::edit_book).post(books::update_book))
        .route("/books/:id/delete", get(books::confirm_delete_book).post(books::delete_book))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route("/authors/new", get(authors::new_author))
        .route("/authors/:id", get(authors::get_author))
        .route("/authors/:id/edit", get(authors::edit_author).post(authors::update_author))
        .route(
            "/authors/:id/delete",
            get(authors::confirm_delete_author).post(authors::delete_author),
        )
        // Loans
        .route("/loans/mine", get(loans::my_loans))
        .route("/loans/all", get(loans::all_loans))
        .route(
            "/book-instances/:id/renew",
            get(loans::renewal_form).post(loans::renew_book_instance),
        )
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, health, home, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "1.0.0",
        description = "Local library catalog REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Home
        home::index,
        // Books
        books::list_books,
        books::get_book,
        books::new_book,
        books::create_book,
        books::edit_book,
        books::update_book,
        books::confirm_delete_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::new_author,
        authors::create_author,
        authors::edit_author,
        authors::update_author,
        authors::confirm_delete_author,
        authors::delete_author,
        // Loans
        loans::my_loans,
        loans::all_loans,
        loans::renewal_form,
        loans::renew_book_instance,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Home
            home::HomePage,
            crate::services::catalog::CatalogCounts,
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::BookForm,
            crate::models::book::BookUpdateForm,
            crate::models::author::Author,
            crate::models::author::AuthorDetails,
            crate::models::author::AuthorForm,
            crate::models::genre::Genre,
            crate::models::pagination::BookPage,
            crate::models::pagination::AuthorPage,
            // Loans
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::LoanedCopy,
            crate::models::book_instance::RenewBookForm,
            crate::models::pagination::LoanPage,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "home", description = "Home page"),
        (name = "books", description = "Books"),
        (name = "authors", description = "Authors"),
        (name = "loans", description = "Loans and renewals")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

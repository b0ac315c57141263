//! Catalog service: books, authors and the home page counts

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDetails, AuthorForm},
        book::{Book, BookDetails, BookForm, BookUpdateForm},
        book_instance::LoanStatus,
        form::{self, FormOutcome},
        pagination::{Page, PageWindow},
    },
    repository::Repository,
};

/// Record counts shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.book_instances.count().await?,
            num_instances_available: self
                .repository
                .book_instances
                .count_with_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.genres.count().await?,
        })
    }

    /// Cheapest query that proves the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.genres.count().await?;
        Ok(())
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn list_books(&self, page: Option<&str>) -> AppResult<Page<Book>> {
        let total = self.repository.books.count().await?;
        let window = PageWindow::resolve(page, total, self.config.books_per_page)?;
        let books = self
            .repository
            .books
            .list(window.limit(), window.offset())
            .await?;
        Ok(window.into_page(books))
    }

    pub async fn book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.book(id).await?;
        let author = match book.author_id {
            Some(author_id) => self.repository.authors.get(author_id).await?,
            None => None,
        };
        let genres = self.repository.genres.list_for_book(id).await?;
        let copies = self.repository.book_instances.list_for_book(id).await?;

        Ok(BookDetails {
            book,
            author,
            genres,
            copies,
        })
    }

    pub fn new_book_form(&self) -> BookForm {
        BookForm::initial(&self.config.default_language)
    }

    pub async fn edit_book_form(&self, id: i32) -> AppResult<(Book, BookUpdateForm)> {
        let book = self.book(id).await?;
        let genres = self.repository.genres.list_for_book(id).await?;
        let form = BookUpdateForm::from_book(&book, &genres);
        Ok((book, form))
    }

    /// Author and genres must name stored records
    async fn check_references(
        &self,
        errors: &mut ValidationErrors,
        author: Option<i32>,
        genres: &[i32],
    ) -> AppResult<()> {
        if let Some(author_id) = author {
            if self.repository.authors.get(author_id).await?.is_none() {
                form::add_error(
                    errors,
                    "author",
                    "invalid_choice",
                    "Select a valid choice. That choice is not one of the available choices.",
                );
            }
        }

        if !genres.is_empty() {
            let found = self.repository.genres.find_many(genres).await?;
            if let Some(missing) = genres.iter().find(|id| !found.iter().any(|g| g.id == **id)) {
                form::add_error(
                    errors,
                    "genre",
                    "invalid_choice",
                    format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        missing
                    ),
                );
            }
        }

        Ok(())
    }

    pub async fn create_book(&self, submitted: &BookForm) -> AppResult<FormOutcome<Book>> {
        let cleaned = submitted.clean();
        let mut errors = cleaned.as_ref().err().cloned().unwrap_or_else(ValidationErrors::new);

        self.check_references(&mut errors, submitted.author, &submitted.genre)
            .await?;

        if let Ok(new_book) = &cleaned {
            if self.repository.books.isbn_taken(&new_book.isbn).await? {
                form::add_error(
                    &mut errors,
                    "isbn",
                    "unique",
                    "Book with this ISBN already exists.",
                );
            }
        }

        match cleaned {
            Ok(new_book) if !form::has_errors(&errors) => {
                let book = self.repository.books.create(&new_book).await?;
                tracing::info!("Created book id={} \"{}\"", book.id, book.title);
                Ok(FormOutcome::Saved(book))
            }
            _ => Ok(FormOutcome::Invalid(errors)),
        }
    }

    pub async fn update_book(
        &self,
        id: i32,
        submitted: &BookUpdateForm,
    ) -> AppResult<FormOutcome<Book>> {
        self.book(id).await?;

        let cleaned = submitted.clean();
        let mut errors = cleaned.as_ref().err().cloned().unwrap_or_else(ValidationErrors::new);

        self.check_references(&mut errors, submitted.author, &submitted.genre)
            .await?;

        match cleaned {
            Ok(changes) if !form::has_errors(&errors) => {
                let book = self
                    .repository
                    .books
                    .update(id, &changes)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
                tracing::info!("Updated book id={}", id);
                Ok(FormOutcome::Saved(book))
            }
            _ => Ok(FormOutcome::Invalid(errors)),
        }
    }

    /// Delete a book. Refused while copies of it exist.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.book(id).await?;

        let copies = self.repository.book_instances.list_for_book(id).await?;
        if !copies.is_empty() {
            return Err(AppError::Conflict(format!(
                "Book with id {} still has {} copies",
                id,
                copies.len()
            )));
        }

        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self, page: Option<&str>) -> AppResult<Page<Author>> {
        let total = self.repository.authors.count().await?;
        let window = PageWindow::resolve(page, total, self.config.authors_per_page)?;
        let authors = self
            .repository
            .authors
            .list(window.limit(), window.offset())
            .await?;
        Ok(window.into_page(authors))
    }

    pub async fn author(&self, id: i32) -> AppResult<Author> {
        self.repository
            .authors
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.author(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetails { author, books })
    }

    pub async fn create_author(&self, submitted: &AuthorForm) -> AppResult<FormOutcome<Author>> {
        match submitted.clean() {
            Ok(data) => {
                let author = self.repository.authors.create(&data).await?;
                tracing::info!("Created author id={} ({})", author.id, author.display_name());
                Ok(FormOutcome::Saved(author))
            }
            Err(errors) => Ok(FormOutcome::Invalid(errors)),
        }
    }

    pub async fn update_author(
        &self,
        id: i32,
        submitted: &AuthorForm,
    ) -> AppResult<FormOutcome<Author>> {
        self.author(id).await?;

        match submitted.clean() {
            Ok(data) => {
                let author = self
                    .repository
                    .authors
                    .update(id, &data)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;
                tracing::info!("Updated author id={}", id);
                Ok(FormOutcome::Saved(author))
            }
            Err(errors) => Ok(FormOutcome::Invalid(errors)),
        }
    }

    /// Delete an author; their books stay in the catalog without an author
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        if !self.repository.authors.delete(id).await? {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}

//! Book model, detail view and edit forms

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::{author::Author, book_instance::BookInstance, form, genre::Genre};

/// Book record (a title, not a physical copy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    /// 13 character ISBN
    pub isbn: String,
    pub language: String,
    pub author_id: Option<i32>,
}

/// Book with its author, genres and physical copies
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub copies: Vec<BookInstance>,
}

/// Book creation form as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters.")
    )]
    pub title: Option<String>,
    /// Author id
    pub author: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 1000, message = "Ensure this value has between 1 and 1000 characters.")
    )]
    pub summary: Option<String>,
    /// Genre ids
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub genre: Vec<i32>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 13, message = "Ensure this value has between 1 and 13 characters.")
    )]
    pub isbn: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters.")
    )]
    pub language: Option<String>,
}

/// Book update form: title and ISBN are fixed once created
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookUpdateForm {
    pub author: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 1000, message = "Ensure this value has between 1 and 1000 characters.")
    )]
    pub summary: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub genre: Vec<i32>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 200, message = "Ensure this value has between 1 and 200 characters.")
    )]
    pub language: Option<String>,
}

/// Cleaned fields of a new book
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub language: String,
    pub author_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

/// Cleaned fields replaced by an update
#[derive(Debug, Clone, PartialEq)]
pub struct BookChanges {
    pub summary: String,
    pub language: String,
    pub author_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn unique(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl form::SubmittedForm for BookForm {
    const FIELDS: &'static [&'static str] =
        &["title", "author", "summary", "genre", "isbn", "language"];
}

impl form::SubmittedForm for BookUpdateForm {
    const FIELDS: &'static [&'static str] = &["author", "summary", "genre", "language"];
}

impl BookForm {
    /// Empty creation form with the configured default language
    pub fn initial(default_language: &str) -> Self {
        Self {
            language: Some(default_language.to_string()),
            ..Self::default()
        }
    }

    /// Field checks that need no store access
    pub fn clean(&self) -> Result<NewBook, ValidationErrors> {
        let errors = form::derived_errors(self.validate());
        if form::has_errors(&errors) {
            return Err(errors);
        }

        Ok(NewBook {
            title: text(&self.title),
            summary: text(&self.summary),
            isbn: text(&self.isbn),
            language: text(&self.language),
            author_id: self.author,
            genre_ids: unique(&self.genre),
        })
    }
}

impl BookUpdateForm {
    /// Update form pre-filled from a stored book and its genres
    pub fn from_book(book: &Book, genres: &[Genre]) -> Self {
        Self {
            author: book.author_id,
            summary: Some(book.summary.clone()),
            genre: genres.iter().map(|g| g.id).collect(),
            language: Some(book.language.clone()),
        }
    }

    pub fn clean(&self) -> Result<BookChanges, ValidationErrors> {
        let errors = form::derived_errors(self.validate());
        if form::has_errors(&errors) {
            return Err(errors);
        }

        Ok(BookChanges {
            summary: text(&self.summary),
            language: text(&self.language),
            author_id: self.author,
            genre_ids: unique(&self.genre),
        })
    }
}

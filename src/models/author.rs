//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::{
    book::Book,
    form::{self, DATE_FORMAT},
};

/// Initial date of death shown on the author creation form
pub const INITIAL_DATE_OF_DEATH: &str = "2016-12-10";

/// Author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Last, First" as shown in listings
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Author with the books attributed to them
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

/// Author create/update form as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Ensure this value has between 1 and 100 characters.")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Ensure this value has between 1 and 100 characters.")
    )]
    pub last_name: Option<String>,
    /// YYYY-MM-DD, optional
    pub date_of_birth: Option<String>,
    /// YYYY-MM-DD, optional
    pub date_of_death: Option<String>,
}

/// Cleaned author fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorData {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl form::SubmittedForm for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "last_name", "date_of_birth", "date_of_death"];
}

impl AuthorForm {
    /// Empty creation form
    pub fn initial() -> Self {
        Self {
            date_of_death: Some(INITIAL_DATE_OF_DEATH.to_string()),
            ..Self::default()
        }
    }

    /// Update form pre-filled from an existing author
    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: Some(author.first_name.clone()),
            last_name: Some(author.last_name.clone()),
            date_of_birth: author.date_of_birth.map(|d| d.format(DATE_FORMAT).to_string()),
            date_of_death: author.date_of_death.map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }

    pub fn clean(&self) -> Result<AuthorData, ValidationErrors> {
        let mut errors = form::derived_errors(self.validate());
        let date_of_birth =
            form::parse_optional_date(&mut errors, "date_of_birth", self.date_of_birth.as_deref());
        let date_of_death =
            form::parse_optional_date(&mut errors, "date_of_death", self.date_of_death.as_deref());

        if form::has_errors(&errors) {
            return Err(errors);
        }

        Ok(AuthorData {
            first_name: self.first_name.clone().unwrap_or_default().trim().to_string(),
            last_name: self.last_name.clone().unwrap_or_default().trim().to_string(),
            date_of_birth,
            date_of_death,
        })
    }
}

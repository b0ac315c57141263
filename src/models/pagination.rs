//! Page-number pagination for the listing views

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

use super::{author::Author, book::Book, book_instance::LoanedCopy};

/// `?page=` query parameter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number starting at 1, or "last"
    pub page: Option<String>,
}

/// A resolved page: which slice of the ordered records to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub per_page: i64,
    pub num_pages: i64,
    pub total: i64,
}

impl PageWindow {
    /// Resolve the requested page against the record count.
    ///
    /// An empty first page is valid; any other page outside
    /// `1..=num_pages` is reported as not found.
    pub fn resolve(requested: Option<&str>, total: i64, per_page: i64) -> AppResult<Self> {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let num_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                AppError::NotFound("Invalid page: that page number is not an integer".to_string())
            })?,
        };

        if number < 1 || number > num_pages {
            return Err(AppError::NotFound(
                "Invalid page: that page contains no results".to_string(),
            ));
        }

        Ok(Self {
            number,
            per_page,
            num_pages,
            total,
        })
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T>
    where
        T: for<'a> ToSchema<'a>,
    {
        Page {
            items,
            total: self.total,
            page: self.number,
            per_page: self.per_page,
            num_pages: self.num_pages,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
        }
    }
}

/// One page of an ordered listing
#[derive(Debug, Serialize, ToSchema)]
#[aliases(BookPage = Page<Book>, AuthorPage = Page<Author>, LoanPage = Page<LoanedCopy>)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records on this page
    pub items: Vec<T>,
    /// Total number of records across all pages
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Maximum records per page
    pub per_page: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

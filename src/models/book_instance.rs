//! Book instance (physical copy) model, loan status and the renewal form

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

use super::form::{self, DATE_FORMAT};

/// Availability of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    /// Single character code stored in the database
    pub fn code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            other => Err(format!("Invalid loan status code: {}", other)),
        }
    }
}

// SQLx conversion for LoanStatus (CHAR(1) column)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.code(), buf)
    }
}

/// A physical copy of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

impl BookInstance {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_back.map(|due| due < today).unwrap_or(false)
    }
}

/// An on-loan copy as listed in the loan views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanedCopy {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub borrower_username: Option<String>,
    #[sqlx(skip)]
    pub is_overdue: bool,
}

/// Renewal form as submitted by staff
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RenewBookForm {
    /// New due date, YYYY-MM-DD
    pub renewal_date: Option<String>,
}

impl form::SubmittedForm for RenewBookForm {
    const FIELDS: &'static [&'static str] = &["renewal_date"];
}

impl RenewBookForm {
    /// Form pre-filled with the proposed due date
    pub fn initial(today: NaiveDate, proposed_days: i64) -> Self {
        let proposed = today + Duration::days(proposed_days);
        Self {
            renewal_date: Some(proposed.format(DATE_FORMAT).to_string()),
        }
    }

    /// Accept a date from `today` up to `max_days` ahead
    pub fn clean(&self, today: NaiveDate, max_days: i64) -> Result<NaiveDate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let date = form::parse_required_date(&mut errors, "renewal_date", self.renewal_date.as_deref());

        if let Some(date) = date {
            if date < today {
                form::add_error(
                    &mut errors,
                    "renewal_date",
                    "in_past",
                    "Invalid date - renewal in past",
                );
            } else if date > today + Duration::days(max_days) {
                form::add_error(
                    &mut errors,
                    "renewal_date",
                    "too_far",
                    format!(
                        "Invalid date - renewal more than {} weeks ahead",
                        max_days / 7
                    ),
                );
            }
        }

        match date {
            Some(date) if !form::has_errors(&errors) => Ok(date),
            _ => Err(errors),
        }
    }
}

//! Loan views and the renewal workflow

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, LoanedCopy, RenewBookForm},
        form::FormOutcome,
        pagination::{Page, PageWindow},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: CatalogConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Copies on loan to one borrower, soonest due first
    pub async fn borrowed_by(
        &self,
        user_id: i32,
        page: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Page<LoanedCopy>> {
        self.on_loan(Some(user_id), page, today).await
    }

    /// Every copy on loan, soonest due first
    pub async fn all_borrowed(&self, page: Option<&str>, today: NaiveDate) -> AppResult<Page<LoanedCopy>> {
        self.on_loan(None, page, today).await
    }

    async fn on_loan(
        &self,
        borrower_id: Option<i32>,
        page: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Page<LoanedCopy>> {
        let copies = &self.repository.book_instances;
        let total = copies.count_on_loan(borrower_id).await?;
        let window = PageWindow::resolve(page, total, self.config.loans_per_page)?;

        let mut loans = copies
            .list_on_loan(borrower_id, window.limit(), window.offset())
            .await?;
        for loan in &mut loans {
            loan.is_overdue = loan.due_back.map(|due| due < today).unwrap_or(false);
        }

        Ok(window.into_page(loans))
    }

    pub async fn get_copy(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository
            .book_instances
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Renewal form proposing the default extension
    pub async fn renewal_form(&self, id: Uuid, today: NaiveDate) -> AppResult<(BookInstance, RenewBookForm)> {
        let copy = self.get_copy(id).await?;
        Ok((copy, RenewBookForm::initial(today, self.config.renewal_proposed_days)))
    }

    /// Validate and apply a renewal. The copy is returned in both outcomes
    /// so the form can be shown again.
    pub async fn renew(
        &self,
        id: Uuid,
        submitted: &RenewBookForm,
        today: NaiveDate,
    ) -> AppResult<(BookInstance, FormOutcome<NaiveDate>)> {
        let mut copy = self.get_copy(id).await?;

        let due_back = match submitted.clean(today, self.config.renewal_max_days) {
            Ok(date) => date,
            Err(errors) => return Ok((copy, FormOutcome::Invalid(errors))),
        };

        if !self.repository.book_instances.set_due_back(id, due_back).await? {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        tracing::info!("Renewed book instance {} until {}", id, due_back);

        copy.due_back = Some(due_back);
        Ok((copy, FormOutcome::Saved(due_back)))
    }
}

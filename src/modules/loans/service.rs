use std::sync::Arc;

use biblio_db::{LoanKey, LoanRecord, LoanRepository, LoanStatus, StoreResult};
use time::Date;

/// Loan lifecycle: loans open on creation and close once, never reopen.
#[derive(Clone)]
pub struct LoanService {
    loans: Arc<dyn LoanRepository>,
}

impl LoanService {
    pub fn new(loans: Arc<dyn LoanRepository>) -> Self {
        Self { loans }
    }

    /// Loans of every customer and status ending strictly before `date`.
    pub async fn loans_ending_before(&self, date: Date) -> StoreResult<Vec<LoanRecord>> {
        self.loans.loans_ending_before(date).await
    }

    /// Open loans of the customer registered under `email`.
    pub async fn open_loans_for_customer(&self, email: &str) -> StoreResult<Vec<LoanRecord>> {
        self.loans
            .loans_for_customer(email.trim(), LoanStatus::Open)
            .await
    }

    /// Open a loan. A key that already has an open loan is a
    /// [`biblio_db::StoreError::Conflict`].
    pub async fn open(&self, key: LoanKey, begin: Date, end: Date) -> StoreResult<LoanRecord> {
        let record = self.loans.open_loan(key, begin, end).await?;
        tracing::info!(
            book_id = key.book_id,
            customer_id = key.customer_id,
            %begin,
            %end,
            "loan opened"
        );
        Ok(record)
    }

    /// Close the open loan for `key`; `Ok(None)` when nothing is open.
    pub async fn close(&self, key: LoanKey) -> StoreResult<Option<LoanRecord>> {
        let closed = self.loans.close_loan(key).await?;
        if closed.is_some() {
            tracing::info!(
                book_id = key.book_id,
                customer_id = key.customer_id,
                "loan closed"
            );
        }
        Ok(closed)
    }
}

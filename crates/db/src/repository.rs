//! Repository contracts consumed by the service layer.
//!
//! Uniqueness rules (book isbn, customer email, one open loan per
//! [`LoanKey`]) are enforced by the adapter inside the write itself, so
//! callers never pair a lookup with a separate insert.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::entities::{
    Book, BookId, Category, Customer, CustomerId, Loan, LoanKey, LoanRecord, LoanStatus, NewBook,
    NewCustomer,
};

/// Errors raised by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique business key is already taken.
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// A write referenced a record that does not exist.
    #[error("{entity} '{key}' does not exist")]
    MissingReference { entity: &'static str, key: String },
    /// A delete was refused because other records still point at the target.
    #[error("{entity} '{key}' is still referenced by {by}")]
    Referenced {
        entity: &'static str,
        key: String,
        by: &'static str,
    },
    /// The underlying storage failed independently of the request.
    #[error("store failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn missing(entity: &'static str, key: impl ToString) -> Self {
        Self::MissingReference {
            entity,
            key: key.to_string(),
        }
    }

    pub fn referenced(entity: &'static str, key: impl ToString, by: &'static str) -> Self {
        Self::Referenced {
            entity,
            key: key.to_string(),
            by,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a book, generating its id. Fails with [`StoreError::Conflict`]
    /// when the isbn is taken.
    async fn insert_book(&self, book: NewBook) -> StoreResult<Book>;

    /// Replace the fields of an existing book. `Ok(None)` when `id` is unknown.
    async fn update_book(&self, id: BookId, book: NewBook) -> StoreResult<Option<Book>>;

    /// Remove a book. `Ok(false)` when nothing was stored under `id`.
    async fn delete_book(&self, id: BookId) -> StoreResult<bool>;

    async fn find_book(&self, id: BookId) -> StoreResult<Option<Book>>;

    async fn find_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>>;

    /// Case-insensitive substring search on titles, ordered by id.
    async fn search_books_by_title(&self, fragment: &str) -> StoreResult<Vec<Book>>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by code.
    async fn all_categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert or relabel a category.
    async fn save_category(&self, category: Category) -> StoreResult<Category>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer. Fails with [`StoreError::Conflict`] when the email
    /// is taken.
    async fn insert_customer(&self, customer: NewCustomer) -> StoreResult<Customer>;

    /// Replace the fields of an existing customer. `Ok(None)` when `id` is
    /// unknown.
    async fn update_customer(
        &self,
        id: CustomerId,
        customer: NewCustomer,
    ) -> StoreResult<Option<Customer>>;

    async fn find_customer_by_email(&self, email: &str) -> StoreResult<Option<Customer>>;
}

#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Record a new open loan. Fails with [`StoreError::Conflict`] when the
    /// key already has an open loan, and with
    /// [`StoreError::MissingReference`] when the book or customer is unknown.
    async fn open_loan(&self, key: LoanKey, begin: Date, end: Date) -> StoreResult<LoanRecord>;

    /// Flip the open loan for `key` to closed. `Ok(None)` when none is open.
    async fn close_loan(&self, key: LoanKey) -> StoreResult<Option<LoanRecord>>;

    async fn find_open_loan(&self, key: LoanKey) -> StoreResult<Option<Loan>>;

    /// Loans of any status whose end date is strictly before `date`.
    async fn loans_ending_before(&self, date: Date) -> StoreResult<Vec<LoanRecord>>;

    /// Loans in `status` held by the customer registered under `email`.
    async fn loans_for_customer(
        &self,
        email: &str,
        status: LoanStatus,
    ) -> StoreResult<Vec<LoanRecord>>;
}

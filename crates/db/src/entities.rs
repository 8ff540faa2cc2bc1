//! Persistence entities.
//!
//! Relationships are stored as keys; readers join them back through the
//! repositories so a loan never owns a copy of its book or customer.

use std::fmt;

use time::Date;

/// Generated identifier of a [`Book`].
pub type BookId = i64;

/// Generated identifier of a [`Customer`].
pub type CustomerId = i64;

/// Book category, keyed by its business code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub code: String,
    pub label: String,
}

impl Category {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Stored book. `isbn` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
    pub category: Option<Category>,
}

/// Book fields accepted on insert, before an id is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    /// Code of an existing [`Category`].
    pub category_code: Option<String>,
}

/// Stored customer. `email` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Customer fields accepted on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Composite identity of a loan: which book went to which customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoanKey {
    pub book_id: BookId,
    pub customer_id: CustomerId,
}

impl LoanKey {
    pub const fn new(book_id: BookId, customer_id: CustomerId) -> Self {
        Self {
            book_id,
            customer_id,
        }
    }
}

impl fmt::Display for LoanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book {} / customer {}", self.book_id, self.customer_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanStatus {
    Open,
    Close,
}

impl LoanStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Open => "OPEN",
            LoanStatus::Close => "CLOSE",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub key: LoanKey,
    pub begin_date: Date,
    pub end_date: Date,
    pub status: LoanStatus,
}

impl Loan {
    /// A freshly granted loan. The status is always [`LoanStatus::Open`].
    pub const fn open(key: LoanKey, begin_date: Date, end_date: Date) -> Self {
        Self {
            key,
            begin_date,
            end_date,
            status: LoanStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == LoanStatus::Open
    }
}

/// A loan joined with the book and customer it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    pub loan: Loan,
    pub book: Book,
    pub customer: Customer,
}

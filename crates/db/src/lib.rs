//! Persistence layer for the library backend.
//!
//! Entities live in [`entities`], the repository contracts in [`repository`]
//! and the in-process store adapter in [`memory`]. The [`DbModule`] seeds the
//! store when the application boots.

pub mod entities;
pub mod memory;
pub mod module;
pub mod repository;
pub mod seed;

pub use entities::{
    Book, BookId, Category, Customer, CustomerId, Loan, LoanKey, LoanRecord, LoanStatus,
    NewBook, NewCustomer,
};
pub use memory::{MemoryStore, StoreStats};
pub use module::DbModule;
pub use repository::{
    BookRepository, CategoryRepository, CustomerRepository, LoanRepository, StoreError,
    StoreResult,
};

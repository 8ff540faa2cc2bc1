//! In-process store adapter.
//!
//! Every write takes the single table lock once, checks its uniqueness rule
//! and applies the mutation before releasing it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;

use crate::entities::{
    Book, BookId, Category, Customer, CustomerId, Loan, LoanKey, LoanRecord, LoanStatus, NewBook,
    NewCustomer,
};
use crate::repository::{
    BookRepository, CategoryRepository, CustomerRepository, LoanRepository, StoreError,
    StoreResult,
};

#[derive(Debug, Clone)]
struct BookRow {
    isbn: String,
    title: String,
    category_code: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    last_book_id: BookId,
    last_customer_id: CustomerId,
    books: BTreeMap<BookId, BookRow>,
    categories: BTreeMap<String, Category>,
    customers: BTreeMap<CustomerId, Customer>,
    loans: Vec<Loan>,
}

impl Tables {
    fn book(&self, id: BookId) -> Option<Book> {
        self.books.get(&id).map(|row| Book {
            id,
            isbn: row.isbn.clone(),
            title: row.title.clone(),
            category: row
                .category_code
                .as_ref()
                .and_then(|code| self.categories.get(code).cloned()),
        })
    }

    fn isbn_owner(&self, isbn: &str) -> Option<BookId> {
        self.books
            .iter()
            .find(|(_, row)| row.isbn == isbn)
            .map(|(id, _)| *id)
    }

    fn email_owner(&self, email: &str) -> Option<CustomerId> {
        self.customers
            .values()
            .find(|customer| customer.email.eq_ignore_ascii_case(email))
            .map(|customer| customer.id)
    }

    fn book_row(&self, book: NewBook) -> StoreResult<BookRow> {
        if let Some(code) = &book.category_code {
            if !self.categories.contains_key(code) {
                return Err(StoreError::missing("category", code));
            }
        }
        Ok(BookRow {
            isbn: book.isbn,
            title: book.title,
            category_code: book.category_code,
        })
    }

    fn record(&self, loan: &Loan) -> Option<LoanRecord> {
        let book = self.book(loan.key.book_id)?;
        let customer = self.customers.get(&loan.key.customer_id)?.clone();
        Some(LoanRecord {
            loan: loan.clone(),
            book,
            customer,
        })
    }

    fn records<'a>(&self, loans: impl Iterator<Item = &'a Loan>) -> Vec<LoanRecord> {
        loans.filter_map(|loan| self.record(loan)).collect()
    }
}

/// Row counts, reported when the store is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub books: usize,
    pub categories: usize,
    pub customers: usize,
    pub loans: usize,
}

/// Store adapter keeping every table in memory behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;
        StoreStats {
            books: tables.books.len(),
            categories: tables.categories.len(),
            customers: tables.customers.len(),
            loans: tables.loans.len(),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn insert_book(&self, book: NewBook) -> StoreResult<Book> {
        let mut tables = self.tables.write().await;
        if tables.isbn_owner(&book.isbn).is_some() {
            return Err(StoreError::conflict("book", "isbn", book.isbn));
        }
        let row = tables.book_row(book)?;

        tables.last_book_id += 1;
        let id = tables.last_book_id;
        tables.books.insert(id, row);

        tables
            .book(id)
            .ok_or_else(|| StoreError::missing("book", id))
    }

    async fn update_book(&self, id: BookId, book: NewBook) -> StoreResult<Option<Book>> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Ok(None);
        }
        if matches!(tables.isbn_owner(&book.isbn), Some(owner) if owner != id) {
            return Err(StoreError::conflict("book", "isbn", book.isbn));
        }
        let row = tables.book_row(book)?;
        tables.books.insert(id, row);

        Ok(tables.book(id))
    }

    async fn delete_book(&self, id: BookId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Ok(false);
        }
        if tables.loans.iter().any(|loan| loan.key.book_id == id) {
            return Err(StoreError::referenced("book", id, "loans"));
        }
        Ok(tables.books.remove(&id).is_some())
    }

    async fn find_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        Ok(self.tables.read().await.book(id))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.isbn_owner(isbn).and_then(|id| tables.book(id)))
    }

    async fn search_books_by_title(&self, fragment: &str) -> StoreResult<Vec<Book>> {
        let needle = fragment.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .filter(|(_, row)| row.title.to_lowercase().contains(&needle))
            .filter_map(|(id, _)| tables.book(*id))
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn all_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn save_category(&self, category: Category) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        tables
            .categories
            .insert(category.code.clone(), category.clone());
        Ok(category)
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn insert_customer(&self, customer: NewCustomer) -> StoreResult<Customer> {
        let mut tables = self.tables.write().await;
        if tables.email_owner(&customer.email).is_some() {
            return Err(StoreError::conflict("customer", "email", customer.email));
        }

        tables.last_customer_id += 1;
        let stored = Customer {
            id: tables.last_customer_id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        };
        tables.customers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        customer: NewCustomer,
    ) -> StoreResult<Option<Customer>> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&id) {
            return Ok(None);
        }
        if matches!(tables.email_owner(&customer.email), Some(owner) if owner != id) {
            return Err(StoreError::conflict("customer", "email", customer.email));
        }

        let stored = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        };
        tables.customers.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn find_customer_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .email_owner(email)
            .and_then(|id| tables.customers.get(&id).cloned()))
    }
}

#[async_trait]
impl LoanRepository for MemoryStore {
    async fn open_loan(&self, key: LoanKey, begin: Date, end: Date) -> StoreResult<LoanRecord> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&key.book_id) {
            return Err(StoreError::missing("book", key.book_id));
        }
        if !tables.customers.contains_key(&key.customer_id) {
            return Err(StoreError::missing("customer", key.customer_id));
        }
        if tables.loans.iter().any(|loan| loan.key == key && loan.is_open()) {
            return Err(StoreError::conflict("loan", "key", key.to_string()));
        }

        let loan = Loan::open(key, begin, end);
        tables.loans.push(loan.clone());
        tables
            .record(&loan)
            .ok_or_else(|| StoreError::missing("loan", key))
    }

    async fn close_loan(&self, key: LoanKey) -> StoreResult<Option<LoanRecord>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .loans
            .iter()
            .position(|loan| loan.key == key && loan.is_open())
        else {
            return Ok(None);
        };

        let mut closed = tables.loans[index].clone();
        closed.status = LoanStatus::Close;
        let record = tables
            .record(&closed)
            .ok_or_else(|| StoreError::missing("loan", key))?;
        tables.loans[index] = closed;
        Ok(Some(record))
    }

    async fn find_open_loan(&self, key: LoanKey) -> StoreResult<Option<Loan>> {
        let tables = self.tables.read().await;
        Ok(tables
            .loans
            .iter()
            .find(|loan| loan.key == key && loan.is_open())
            .cloned())
    }

    async fn loans_ending_before(&self, date: Date) -> StoreResult<Vec<LoanRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.records(tables.loans.iter().filter(|loan| loan.end_date < date)))
    }

    async fn loans_for_customer(
        &self,
        email: &str,
        status: LoanStatus,
    ) -> StoreResult<Vec<LoanRecord>> {
        let tables = self.tables.read().await;
        let Some(customer_id) = tables.email_owner(email) else {
            return Ok(Vec::new());
        };
        Ok(tables.records(
            tables
                .loans
                .iter()
                .filter(|loan| loan.key.customer_id == customer_id && loan.status == status),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn new_book(isbn: &str, title: &str) -> NewBook {
        NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            category_code: None,
        }
    }

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    async fn store_with_loan_parties() -> (MemoryStore, LoanKey) {
        let store = MemoryStore::new();
        let book = store.insert_book(new_book("111", "Dune")).await.unwrap();
        let customer = store
            .insert_customer(new_customer("ada@example.org"))
            .await
            .unwrap();
        (store, LoanKey::new(book.id, customer.id))
    }

    #[tokio::test]
    async fn insert_generates_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert_book(new_book("111", "Dune")).await.unwrap();
        let second = store.insert_book(new_book("222", "Emma")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_isbn_is_rejected_without_writing() {
        let store = MemoryStore::new();
        store.insert_book(new_book("111", "Dune")).await.unwrap();

        let err = store
            .insert_book(new_book("111", "Dune Messiah"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict { field: "isbn", .. }));
        assert_eq!(store.stats().await.books, 1);
        let kept = store.find_book_by_isbn("111").await.unwrap().unwrap();
        assert_eq!(kept.title, "Dune");
    }

    #[tokio::test]
    async fn books_resolve_their_category() {
        let store = MemoryStore::new();
        store
            .save_category(Category::new("SF", "Science fiction"))
            .await
            .unwrap();
        let book = store
            .insert_book(NewBook {
                category_code: Some("SF".to_string()),
                ..new_book("111", "Dune")
            })
            .await
            .unwrap();
        assert_eq!(book.category, Some(Category::new("SF", "Science fiction")));

        let err = store
            .insert_book(NewBook {
                category_code: Some("XX".to_string()),
                ..new_book("222", "Emma")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference { entity: "category", .. }));
    }

    #[tokio::test]
    async fn update_rejects_isbn_owned_by_another_book() {
        let store = MemoryStore::new();
        store.insert_book(new_book("111", "Dune")).await.unwrap();
        let emma = store.insert_book(new_book("222", "Emma")).await.unwrap();

        let err = store
            .update_book(emma.id, new_book("111", "Emma"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        let renamed = store
            .update_book(emma.id, new_book("222", "Emma (annotated)"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.title, "Emma (annotated)");
        assert!(store.update_book(99, new_book("333", "Ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn title_search_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        store.insert_book(new_book("111", "The Hobbit")).await.unwrap();
        store.insert_book(new_book("222", "Hobbit Tales")).await.unwrap();
        store.insert_book(new_book("333", "Emma")).await.unwrap();

        let hits = store.search_books_by_title("hOBBit").await.unwrap();
        let isbns: Vec<_> = hits.iter().map(|book| book.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["111", "222"]);
        assert!(store.search_books_by_title("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_refuses_books_with_loans() {
        let (store, key) = store_with_loan_parties().await;
        store
            .open_loan(key, date!(2024 - 01 - 01), date!(2024 - 01 - 15))
            .await
            .unwrap();

        let err = store.delete_book(key.book_id).await.unwrap_err();
        assert!(matches!(err, StoreError::Referenced { .. }));
        assert!(!store.delete_book(42).await.unwrap());

        let free = store.insert_book(new_book("999", "Loose")).await.unwrap();
        assert!(store.delete_book(free.id).await.unwrap());
        assert!(store.find_book(free.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn one_open_loan_per_key() {
        let (store, key) = store_with_loan_parties().await;
        let begin = date!(2024 - 01 - 01);
        let end = date!(2024 - 01 - 15);

        let record = store.open_loan(key, begin, end).await.unwrap();
        assert_eq!(record.loan.status, LoanStatus::Open);
        assert_eq!(record.customer.email, "ada@example.org");

        let err = store.open_loan(key, begin, end).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "loan", .. }));

        let closed = store.close_loan(key).await.unwrap().unwrap();
        assert_eq!(closed.loan.status, LoanStatus::Close);
        assert!(store.close_loan(key).await.unwrap().is_none());
        assert!(store.find_open_loan(key).await.unwrap().is_none());

        // history does not block a new loan of the same book to the same customer
        store.open_loan(key, begin, end).await.unwrap();
        assert_eq!(store.stats().await.loans, 2);
    }

    #[tokio::test]
    async fn open_loan_requires_existing_parties() {
        let (store, key) = store_with_loan_parties().await;
        let begin = date!(2024 - 01 - 01);
        let end = date!(2024 - 01 - 15);

        let err = store
            .open_loan(LoanKey::new(77, key.customer_id), begin, end)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::missing("book", 77));

        let err = store
            .open_loan(LoanKey::new(key.book_id, 88), begin, end)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::missing("customer", 88));
        assert_eq!(store.stats().await.loans, 0);
    }

    #[tokio::test]
    async fn loan_finders_filter_by_date_and_status() {
        let (store, key) = store_with_loan_parties().await;
        let other_book = store.insert_book(new_book("222", "Emma")).await.unwrap();
        let other_key = LoanKey::new(other_book.id, key.customer_id);

        store
            .open_loan(key, date!(2024 - 01 - 01), date!(2024 - 01 - 15))
            .await
            .unwrap();
        store
            .open_loan(other_key, date!(2024 - 02 - 01), date!(2024 - 02 - 20))
            .await
            .unwrap();
        store.close_loan(key).await.unwrap();

        let before = store.loans_ending_before(date!(2024 - 02 - 01)).await.unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].loan.key, key);
        // strictly before
        assert!(store
            .loans_ending_before(date!(2024 - 01 - 15))
            .await
            .unwrap()
            .is_empty());

        let open = store
            .loans_for_customer("ADA@example.org", LoanStatus::Open)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].loan.key, other_key);

        assert!(store
            .loans_for_customer("nobody@example.org", LoanStatus::Open)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn close_loan_leaves_the_loan_open_when_its_parties_are_gone() {
        let (store, key) = store_with_loan_parties().await;
        store
            .open_loan(key, date!(2024 - 01 - 01), date!(2024 - 01 - 15))
            .await
            .unwrap();
        store.tables.write().await.customers.clear();

        let err = store.close_loan(key).await.unwrap_err();

        assert!(matches!(err, StoreError::MissingReference { entity: "loan", .. }));
        assert!(store.find_open_loan(key).await.unwrap().is_some());
    }
}

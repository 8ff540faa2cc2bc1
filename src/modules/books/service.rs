use std::sync::Arc;

use biblio_db::{Book, BookId, BookRepository, NewBook, StoreResult};

/// Book catalogue operations.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// Register a new book. An isbn already in the catalogue is a
    /// [`biblio_db::StoreError::Conflict`] and nothing is written.
    pub async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let created = self.books.insert_book(book).await?;
        tracing::info!(book_id = created.id, isbn = %created.isbn, "book created");
        Ok(created)
    }

    /// `Ok(None)` when no book is stored under `id`.
    pub async fn update(&self, id: BookId, book: NewBook) -> StoreResult<Option<Book>> {
        let updated = self.books.update_book(id, book).await?;
        match &updated {
            Some(book) => tracing::info!(book_id = id, isbn = %book.isbn, "book updated"),
            None => tracing::debug!(book_id = id, "update skipped, unknown book"),
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: BookId) -> StoreResult<bool> {
        self.books.delete_book(id).await
    }

    /// Books whose title contains `fragment`, ignoring case. A blank
    /// fragment matches nothing.
    pub async fn search_by_title(&self, fragment: &str) -> StoreResult<Vec<Book>> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        self.books.search_books_by_title(fragment).await
    }

    pub async fn find_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        self.books.find_book_by_isbn(isbn.trim()).await
    }
}

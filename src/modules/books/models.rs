use biblio_db::{Book, BookId, NewBook};
use serde::{Deserialize, Serialize};

use crate::modules::categories::models::CategoryDto;

/// Book payload exchanged with clients.
///
/// On writes only the category `code` is used; the label always comes from
/// the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
    /// Generated identifier; absent on creation requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    /// Unique business key
    pub isbn: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            isbn: book.isbn,
            title: book.title,
            category: book.category.map(CategoryDto::from),
        }
    }
}

impl From<BookDto> for NewBook {
    fn from(dto: BookDto) -> Self {
        Self {
            isbn: dto.isbn.trim().to_string(),
            title: dto.title.trim().to_string(),
            category_code: dto.category.map(|category| category.code),
        }
    }
}

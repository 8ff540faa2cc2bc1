//! HTTP handlers for the book catalogue.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use biblio_db::BookId;
use biblio_http::{ApiJson, AppError, AppResult, Reply};
use serde::Deserialize;

use super::models::BookDto;
use super::service::BookService;
use crate::utils;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct IsbnQuery {
    pub isbn: String,
}

/// Routes of the books module, relative to its base path.
pub fn router(service: BookService) -> Router {
    Router::new()
        .route("/addBook", post(create_book))
        .route("/updateBook", put(update_book))
        .route("/deleteBook/{book_id}", delete(delete_book))
        .route("/searchByTitle", get(search_by_title))
        .route("/searchByIsbn", get(search_by_isbn))
        .route("/health", get(health_check))
        .with_state(service)
}

fn validate(request: &BookDto) -> AppResult<()> {
    utils::ensure_present(
        &[("isbn", &request.isbn), ("title", &request.title)],
        "book isbn and title are required",
    )
}

/// 201 with the stored book, 409 when the isbn is taken.
async fn create_book(
    State(service): State<BookService>,
    ApiJson(request): ApiJson<BookDto>,
) -> AppResult<Reply<BookDto>> {
    validate(&request)?;

    let book = service
        .create(request.into())
        .await
        .map_err(utils::store_error)?;

    Ok(Reply::Created(book.into()))
}

/// 200 with the updated book, 404 when the id matches nothing.
async fn update_book(
    State(service): State<BookService>,
    ApiJson(request): ApiJson<BookDto>,
) -> AppResult<Reply<BookDto>> {
    let Some(id) = request.id else {
        return Err(AppError::not_found("book id is missing"));
    };
    validate(&request)?;

    match service
        .update(id, request.into())
        .await
        .map_err(utils::store_error)?
    {
        Some(book) => Ok(Reply::Ok(book.into())),
        None => Err(AppError::not_found(format!("book '{}' does not exist", id))),
    }
}

/// Always answers 304; the actual outcome is only logged.
async fn delete_book(
    State(service): State<BookService>,
    Path(book_id): Path<BookId>,
) -> Reply<()> {
    match service.delete(book_id).await {
        Ok(true) => tracing::info!(book_id, "book deleted"),
        Ok(false) => tracing::info!(book_id, "delete requested for unknown book"),
        Err(err) => tracing::warn!(book_id, error = %err, "book kept"),
    }
    Reply::NotModified
}

async fn search_by_title(
    State(service): State<BookService>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Reply<Vec<BookDto>>> {
    let books = service
        .search_by_title(&query.title)
        .await
        .map_err(utils::store_error)?;

    Ok(Reply::non_empty(books.into_iter().map(BookDto::from).collect()))
}

async fn search_by_isbn(
    State(service): State<BookService>,
    Query(query): Query<IsbnQuery>,
) -> AppResult<Reply<BookDto>> {
    let book = service
        .find_by_isbn(&query.isbn)
        .await
        .map_err(utils::store_error)?;

    Ok(Reply::found(book.map(BookDto::from)))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

//! Book catalog endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    i18n::Message,
    models::book::{Book, BookPayload, BookQuery, BookSummary},
    AppState,
};

use super::response::ApiResponse;

/// `data` of the list response
#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// `data` of the detail response
#[derive(Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

/// `data` of the create response
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

fn malformed(state: &AppState, reason: impl std::fmt::Display) -> AppError {
    tracing::debug!("Rejected malformed request: {}", reason);
    AppError::BadRequest(state.services.books.locale().text(Message::MalformedBody).to_string())
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Book summaries, under `data`", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ApiResponse<BookList>> {
    // Listing never fails; an unreadable query string means no filters
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable query string: {}", e);
        Vec::new()
    });
    let query = BookQuery::from_pairs(pairs);
    let books = state.services.books.list(&query).await;
    Json(ApiResponse::data(StatusCode::OK, BookList { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Full book record, under `data`", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state.services.books.get_by_id(&book_id).await?;
    Ok(Json(ApiResponse::data(StatusCode::OK, BookDetail { book })))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added, new id under `data`", body = BookCreated),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 500, description = "Book could not be stored")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookCreated>>)> {
    let Json(payload) = payload.map_err(|e| malformed(&state, e))?;
    let book_id = state.services.books.create(payload).await?;

    let message = state.services.books.locale().text(Message::Added);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data_with_message(
            StatusCode::CREATED,
            message,
            BookCreated { book_id },
        )),
    ))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let Json(payload) = payload.map_err(|e| malformed(&state, e))?;
    state.services.books.update(&book_id, payload).await?;

    let message = state.services.books.locale().text(Message::Updated);
    Ok(Json(ApiResponse::message(StatusCode::OK, message)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete(&book_id).await?;

    let message = state.services.books.locale().text(Message::Deleted);
    Ok(Json(ApiResponse::message(StatusCode::OK, message)))
}

//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookPayload, BookQuery, BookSummary},
        envelope::{Envelope, MessageResponse},
    },
};

/// Data payload of a successful create
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    /// Id assigned to the new book
    pub book_id: String,
}

/// Data payload of a successful get
#[derive(Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Data payload of a successful list
#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Envelope<CreatedBook>),
        (status = 400, description = "Invalid input", body = MessageResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<Envelope<CreatedBook>>)> {
    let book_id = state.services.books.create_book(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success_with_message(
            "Book added successfully",
            CreatedBook { book_id },
        )),
    ))
}

/// List books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of matching books", body = Envelope<BookList>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> Json<Envelope<BookList>> {
    let books = state.services.books.list_books(&query);
    Json(Envelope::success(BookList { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book details", body = Envelope<BookData>),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<BookData>>> {
    let book = state.services.books.get_book(&id)?;
    Ok(Json(Envelope::success(BookData { book })))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update_book(&id, payload)?;
    Ok(Json(MessageResponse::success("Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_book(&id)?;
    Ok(Json(MessageResponse::success("Book deleted successfully")))
}

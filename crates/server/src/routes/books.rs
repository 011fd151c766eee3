use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::state::AppState;
use models::book;
use service::db::book_service::{self, AuthorCount, BookStats};

#[derive(Debug, Default, Deserialize)]
pub struct BookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Bookify API 📚",
        "endpoints": [
            "/books (GET, POST)",
            "/books/<id> (GET, PUT, DELETE)"
        ]
    }))
}

async fn get_books(State(state): State<AppState>) -> Result<Json<Vec<book::Model>>, ApiError> {
    Ok(Json(book_service::list_books(&state.db).await?))
}

/// Create a book; a missing body counts as missing required fields.
async fn add_book(
    State(state): State<AppState>,
    body: Option<Json<BookInput>>,
) -> Result<(StatusCode, Json<book::Model>), ApiError> {
    let Json(input) = body.unwrap_or_default();
    let created = book_service::create_book(
        &state.db,
        input.title.as_deref().unwrap_or_default(),
        input.author.as_deref().unwrap_or_default(),
        input.status.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<book::Model>, ApiError> {
    match book_service::get_book(&state.db, id).await? {
        Some(b) => Ok(Json(b)),
        None => Err(ApiError::not_found("Book not found")),
    }
}

/// Partial update: only supplied fields are overwritten.
async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Option<Json<BookInput>>,
) -> Result<Json<book::Model>, ApiError> {
    let Json(input) = body.unwrap_or_default();
    let updated = book_service::update_book(
        &state.db,
        id,
        input.title.as_deref(),
        input.author.as_deref(),
        input.status.as_deref(),
    )
    .await?;
    Ok(Json(updated))
}

async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if book_service::delete_book(&state.db, id).await? {
        Ok(Json(json!({"message": format!("Book {id} deleted successfully")})))
    } else {
        Err(ApiError::not_found("Book not found"))
    }
}

async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<book::Model>>, ApiError> {
    Ok(Json(book_service::search_books(&state.db, &params.q).await?))
}

async fn books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Json<Vec<book::Model>>, ApiError> {
    Ok(Json(book_service::books_by_author(&state.db, &author).await?))
}

async fn books_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<book::Model>>, ApiError> {
    Ok(Json(book_service::books_by_status(&state.db, &status).await?))
}

async fn mark_all_books_read(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let updated = book_service::mark_all_read(&state.db).await?;
    Ok(Json(json!({"message": format!("{updated} books marked as Read")})))
}

async fn book_stats(State(state): State<AppState>) -> Result<Json<BookStats>, ApiError> {
    Ok(Json(book_service::book_stats(&state.db).await?))
}

/// One uniformly chosen book; an empty shelf is a "none available" miss.
async fn random_book(State(state): State<AppState>) -> Result<Response, ApiError> {
    match book_service::random_book(&state.db).await? {
        Some(b) => Ok(Json(b).into_response()),
        None => Ok((StatusCode::NOT_FOUND, Json(json!({"message": "No books available"}))).into_response()),
    }
}

async fn top_authors(State(state): State<AppState>) -> Result<Json<Vec<AuthorCount>>, ApiError> {
    Ok(Json(book_service::top_authors(&state.db).await?))
}

async fn delete_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = book_service::delete_by_author(&state.db, &author).await?;
    Ok(Json(json!({"message": format!("{deleted} books deleted for author '{author}'")})))
}

async fn mark_author_books_read(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let updated = book_service::mark_author_read(&state.db, &author).await?;
    Ok(Json(json!({"message": format!("{updated} books by '{author}' marked as Read")})))
}

async fn export_books(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let books = book_service::list_books(&state.db).await?;
    Ok(Json(json!({
        "exported_count": books.len(),
        "books": books
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/books", get(get_books).post(add_book))
        .route("/books/search", get(search_books))
        .route("/books/stats", get(book_stats))
        .route("/books/random", get(random_book))
        .route("/books/top-authors", get(top_authors))
        .route("/books/export", get(export_books))
        .route("/books/mark_all_read", put(mark_all_books_read))
        .route("/books/status/:status", get(books_by_status))
        .route("/books/author/:author", get(books_by_author).delete(delete_books_by_author))
        .route("/books/author/:author/mark_read", put(mark_author_books_read))
        .route("/books/:id", get(get_book).put(update_book).delete(delete_book))
}

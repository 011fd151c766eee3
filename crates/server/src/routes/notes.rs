use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use sea_orm::Order;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::state::AppState;
use models::note;
use service::db::note_service::{self, NoteSummary, NoteWordCount};

#[derive(Debug, Default, Deserialize)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
struct DaysParams {
    days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SortParams {
    order: Option<String>,
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to NoteNest API 📝",
        "endpoints": [
            "/notes (GET, POST)",
            "/notes/<id> (GET, PUT, DELETE)"
        ]
    }))
}

/// All notes, newest first.
async fn get_notes(State(state): State<AppState>) -> Result<Json<Vec<note::Model>>, ApiError> {
    Ok(Json(note_service::list_notes(&state.db).await?))
}

async fn create_note(
    State(state): State<AppState>,
    body: Option<Json<NoteInput>>,
) -> Result<(StatusCode, Json<note::Model>), ApiError> {
    let Json(input) = body.unwrap_or_default();
    let created = note_service::create_note(
        &state.db,
        input.title.as_deref().unwrap_or_default(),
        input.content.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<note::Model>, ApiError> {
    match note_service::get_note(&state.db, id).await? {
        Some(n) => Ok(Json(n)),
        None => Err(ApiError::not_found("Note not found")),
    }
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Option<Json<NoteInput>>,
) -> Result<Json<note::Model>, ApiError> {
    let Json(input) = body.unwrap_or_default();
    let updated = note_service::update_note(
        &state.db,
        id,
        input.title.as_deref(),
        input.content.as_deref(),
    )
    .await?;
    Ok(Json(updated))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if note_service::delete_note(&state.db, id).await? {
        Ok(Json(json!({"message": format!("Note {id} deleted successfully")})))
    } else {
        Err(ApiError::not_found("Note not found"))
    }
}

async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<note::Model>>, ApiError> {
    Ok(Json(note_service::search_notes(&state.db, &params.q).await?))
}

/// Notes created within the last `days` days (default 7).
async fn recent_notes(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Result<Json<Vec<note::Model>>, ApiError> {
    let days = params.days.unwrap_or(7);
    Ok(Json(note_service::recent_notes(&state.db, days).await?))
}

async fn sorted_notes(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<note::Model>>, ApiError> {
    let order = match params.order.as_deref() {
        Some("asc") => Order::Asc,
        _ => Order::Desc,
    };
    Ok(Json(note_service::sorted_notes(&state.db, order).await?))
}

async fn note_wordcount(State(state): State<AppState>) -> Result<Json<NoteWordCount>, ApiError> {
    Ok(Json(note_service::note_wordcount(&state.db).await?))
}

async fn clear_all_notes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deleted = note_service::clear_all(&state.db).await?;
    Ok(Json(json!({"message": format!("{deleted} notes deleted")})))
}

async fn random_note(State(state): State<AppState>) -> Result<Response, ApiError> {
    match note_service::random_note(&state.db).await? {
        Some(n) => Ok(Json(n).into_response()),
        None => Ok((StatusCode::NOT_FOUND, Json(json!({"message": "No notes found"}))).into_response()),
    }
}

async fn note_summary(State(state): State<AppState>) -> Result<Json<NoteSummary>, ApiError> {
    Ok(Json(note_service::note_summary(&state.db).await?))
}

async fn notes_containing(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<note::Model>>, ApiError> {
    Ok(Json(note_service::notes_containing(&state.db, &keyword).await?))
}

/// Delete notes older than `days` days (default 30).
async fn cleanup_old_notes(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Result<Json<Value>, ApiError> {
    let days = params.days.unwrap_or(30);
    let deleted = note_service::cleanup_old_notes(&state.db, days).await?;
    Ok(Json(json!({"message": format!("{deleted} old notes deleted")})))
}

async fn export_notes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let notes = note_service::list_notes(&state.db).await?;
    Ok(Json(json!({
        "exported_count": notes.len(),
        "notes": notes
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/notes", get(get_notes).post(create_note))
        .route("/notes/search", get(search_notes))
        .route("/notes/recent", get(recent_notes))
        .route("/notes/sorted", get(sorted_notes))
        .route("/notes/wordcount", get(note_wordcount))
        .route("/notes/random", get(random_note))
        .route("/notes/summary", get(note_summary))
        .route("/notes/contains/:keyword", get(notes_containing))
        .route("/notes/clear_all", delete(clear_all_notes))
        .route("/notes/cleanup", delete(cleanup_old_notes))
        .route("/notes/export", get(export_notes))
        .route("/notes/:id", get(get_note).put(update_note).delete(delete_note))
}

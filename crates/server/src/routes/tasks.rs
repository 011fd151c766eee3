use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::state::AppState;
use models::task;
use service::db::task_service::{self, TaskStats};

#[derive(Debug, Default, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
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
struct ToggleAllParams {
    completed: Option<String>,
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to TaskFlow API ✅",
        "endpoints": [
            "/tasks (GET, POST)",
            "/tasks/<id> (GET, PUT, DELETE)"
        ]
    }))
}

async fn get_tasks(State(state): State<AppState>) -> Result<Json<Vec<task::Model>>, ApiError> {
    Ok(Json(task_service::list_tasks(&state.db).await?))
}

async fn create_task(
    State(state): State<AppState>,
    body: Option<Json<TaskInput>>,
) -> Result<(StatusCode, Json<task::Model>), ApiError> {
    let Json(input) = body.unwrap_or_default();
    let created = task_service::create_task(
        &state.db,
        input.title.as_deref().unwrap_or_default(),
        input.description.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<task::Model>, ApiError> {
    match task_service::get_task(&state.db, id).await? {
        Some(t) => Ok(Json(t)),
        None => Err(ApiError::not_found("Task not found")),
    }
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Option<Json<TaskInput>>,
) -> Result<Json<task::Model>, ApiError> {
    let Json(input) = body.unwrap_or_default();
    let updated = task_service::update_task(
        &state.db,
        id,
        input.title.as_deref(),
        input.description.as_deref(),
        input.completed,
    )
    .await?;
    Ok(Json(updated))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if task_service::delete_task(&state.db, id).await? {
        Ok(Json(json!({"message": format!("Task {id} deleted successfully")})))
    } else {
        Err(ApiError::not_found("Task not found"))
    }
}

async fn search_tasks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<task::Model>>, ApiError> {
    Ok(Json(task_service::search_tasks(&state.db, &params.q).await?))
}

async fn completed_tasks(State(state): State<AppState>) -> Result<Json<Vec<task::Model>>, ApiError> {
    Ok(Json(task_service::tasks_by_completed(&state.db, true).await?))
}

async fn pending_tasks(State(state): State<AppState>) -> Result<Json<Vec<task::Model>>, ApiError> {
    Ok(Json(task_service::tasks_by_completed(&state.db, false).await?))
}

async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let task = task_service::toggle_task(&state.db, id).await?;
    let label = if task.completed { "completed" } else { "incomplete" };
    Ok(Json(json!({
        "message": format!("Task {} marked as {label}", task.id),
        "task": task
    })))
}

async fn clear_completed_tasks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deleted = task_service::clear_completed(&state.db).await?;
    Ok(Json(json!({"message": format!("{deleted} completed tasks deleted")})))
}

async fn random_task(State(state): State<AppState>) -> Result<Response, ApiError> {
    match task_service::random_task(&state.db).await? {
        Some(t) => Ok(Json(t).into_response()),
        None => Ok((StatusCode::NOT_FOUND, Json(json!({"message": "No tasks found"}))).into_response()),
    }
}

async fn task_stats(State(state): State<AppState>) -> Result<Json<TaskStats>, ApiError> {
    Ok(Json(task_service::task_stats(&state.db).await?))
}

/// Tasks created within the last `days` days (default 7), newest first.
async fn recent_tasks(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Result<Json<Vec<task::Model>>, ApiError> {
    let days = params.days.unwrap_or(7);
    Ok(Json(task_service::recent_tasks(&state.db, days).await?))
}

async fn toggle_all_tasks(
    State(state): State<AppState>,
    Query(params): Query<ToggleAllParams>,
) -> Result<Json<Value>, ApiError> {
    let flag = params
        .completed
        .as_deref()
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(true);
    let updated = task_service::toggle_all(&state.db, flag).await?;
    let label = if flag { "completed" } else { "pending" };
    Ok(Json(json!({"message": format!("{updated} tasks marked as {label}")})))
}

async fn export_tasks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tasks = task_service::list_tasks(&state.db).await?;
    Ok(Json(json!({
        "exported_count": tasks.len(),
        "tasks": tasks
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/tasks", get(get_tasks).post(create_task))
        .route("/tasks/search", get(search_tasks))
        .route("/tasks/completed", get(completed_tasks))
        .route("/tasks/pending", get(pending_tasks))
        .route("/tasks/random", get(random_task))
        .route("/tasks/stats", get(task_stats))
        .route("/tasks/recent", get(recent_tasks))
        .route("/tasks/toggle_all", put(toggle_all_tasks))
        .route("/tasks/clear_completed", delete(clear_completed_tasks))
        .route("/tasks/:id/toggle", put(toggle_task))
        .route("/tasks/:id", get(get_task).put(update_task).delete(delete_task))
}

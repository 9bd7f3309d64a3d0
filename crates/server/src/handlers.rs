//! HTTP handlers for the todo API and the embedded UI page.
//!
//! Empty-title rejection lives here, at the presentation boundary; the
//! service layer persists whatever it is given.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use serde_json::{json, Value};

use doable_core::{Todo, TodoCreate, TodoUpdate};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// The single-page UI.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .service
        .database()
        .health_check()
        .await
        .map_err(|err| ApiError::health_check(err.to_string()))?;

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.service.list().await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<TodoCreate>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    if input.title.trim().is_empty() {
        return Err(ApiError::validation("title must not be empty"));
    }

    let todo = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo = state
        .service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("todo {id}")))?;
    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TodoUpdate>,
) -> ApiResult<Json<Todo>> {
    let todo = state
        .service
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("todo {id}")))?;
    Ok(Json(todo))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo = state
        .service
        .toggle(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("todo {id}")))?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("todo {id}")))
    }
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::linkmeta::{detect_url, is_metadata_supported};
use crate::models::{CreateTaskDto, Task};
use crate::state::AppState;

/// POST /classes/:class_id/tasks
///
/// Creates a task from free-form description text. If the description
/// contains a supported URL, its metadata is fetched and stored with the
/// task; a link that cannot be fetched still yields a record via the
/// fallback path, so task creation never fails because of a bad URL.
pub async fn create_task(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(dto): Json<CreateTaskDto>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if dto.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }

    let link = match detect_url(&dto.description) {
        Some(url) if is_metadata_supported(&url) => Some(state.fetcher.fetch(&url).await),
        _ => None,
    };

    let task = state.tasks.insert(class_id, dto.description, link);
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /classes/:class_id/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(class_id): Path<i64>,
) -> Json<Vec<Task>> {
    Json(state.tasks.list_by_class(class_id))
}

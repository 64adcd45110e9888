use async_log::Attr;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, UuidPath, ValidatedJson};

use super::TasksState;
use crate::models::{CreateTask, CreateTaskResponse, TaskListQuery, TaskResponse};
use crate::repository::TaskRepository;

/// List tasks with the given status
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks with the requested status", body = Vec<TaskResponse>),
        (status = 400, description = "Missing or unknown status"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskResponse>>, Response> {
    state.logger.info("Received request for GET /tasks", vec![]);

    let Query(query) = query.map_err(|e| AppError::from(e).into_response())?;

    let tasks = state.service.list_tasks(query.status).await.map_err(|e| {
        state.logger.error(
            "Handler: Failed to get tasks by status",
            Some(&e),
            vec![Attr::new("task.status", query.status)],
        );
        e.into_response()
    })?;

    state.logger.info("Successfully GET /tasks", vec![]);
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    id: Result<UuidPath, Response>,
) -> Result<Json<TaskResponse>, Response> {
    state.logger.info("Received request for GET /tasks/{id}", vec![]);

    let UuidPath(id) = id?;

    let task = state.service.get_task(id).await.map_err(|e| {
        // Not-found is already reported by the service.
        if !matches!(e, crate::TaskError::NotFound(_)) {
            state.logger.error(
                "Handler: Failed to get task by ID",
                Some(&e),
                vec![Attr::new("task.id", id)],
            );
        }
        e.into_response()
    })?;

    state.logger.info("Successfully GET /tasks/{id}", vec![]);
    Ok(Json(task.into()))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = CreateTaskResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(state): State<TasksState<R>>,
    payload: Result<ValidatedJson<CreateTask>, Response>,
) -> Result<impl IntoResponse, Response> {
    state.logger.info("Received request for POST /tasks", vec![]);

    let ValidatedJson(input) = payload?;

    let id = state.service.create_task(input).await.map_err(|e| {
        state.logger.error("Handler: Failed to create new task", Some(&e), vec![]);
        e.into_response()
    })?;

    state.logger.info("Successfully POST /tasks", vec![Attr::new("task.id", id)]);
    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

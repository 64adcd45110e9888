mod direct;

use async_log::AsyncLogger;
use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{CreateTask, CreateTaskResponse, TaskResponse, TaskStatus};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        direct::list_tasks,
        direct::get_task,
        direct::create_task,
    ),
    components(
        schemas(TaskResponse, CreateTask, CreateTaskResponse, TaskStatus)
    ),
    tags(
        (name = "tasks", description = "In-memory task tracking")
    )
)]
pub struct TasksApiDoc;

/// Shared handler state: the service plus the request-path logger
pub struct TasksState<R: TaskRepository> {
    service: Arc<TaskService<R>>,
    logger: AsyncLogger,
}

impl<R: TaskRepository> Clone for TasksState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            logger: self.logger.clone(),
        }
    }
}

/// Create the tasks router, meant to be nested under `/tasks`.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>, logger: AsyncLogger) -> Router {
    let state = TasksState {
        service: Arc::new(service),
        logger,
    };

    Router::new()
        .route("/", get(direct::list_tasks).post(direct::create_task))
        .route("/{id}", get(direct::get_task))
        .with_state(state)
}

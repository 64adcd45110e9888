use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskError {
    /// No task with this id was ever saved
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Infrastructure failure in the task store, with its context chain
    #[error("{0}")]
    Storage(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Prefix a storage failure with the operation that hit it.
    pub fn context(self, context: &str) -> Self {
        match self {
            TaskError::Storage(msg) => TaskError::Storage(format!("{}: {}", context, msg)),
            other => other,
        }
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

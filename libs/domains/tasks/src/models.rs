use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Task status
///
/// Wire names are `done`, `in-progress` and `created`; anything else,
/// including the empty string, fails to parse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    Done,
    InProgress,
    /// Freshly created, not started
    Created,
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, assigned by the service
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub status: TaskStatus,
}

/// Read DTO returned by the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

/// Body of a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskResponse {
    pub id: Uuid,
}

/// Query parameters for listing tasks
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// Required status filter
    pub status: TaskStatus,
}

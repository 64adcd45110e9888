use async_log::{AsyncLogger, Attr};
use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
///
/// Every operation reports entry, success and failure through the injected
/// [`AsyncLogger`]. Store failures are never retried.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
    logger: AsyncLogger,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            logger: self.logger.clone(),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: Arc<R>, logger: AsyncLogger) -> Self {
        Self { repository, logger }
    }

    /// Validate, assign a fresh id and store a new task.
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Uuid> {
        self.logger.info("Service: Creating a new task", vec![]);

        if let Err(e) = input.validate() {
            let err = TaskError::Validation(e.to_string());
            self.logger.error("Service: Invalid task input", Some(&err), vec![]);
            return Err(err);
        }

        let id = Uuid::new_v4();
        let task = Task {
            id,
            created_at: Utc::now(),
            title: input.title,
            description: input.description,
            status: input.status,
        };

        if let Err(err) = self.repository.save(task).await {
            let err = err.context("storage: save task");
            self.logger.error("Service: Failed to save task", Some(&err), vec![]);
            return Err(err);
        }

        self.logger.info(
            "Service: Successfully created a new task",
            vec![Attr::new("task.id", id)],
        );
        Ok(id)
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.logger.info(
            "Service: Getting task by ID",
            vec![Attr::new("task.id", id)],
        );

        let task = match self.repository.get_by_id(id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                let err = TaskError::NotFound(id);
                self.logger.error(
                    "Service: Task not found by the given ID",
                    Some(&err),
                    vec![Attr::new("task.id", id)],
                );
                return Err(err);
            }
            Err(err) => {
                let err = err.context("storage: get task by id");
                self.logger.error(
                    "Service: Failed to get task by ID",
                    Some(&err),
                    vec![Attr::new("task.id", id)],
                );
                return Err(err);
            }
        };

        self.logger.info(
            "Service: Successfully got task by ID",
            vec![Attr::new("task.id", id)],
        );
        Ok(task)
    }

    /// List every task with the given status
    #[instrument(skip(self), fields(task_status = %status))]
    pub async fn list_tasks(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        self.logger.info(
            "Service: Getting tasks by status",
            vec![Attr::new("task.status", status)],
        );

        let tasks = self.repository.get_by_status(status).await.map_err(|err| {
            let err = err.context("storage: get tasks by status");
            self.logger.error("Service: Failed to get tasks by status", Some(&err), vec![]);
            err
        })?;

        self.logger.info(
            "Service: Successfully got tasks by status",
            vec![
                Attr::new("task.status", status),
                Attr::new("count", tasks.len()),
            ],
        );
        Ok(tasks)
    }
}

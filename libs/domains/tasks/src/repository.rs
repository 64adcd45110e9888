use async_log::{AsyncLogger, Attr};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{Task, TaskStatus};

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert or overwrite the task stored under `task.id`
    async fn save(&self, task: Task) -> TaskResult<()>;

    /// Get a task by ID. `Ok(None)` means it was never saved.
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// Snapshot of every task with the given status, in no particular order
    async fn get_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>>;
}

/// Task Store backed by one coarse reader/writer lock over the whole map.
///
/// Readers run concurrently; a writer excludes everyone. Nothing is awaited
/// while the lock is held, and log events are emitted after it is released.
#[derive(Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
    logger: AsyncLogger,
}

impl InMemoryTaskRepository {
    pub fn new(logger: AsyncLogger) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            logger,
        }
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: Task) -> TaskResult<()> {
        let id = task.id;
        self.logger
            .info("Storage: Save task", vec![Attr::new("task.id", id)]);

        self.tasks.write().await.insert(id, task);

        self.logger.info(
            "Storage: Successfully saved task",
            vec![Attr::new("task.id", id)],
        );
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        self.logger
            .info("Storage: Get task by ID", vec![Attr::new("task.id", id)]);

        let task = self.tasks.read().await.get(&id).cloned();

        if task.is_some() {
            self.logger.info(
                "Storage: Successfully got task by ID",
                vec![Attr::new("task.id", id)],
            );
        }
        Ok(task)
    }

    async fn get_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        self.logger.info(
            "Storage: Get tasks by status",
            vec![Attr::new("task.status", status)],
        );

        let matching: Vec<Task> = {
            let tasks = self.tasks.read().await;
            tasks
                .values()
                .filter(|task| task.status == status)
                .cloned()
                .collect()
        };

        self.logger.info(
            "Storage: Successfully got tasks by status",
            vec![Attr::new("task.status", status)],
        );
        Ok(matching)
    }
}

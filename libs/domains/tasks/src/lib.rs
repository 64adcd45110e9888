//! Tasks Domain
//!
//! In-memory task tracking with request-path logging through the async log
//! pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP mapping, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Id generation, validation, logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Task Store (trait + RwLock implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_log::AsyncLogger;
//! use domain_tasks::{InMemoryTaskRepository, TaskService, handlers};
//!
//! let logger = AsyncLogger::new(1024);
//! let repository = Arc::new(InMemoryTaskRepository::new(logger.clone()));
//! let service = TaskService::new(repository, logger.clone());
//! let router = handlers::router(service, logger);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::TasksApiDoc;
pub use models::{CreateTask, CreateTaskResponse, Task, TaskListQuery, TaskResponse, TaskStatus};
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;

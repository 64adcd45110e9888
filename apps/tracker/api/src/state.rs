//! Shared application state.

use async_log::AsyncLogger;
use domain_tasks::InMemoryTaskRepository;
use std::sync::Arc;

/// State handed to the app-level routers. Every field is a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Request-path logger, shared with the tasks domain
    pub logger: AsyncLogger,
    /// Task Store, shared with the tasks domain
    pub tasks: Arc<InMemoryTaskRepository>,
}

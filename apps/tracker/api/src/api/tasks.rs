use axum::Router;
use domain_tasks::{TaskService, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let service = TaskService::new(Arc::clone(&state.tasks), state.logger.clone());
    handlers::router(service, state.logger.clone())
}

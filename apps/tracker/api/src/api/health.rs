//! Readiness check over the log pipeline and the task store.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Ready while the log pipeline accepts records and the task store answers.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "logger",
            Box::pin(async {
                if state.logger.is_stopped() {
                    Err("async logger stopped".to_string())
                } else {
                    Ok(())
                }
            }),
        ),
        (
            "task_store",
            Box::pin(async {
                // A read round-trip proves the lock is not wedged.
                state.tasks.len().await;
                Ok(())
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

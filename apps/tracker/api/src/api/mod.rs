use axum::{Router, routing::get};
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod tasks;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/tasks", tasks::router(state))
}

/// Creates the `/ready` router backed by the logger and task store checks.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The full application: `/api/*`, OpenAPI, `/health` and `/ready`.
pub fn app(state: AppState) -> Router {
    create_router::<ApiDoc>(routes(&state))
        .merge(health_router(state.config.app.clone()))
        .merge(ready_router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use async_log::AsyncLogger;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, logger::LoggerConfig, server::ServerConfig};
    use domain_tasks::InMemoryTaskRepository;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let logger = AsyncLogger::new(64);
        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                logger: LoggerConfig::default(),
                environment: Environment::Development,
            },
            tasks: Arc::new(InMemoryTaskRepository::new(logger.clone())),
            logger,
        }
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_tasks_are_mounted_under_api() {
        let state = state();
        let app = app(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title":"t","description":"d","status":"created"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.tasks.len().await, 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tasks?status=created")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_health_reports_app_name() {
        let response = app(state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "tracker_api");
    }

    #[tokio::test]
    async fn test_ready_turns_unavailable_after_logger_stop() {
        let state = state();
        let ready = || Request::builder().uri("/ready").body(Body::empty()).unwrap();

        let response = app(state.clone()).oneshot(ready()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        state.logger.stop().await;

        let response = app(state).oneshot(ready()).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["logger"], "failing");
    }

    #[tokio::test]
    async fn test_openapi_lists_task_paths() {
        let response = app(state())
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"].as_object().unwrap().keys().any(|p| p.starts_with("/tasks")));
    }
}

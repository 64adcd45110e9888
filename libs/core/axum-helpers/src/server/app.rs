use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use axum::{Json, Router, routing::get};
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Serves `router` until the coordinator signals shutdown.
///
/// Installs the SIGINT/SIGTERM listener on the coordinator, so an external
/// `coordinator.shutdown()` and an OS signal end the server the same way.
/// In-flight requests are allowed to finish.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails
/// while running.
///
/// # Example
/// ```ignore
/// let coordinator = ShutdownCoordinator::default();
/// serve(router, &ServerConfig::default(), coordinator).await?;
/// ```
pub async fn serve(
    router: Router,
    server_config: &ServerConfig,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinator.cancelled())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Server stopped accepting connections");
    Ok(())
}

/// Combines API routes with the cross-cutting layers.
///
/// - API routes nested under `/api`
/// - OpenAPI document at `/api-docs/openapi.json`
/// - JSON 404 fallback
/// - Request tracing and response compression
///
/// Health endpoints are merged by the app with [`health_router`](super::health_router).
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/tasks", tasks_router);
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
}

//! # Axum Helpers
//!
//! Shared HTTP plumbing for the tracker services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health/readiness endpoints, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_router, serve, ShutdownCoordinator};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new());
//!     let coordinator = ShutdownCoordinator::default();
//!     serve(router, &ServerConfig::default(), coordinator).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_router, health_router,
    run_health_checks, serve,
};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

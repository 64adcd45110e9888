//! Router assembly, health checks and graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;

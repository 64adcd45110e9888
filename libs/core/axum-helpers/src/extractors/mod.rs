//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with an [`AppError`](crate::errors::AppError)
//! response so every 4xx body has the same shape.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;

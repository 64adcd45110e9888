//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
///
/// A malformed id is a client error (400), never a 404.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_task(UuidPath(id): UuidPath) -> String {
///     format!("Task ID: {}", id)
/// }
///
/// let app = Router::new().route("/tasks/{id}", get(get_task));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        Uuid::parse_str(&id)
            .map(UuidPath)
            .map_err(|e| AppError::from(e).into_response())
    }
}

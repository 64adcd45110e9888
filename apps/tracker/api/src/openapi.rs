use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Tracker API",
        version = "0.1.0",
        description = "In-memory task tracking"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::TasksApiDoc)
    )
)]
pub struct ApiDoc;

use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::ToSchema;

/// Create a router to serve health checks.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/info", get(build_info))
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct Health {
    status: &'static str,
    message: &'static str,
}

/// Health endpoint for monitoring and load balancers. Always a 200 OK while
/// the webserver is up and running.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = OK, description = "Check if service is alive", body = Health))
)]
pub async fn health() -> Json<Health> {
    tracing::debug!("Service is alive");
    Json(Health {
        status: "OK",
        message: "Server is running",
    })
}

#[derive(serde::Serialize, ToSchema)]
pub struct BuildInfo<'a> {
    name: &'a str,
    version: &'a str,
}

/// Endpoint to get current information about the server's version.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/api/health/info",
    responses(
        (status = OK, description = "Build info for this service", body = BuildInfo)
    )
)]
pub async fn build_info<'a>() -> Json<BuildInfo<'a>> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

use axum::{http::StatusCode, response::IntoResponse, Json};

pub mod contact;
pub mod docs;
pub mod health;

/// Single-message JSON body shared by the plain status responses.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ApiMessage {
    message: &'static str,
}

impl ApiMessage {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Catch-all for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ApiMessage::new("Route not found")))
}

pub mod configuration;
mod domain;
mod email_client;
mod error;
mod extract;
mod rate_limit;
mod relay;
mod routes;
mod state;
pub mod telemetry;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware, Router, Server,
};
use configuration::{Environment, Settings};
use rate_limit::FixedWindowLimiter;
use relay::NotificationRelay;
use state::AppState;
use std::{
    any::Any,
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, request_id::MakeRequestUuid, ServiceBuilderExt,
};

/// Request bodies above this size are rejected before deserialization.
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug)]
pub struct App;

impl App {
    /// Serve this app on the given [`TcpListener`].
    pub async fn serve(host: TcpListener, settings: Settings) -> anyhow::Result<()> {
        tracing::info!("Server running at {}", host.local_addr()?);
        let relay = NotificationRelay::new(settings.email.clone());
        let app_state = AppState::create(relay);
        let router = Self::build_router(&app_state, &settings)?;

        Server::from_tcp(host)?
            .serve(router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
        Ok(())
    }

    /// Build the router for the application.
    fn build_router(app_state: &AppState, settings: &Settings) -> anyhow::Result<Router> {
        use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
        use tracing::Level;

        let limiter = Arc::new(FixedWindowLimiter::new(
            settings.rate_limit.window(),
            settings.rate_limit.max_requests,
        ));

        let cors = CorsLayer::new()
            .allow_origin(
                settings
                    .application
                    .cors_origin
                    .parse::<HeaderValue>()
                    .context("Invalid CORS origin")?,
            )
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        let router = Router::new()
            .nest("/api/health", routes::health::create_router())
            .nest("/api/contact", routes::contact::create_router())
            .nest("/api/docs", routes::docs::create_router())
            .fallback(routes::not_found)
            .with_state(app_state.clone())
            .layer(
                ServiceBuilder::new()
                    .set_x_request_id(MakeRequestUuid)
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                            .on_request(DefaultOnRequest::new().level(Level::INFO))
                            .on_response(DefaultOnResponse::new().level(Level::INFO)),
                    )
                    .propagate_x_request_id()
                    .layer(CatchPanicLayer::custom(panic_response(
                        settings.application.environment,
                    )))
                    .layer(middleware::from_fn_with_state(limiter, rate_limit::enforce))
                    .layer(cors)
                    .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
            );

        Ok(router)
    }
}

#[derive(Debug, serde::Serialize)]
struct ServerErrorBody {
    message: &'static str,
    error: String,
}

/// Outermost error handler: any panic escaping the stack becomes a 500.
/// The underlying message is only exposed outside production.
fn panic_response(
    environment: Environment,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> axum::http::Response<axum::body::Full<axum::body::Bytes>>
       + Clone {
    move |panic| {
        let detail = if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown error".to_string()
        };
        tracing::error!(panic = %detail, "Unhandled panic while serving a request");

        let error = if environment.is_production() {
            "Internal server error".to_string()
        } else {
            detail
        };
        let body = serde_json::to_vec(&ServerErrorBody {
            message: "Something went wrong!",
            error,
        })
        .unwrap_or_default();

        axum::http::Response::builder()
            .status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Full::from(body))
            .expect("response to always be valid at this point")
    }
}

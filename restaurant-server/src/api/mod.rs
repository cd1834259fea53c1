//! HTTP API
//!
//! Every module exposes a public `router()` and/or an `admin_router()`.
//! [`build_router`] wraps the admin routers in the bearer-token check;
//! [`build_app`] adds the tower-http stack and the state.
//!
//! - [`health`] - liveness probe
//! - [`auth`] - admin login and session
//! - [`menu`] - menu browsing and management
//! - [`orders`] - order placement and status changes
//! - [`reservations`] - table reservations
//! - [`reviews`] - review submission and moderation
//! - [`tables`] - dining tables
//! - [`stats`] - dashboard aggregates
//! - [`upload`] - image upload
//! - [`data`] - raw data export, backup and reset

pub mod extract;

pub mod auth;
pub mod data;
pub mod health;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod reviews;
pub mod stats;
pub mod tables;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::services::image_store::MAX_IMAGE_SIZE;
use crate::utils::AppError;

/// Room for multipart framing around a maximum-size image
const BODY_LIMIT: usize = MAX_IMAGE_SIZE + 1024 * 1024;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes; admin routes require a valid bearer token
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    let admin = Router::new()
        .merge(auth::admin_router())
        .merge(menu::admin_router())
        .merge(orders::admin_router())
        .merge(reservations::admin_router())
        .merge(reviews::admin_router())
        .merge(tables::admin_router())
        .merge(stats::admin_router())
        .merge(upload::admin_router())
        .merge(data::admin_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(reservations::router())
        .merge(reviews::router())
        .merge(admin)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Fully configured application: routes, middleware and state
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: &ServerState) -> Router {
    build_router(state)
        .nest_service("/uploads", ServeDir::new(state.config.uploads_dir()))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone())
}

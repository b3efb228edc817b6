//! HTTP route table.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Banner
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (pings the store)
//!
//! # Customers
//! POST   /api/customers       - Create a customer
//! GET    /api/customers       - List customers (?limit=&offset=)
//! GET    /api/customers/{id}  - Get a customer (array of 0 or 1 rows)
//! PUT    /api/customers/{id}  - Update a customer
//! DELETE /api/customers/{id}  - Delete a customer (echoes the id)
//! ```

pub mod customers;
pub mod system;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::delete),
        )
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::banner))
        .route("/health", get(system::health))
        .route("/health/ready", get(system::readiness))
        .nest("/api/customers", customer_routes())
}

/// Build the complete application: routes, request tracing and state.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

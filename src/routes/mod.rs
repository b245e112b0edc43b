pub mod chart;
pub mod dashboard;
pub mod health;
pub mod layout;

use axum::{
    Router,
    routing::{get, post},
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::chart::{ChartSpecification, ChartView, Pane, Series, XRange};
use crate::common::AppState;
use crate::dashboard::{Component, DashboardSnapshot, Layout, SelectionEvent, SelectionState};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        layout::get_layout,
        layout::get_layout_component,
        chart::get_chart,
        chart::post_selection,
        chart::stream_snapshots,
    ),
    components(
        schemas(
            Layout,
            Component,
            DashboardSnapshot,
            SelectionState,
            SelectionEvent,
            ChartView,
            ChartSpecification,
            Pane,
            Series,
            XRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Dashboard layout, selection and chart"),
    ),
    info(
        title = "Sensor Dashboard API",
        description = "Interactive time-series dashboard for multi-sensor telemetry",
        version = "0.1.0"
    )
)]
struct ApiDoc;

/// Requests handled at once; they all queue on the dashboard lock anyway
const MAX_CONCURRENT_API_REQUESTS: usize = 64;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(layout::get_layout))
        .route("/layout/{component_id}", get(layout::get_layout_component))
        .route("/chart", get(chart::get_chart))
        .route("/selection", post(chart::post_selection))
        .route("/stream", get(chart::stream_snapshots))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_API_REQUESTS))
        .layer(RequestBodyLimitLayer::new(64 * 1024)); // 64KB body limit

    // Health check and page routes
    let page_routes = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Combine all routes
    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

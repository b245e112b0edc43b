use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{Stream, StreamExt, wrappers::WatchStream};

use crate::common::AppState;
use crate::dashboard::{DashboardSnapshot, SelectionEvent};
use crate::error::{AppError, AppResult};

/// Get the current chart
///
/// Returns the selection together with the chart rendered for it. A failed
/// render is reported in the chart's `status` field, not as an HTTP error.
#[utoipa::path(
    get,
    path = "/api/chart",
    responses(
        (status = 200, description = "Chart retrieved successfully", body = DashboardSnapshot),
    ),
    tag = "dashboard"
)]
pub async fn get_chart(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.lock().await.snapshot())
}

/// Apply a selection change
///
/// Accepts one control event (sensor, range start or range end) and returns
/// the re-rendered chart. Out-of-bounds dates are clamped.
#[utoipa::path(
    post,
    path = "/api/selection",
    request_body = SelectionEvent,
    responses(
        (status = 200, description = "Selection applied", body = DashboardSnapshot),
        (status = 400, description = "Unknown sensor or malformed event"),
    ),
    tag = "dashboard"
)]
pub async fn post_selection(
    State(state): State<AppState>,
    event: Result<Json<SelectionEvent>, JsonRejection>,
) -> AppResult<Json<DashboardSnapshot>> {
    let Json(event) = event.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut dashboard = state.dashboard.lock().await;
    let snapshot = dashboard.apply(event)?;
    Ok(Json(snapshot))
}

/// Stream chart updates
///
/// Server-sent events; one `snapshot` event per render, starting with the
/// current one.
#[utoipa::path(
    get,
    path = "/api/stream",
    responses(
        (status = 200, description = "Event stream of snapshots", content_type = "text/event-stream"),
    ),
    tag = "dashboard"
)]
pub async fn stream_snapshots(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.dashboard.lock().await.subscribe();

    let stream = WatchStream::new(rx)
        .map(|snapshot| Event::default().event("snapshot").json_data(&snapshot));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

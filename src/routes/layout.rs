use axum::{
    Json,
    extract::{Path, State},
};

use crate::common::AppState;
use crate::dashboard::{Component, Layout};
use crate::error::{AppError, AppResult};

/// Get the dashboard layout
///
/// Returns the declarative page description for the current selection.
#[utoipa::path(
    get,
    path = "/api/layout",
    responses(
        (status = 200, description = "Layout retrieved successfully", body = Layout),
    ),
    tag = "dashboard"
)]
pub async fn get_layout(State(state): State<AppState>) -> Json<Layout> {
    Json(state.dashboard.lock().await.layout())
}

/// Get a single layout component by id
#[utoipa::path(
    get,
    path = "/api/layout/{component_id}",
    params(
        ("component_id" = String, Path, description = "Component id, e.g. `sensor` or `selected-range`"),
    ),
    responses(
        (status = 200, description = "Component retrieved successfully", body = Component),
        (status = 404, description = "No component with this id"),
    ),
    tag = "dashboard"
)]
pub async fn get_layout_component(
    State(state): State<AppState>,
    Path(component_id): Path<String>,
) -> AppResult<Json<Component>> {
    let layout = state.dashboard.lock().await.layout();

    layout
        .find(&component_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Component '{component_id}' not found")))
}

//! Data Routes
//!
//! JSON views of the aggregates, the presentation status, and standalone
//! SVG charts. All of them answer 503 when the dataset failed to load.
//!
//! - GET /api/v1/states - Sorted state names
//! - GET /api/v1/national - National totals by date
//! - GET /api/v1/snapshot - Per-state totals at the latest date
//! - GET /api/v1/states/:state/series - One state's records
//! - GET /api/v1/scene - Current scene status
//! - GET /api/v1/charts/:index?state=NAME - A scene's chart as SVG

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::aggregate::{latest_state_snapshot, national_series, state_series, StateSnapshot};
use crate::scenes::{render_scene, Scene};
use super::scene_index;
use crate::web::dto::{
    ChartParams, ChartSummary, NationalResponse, SceneStatusResponse, SeriesResponse,
    StatesResponse,
};
use crate::web::error::{WebError, WebResult};
use crate::web::state::AppState;

/// GET /api/v1/states
pub async fn list_states(State(state): State<Arc<AppState>>) -> WebResult<Json<StatesResponse>> {
    let dataset = state.dataset()?;
    let states = dataset.state_names().to_vec();

    Ok(Json(StatesResponse {
        total: states.len(),
        states,
    }))
}

/// GET /api/v1/national
pub async fn national(State(state): State<Arc<AppState>>) -> WebResult<Json<NationalResponse>> {
    let points = national_series(state.dataset()?);

    Ok(Json(NationalResponse {
        total: points.len(),
        points,
    }))
}

/// GET /api/v1/snapshot
pub async fn snapshot(State(state): State<Arc<AppState>>) -> WebResult<Json<StateSnapshot>> {
    Ok(Json(latest_state_snapshot(state.dataset()?)))
}

/// GET /api/v1/states/:state/series
pub async fn series(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> WebResult<Json<SeriesResponse>> {
    let dataset = state.dataset()?;
    if !dataset.has_state(&name) {
        return Err(WebError::NotFound(format!("State '{}' not in dataset", name)));
    }

    let records = state_series(dataset, &name);
    Ok(Json(SeriesResponse {
        state: name,
        total: records.len(),
        records,
    }))
}

/// GET /api/v1/scene
pub async fn scene_status(
    State(state): State<Arc<AppState>>,
) -> WebResult<Json<SceneStatusResponse>> {
    state.dataset()?;

    let presentation = state.presentation().await;
    let controller = presentation
        .controller
        .as_ref()
        .ok_or_else(|| WebError::Internal("Scene controller missing".to_string()))?;
    let scene = controller.scene();
    let page = &presentation.page;

    Ok(Json(SceneStatusResponse {
        index: scene.index(),
        scene,
        indicator: page.indicator().to_string(),
        narration: page.narration().to_string(),
        has_previous: page.previous_enabled(),
        has_next: page.next_enabled(),
        selected_state: controller.selected_state().map(str::to_string),
        chart: page.chart().map(|chart| ChartSummary {
            kind: chart.kind,
            title: chart.title.clone(),
            markers: chart.markers.len(),
        }),
    }))
}

/// GET /api/v1/charts/:index
///
/// Renders a scene's chart without touching the presentation. The index is
/// clamped like navigation; the detail chart uses `?state=` or the first
/// state.
pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    Query(params): Query<ChartParams>,
) -> WebResult<impl IntoResponse> {
    let index = scene_index(&raw)?;
    let dataset = state.dataset()?;

    let chart = render_scene(dataset, Scene::clamped(index), params.state.as_deref())
        .ok_or_else(|| match &params.state {
            Some(name) => WebError::NotFound(format!("State '{}' not in dataset", name)),
            None => WebError::NotFound("No states in dataset".to_string()),
        })?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], chart.to_svg()))
}

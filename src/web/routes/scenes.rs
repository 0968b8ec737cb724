//! Scene Routes
//!
//! The presentation page and the events that drive it.
//!
//! - GET / - Current page
//! - GET /scene/:index - Go to a scene (clamped)
//! - GET /nav/next - Next scene
//! - GET /nav/prev - Previous scene
//! - GET /select?state=NAME - Change the selected state
//!
//! Event routes redirect back to `/` so a reload never replays an event.
//! After a load failure they are accepted and ignored.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use std::sync::Arc;

use super::scene_index;
use crate::web::dto::SelectParams;
use crate::web::error::WebResult;
use crate::web::state::AppState;

/// GET /
pub async fn page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.presentation().await.render())
}

/// GET /scene/:index
pub async fn goto(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> WebResult<Redirect> {
    let index = scene_index(&raw)?;
    let mut guard = state.presentation().await;
    let presentation = &mut *guard;
    if let Some(controller) = presentation.controller.as_mut() {
        let scene = controller.goto(index, &mut presentation.page);
        tracing::info!(requested = index, scene = scene.index(), "Scene change");
    }
    Ok(Redirect::to("/"))
}

/// GET /nav/next
pub async fn next(State(state): State<Arc<AppState>>) -> Redirect {
    let mut guard = state.presentation().await;
    let presentation = &mut *guard;
    if let Some(controller) = presentation.controller.as_mut() {
        let scene = controller.next(&mut presentation.page);
        tracing::info!(scene = scene.index(), "Next scene");
    }
    Redirect::to("/")
}

/// GET /nav/prev
pub async fn previous(State(state): State<Arc<AppState>>) -> Redirect {
    let mut guard = state.presentation().await;
    let presentation = &mut *guard;
    if let Some(controller) = presentation.controller.as_mut() {
        let scene = controller.previous(&mut presentation.page);
        tracing::info!(scene = scene.index(), "Previous scene");
    }
    Redirect::to("/")
}

/// GET /select?state=NAME
pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectParams>,
) -> Redirect {
    let mut guard = state.presentation().await;
    let presentation = &mut *guard;
    if let Some(controller) = presentation.controller.as_mut() {
        if controller.select_state(&params.state, &mut presentation.page) {
            tracing::info!(state = %params.state, "State selected");
        }
    }
    Redirect::to("/")
}

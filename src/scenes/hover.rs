//! Marker hover handlers for the state-detail chart.
//!
//! The selected state is passed in explicitly so the handlers can be driven
//! without a live page.

use super::render::{MARKER_COLOR, MARKER_HOVER_COLOR};
use super::surface::Surface;
use super::Scene;
use crate::chart::Marker;
use crate::dataset::CaseRecord;
use crate::format::{format_count, format_date};

/// Narration shown while a marker is hovered
pub fn hover_narration(state: &str, record: &CaseRecord) -> String {
    format!(
        "On {}, {} had {} cases and {} deaths.",
        format_date(record.date),
        state,
        format_count(record.cases),
        format_count(record.deaths)
    )
}

/// Pointer entered a marker: report its record and highlight it
pub fn on_marker_enter<S: Surface + ?Sized>(surface: &mut S, state: &str, marker: &Marker) {
    surface.set_narration(&hover_narration(state, &marker.record));
    surface.set_marker_fill(marker.index, MARKER_HOVER_COLOR);
}

/// Pointer left a marker: restore the scene caption and marker colour
pub fn on_marker_leave<S: Surface + ?Sized>(surface: &mut S, marker: &Marker) {
    surface.set_narration(Scene::StateDetail.caption());
    surface.set_marker_fill(marker.index, MARKER_COLOR);
}

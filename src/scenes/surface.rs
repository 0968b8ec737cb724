//! UI Surface
//!
//! The five regions the scene controller drives: navigation controls,
//! position indicator, narration, chart container and selector container.

use super::render::StateSelector;
use crate::chart::Chart;
use crate::dataset::LoadError;

/// Mount points of the presentation page
pub trait Surface {
    /// Replace the scene-position indicator text
    fn set_indicator(&mut self, text: &str);

    /// Enable or disable the "previous" control
    fn set_previous_enabled(&mut self, enabled: bool);

    /// Enable or disable the "next" control
    fn set_next_enabled(&mut self, enabled: bool);

    /// Replace the narration text
    fn set_narration(&mut self, text: &str);

    /// Remove everything from the chart container
    fn clear_chart(&mut self);

    /// Place a chart into the (empty) chart container
    fn mount_chart(&mut self, chart: Chart);

    /// Remove the state selector control
    fn clear_selector(&mut self);

    /// Place a state selector into the selector container
    fn mount_selector(&mut self, selector: StateSelector);

    /// Recolour a marker of the mounted chart
    fn set_marker_fill(&mut self, marker: usize, fill: &str);
}

/// Show a dataset load failure instead of a blank page.
///
/// Both navigation controls are disabled; no scene is ever rendered.
pub fn report_load_failure<S: Surface + ?Sized>(surface: &mut S, error: &LoadError) {
    tracing::error!(error = %error, "Dataset failed to load");

    surface.clear_chart();
    surface.clear_selector();
    surface.set_indicator("Data unavailable");
    surface.set_previous_enabled(false);
    surface.set_next_enabled(false);
    surface.set_narration(&format!("Failed to load COVID-19 data: {}", error));
}

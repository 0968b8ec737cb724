//! Scene Controller
//!
//! Three-state machine over [`Scene`]s. A controller only exists once a
//! dataset has loaded, so no scene can render before data is available.
//!
//! Every transition, including one to the current scene, clears the chart
//! and selector regions, refreshes indicator, navigation controls and
//! narration, and then invokes the scene's renderer.

use std::sync::Arc;

use super::hover;
use super::render::{render_national, render_snapshot, render_state_detail, render_state_selector};
use super::surface::Surface;
use super::Scene;
use crate::aggregate::{latest_state_snapshot, national_series, state_series};
use crate::chart::Marker;
use crate::dataset::Dataset;

/// Navigation and selection state of the walkthrough
#[derive(Debug, Clone)]
pub struct SceneController {
    dataset: Arc<Dataset>,
    scene: Scene,
    selected_state: Option<String>,
    detail_markers: Vec<Marker>,
}

impl SceneController {
    /// Enter scene 0 for a freshly loaded dataset
    pub fn start<S: Surface + ?Sized>(dataset: Arc<Dataset>, surface: &mut S) -> Self {
        let mut controller = Self {
            dataset,
            scene: Scene::National,
            selected_state: None,
            detail_markers: Vec::new(),
        };
        controller.goto(0, surface);
        controller
    }

    /// Current scene
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// State shown in the detail chart, only set in [`Scene::StateDetail`]
    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Transition to a scene index, clamped into range, and re-render
    pub fn goto<S: Surface + ?Sized>(&mut self, target: i64, surface: &mut S) -> Scene {
        let scene = Scene::clamped(target);
        if scene.index() as i64 != target {
            tracing::debug!(target, clamped = scene.index(), "Scene index clamped");
        }

        self.scene = scene;
        self.selected_state = None;
        self.detail_markers.clear();

        surface.clear_chart();
        surface.clear_selector();
        surface.set_indicator(&scene.indicator());
        surface.set_previous_enabled(scene.has_previous());
        surface.set_next_enabled(scene.has_next());
        surface.set_narration(scene.caption());

        match scene {
            Scene::National => {
                surface.mount_chart(render_national(&national_series(&self.dataset)));
            }
            Scene::StateSnapshot => {
                surface.mount_chart(render_snapshot(&latest_state_snapshot(&self.dataset)));
            }
            Scene::StateDetail => {
                surface.mount_selector(render_state_selector(self.dataset.state_names()));

                match self.dataset.state_names().first().cloned() {
                    Some(state) => self.show_state(state, surface),
                    None => tracing::warn!("No states available for the detail scene"),
                }
            }
        }

        tracing::debug!(scene = scene.index(), "Scene rendered");
        scene
    }

    /// Advance one scene (stays on the last scene)
    pub fn next<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Scene {
        self.goto(self.scene.index() as i64 + 1, surface)
    }

    /// Go back one scene (stays on the first scene)
    pub fn previous<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Scene {
        self.goto(self.scene.index() as i64 - 1, surface)
    }

    /// State selector changed.
    ///
    /// Re-renders only the chart region. Ignored outside the detail scene
    /// and for states not in the dataset; returns whether it applied.
    pub fn select_state<S: Surface + ?Sized>(&mut self, state: &str, surface: &mut S) -> bool {
        if self.scene != Scene::StateDetail {
            tracing::debug!(state, "State selection outside the detail scene ignored");
            return false;
        }

        if !self.dataset.has_state(state) {
            tracing::warn!(state, "Unknown state selected");
            return false;
        }

        surface.clear_chart();
        self.show_state(state.to_string(), surface);
        true
    }

    /// Pointer entered the marker at `index` of the detail chart
    pub fn marker_enter<S: Surface + ?Sized>(&self, index: usize, surface: &mut S) -> bool {
        match self.hovered(index) {
            Some((state, marker)) => {
                hover::on_marker_enter(surface, state, marker);
                true
            }
            None => false,
        }
    }

    /// Pointer left the marker at `index` of the detail chart
    pub fn marker_leave<S: Surface + ?Sized>(&self, index: usize, surface: &mut S) -> bool {
        match self.hovered(index) {
            Some((_, marker)) => {
                hover::on_marker_leave(surface, marker);
                true
            }
            None => false,
        }
    }

    fn hovered(&self, index: usize) -> Option<(&str, &Marker)> {
        if self.scene != Scene::StateDetail {
            return None;
        }
        let state = self.selected_state.as_deref()?;
        let marker = self.detail_markers.get(index)?;
        Some((state, marker))
    }

    fn show_state<S: Surface + ?Sized>(&mut self, state: String, surface: &mut S) {
        let chart = render_state_detail(&state, &state_series(&self.dataset, &state));
        self.detail_markers = chart.markers.clone();
        self.selected_state = Some(state);
        surface.mount_chart(chart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::dataset::CaseRecord;
    use crate::scenes::render::{MARKER_COLOR, MARKER_HOVER_COLOR, NATIONAL_TITLE};
    use crate::scenes::surface::testing::{RecordingSurface, SurfaceEvent};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(vec![
            CaseRecord::new(date("2020-01-01"), "A", 10, 1),
            CaseRecord::new(date("2020-01-01"), "B", 5, 0),
            CaseRecord::new(date("2020-01-02"), "A", 20, 2),
            CaseRecord::new(date("2020-01-02"), "B", 15, 1),
        ]))
    }

    fn started() -> (SceneController, RecordingSurface) {
        let mut surface = RecordingSurface::default();
        let controller = SceneController::start(dataset(), &mut surface);
        (controller, surface)
    }

    #[test]
    fn test_start_renders_scene_zero() {
        let (controller, surface) = started();

        assert_eq!(controller.scene(), Scene::National);
        assert_eq!(
            surface.events,
            vec![
                SurfaceEvent::ClearChart,
                SurfaceEvent::ClearSelector,
                SurfaceEvent::Indicator("Scene 1 / 3".to_string()),
                SurfaceEvent::PreviousEnabled(false),
                SurfaceEvent::NextEnabled(true),
                SurfaceEvent::Narration(Scene::National.caption().to_string()),
                SurfaceEvent::MountChart(ChartKind::NationalLine, NATIONAL_TITLE.to_string()),
            ]
        );
    }

    #[test]
    fn test_goto_clamps() {
        let (mut controller, mut surface) = started();

        assert_eq!(controller.goto(99, &mut surface), Scene::StateDetail);
        assert_eq!(surface.indicator, "Scene 3 / 3");

        assert_eq!(controller.goto(-99, &mut surface), Scene::National);
        assert_eq!(surface.indicator, "Scene 1 / 3");
    }

    #[test]
    fn test_navigation_chrome_per_scene() {
        let (mut controller, mut surface) = started();
        assert!(!surface.previous_enabled);
        assert!(surface.next_enabled);

        controller.next(&mut surface);
        assert_eq!(controller.scene(), Scene::StateSnapshot);
        assert!(surface.previous_enabled);
        assert!(surface.next_enabled);

        controller.next(&mut surface);
        assert_eq!(controller.scene(), Scene::StateDetail);
        assert!(surface.previous_enabled);
        assert!(!surface.next_enabled);

        controller.next(&mut surface);
        assert_eq!(controller.scene(), Scene::StateDetail);

        controller.previous(&mut surface);
        controller.previous(&mut surface);
        controller.previous(&mut surface);
        assert_eq!(controller.scene(), Scene::National);
    }

    #[test]
    fn test_self_transition_rerenders() {
        let (mut controller, mut surface) = started();
        surface.take_events();

        controller.goto(0, &mut surface);

        let events = surface.take_events();
        assert_eq!(events.first(), Some(&SurfaceEvent::ClearChart));
        assert!(matches!(
            events.last(),
            Some(SurfaceEvent::MountChart(ChartKind::NationalLine, _))
        ));
    }

    #[test]
    fn test_snapshot_scene_title() {
        let (mut controller, mut surface) = started();
        controller.goto(1, &mut surface);

        let chart = surface.chart.as_ref().unwrap();
        assert_eq!(chart.kind, ChartKind::StateBars);
        assert_eq!(chart.title, "Total Cases by State (as of 1/2/2020)");
        assert!(surface.selector.is_none());
    }

    #[test]
    fn test_detail_scene_defaults_to_first_state() {
        let (mut controller, mut surface) = started();
        controller.goto(2, &mut surface);

        assert_eq!(controller.selected_state(), Some("A"));
        assert_eq!(surface.selector.as_ref().unwrap().options, vec!["A", "B"]);
        assert_eq!(
            surface.chart.as_ref().unwrap().title,
            "COVID-19 Cases in A Over Time"
        );
    }

    #[test]
    fn test_select_state_rerenders_chart_only() {
        let (mut controller, mut surface) = started();
        controller.goto(2, &mut surface);
        surface.take_events();

        assert!(controller.select_state("B", &mut surface));

        assert_eq!(
            surface.take_events(),
            vec![
                SurfaceEvent::ClearChart,
                SurfaceEvent::MountChart(
                    ChartKind::StateDetailLine,
                    "COVID-19 Cases in B Over Time".to_string()
                ),
            ]
        );
        assert_eq!(controller.selected_state(), Some("B"));
        assert_eq!(surface.selector.as_ref().unwrap().options, vec!["A", "B"]);

        let chart = surface.chart.as_ref().unwrap();
        let cases: Vec<i64> = chart.markers.iter().map(|m| m.record.cases).collect();
        assert_eq!(cases, vec![5, 15]);
    }

    #[test]
    fn test_reentering_detail_resets_selection() {
        let (mut controller, mut surface) = started();
        controller.goto(2, &mut surface);
        controller.select_state("B", &mut surface);

        controller.previous(&mut surface);
        assert_eq!(controller.selected_state(), None);

        controller.next(&mut surface);
        assert_eq!(controller.selected_state(), Some("A"));
    }

    #[test]
    fn test_unknown_state_is_noop() {
        let (mut controller, mut surface) = started();
        controller.goto(2, &mut surface);
        surface.take_events();

        assert!(!controller.select_state("Atlantis", &mut surface));
        assert!(surface.events.is_empty());
        assert_eq!(controller.selected_state(), Some("A"));
        assert_eq!(controller.scene(), Scene::StateDetail);
    }

    #[test]
    fn test_select_state_outside_detail_is_noop() {
        let (mut controller, mut surface) = started();
        surface.take_events();

        assert!(!controller.select_state("B", &mut surface));
        assert!(surface.events.is_empty());
    }

    #[test]
    fn test_hover_last_marker_then_leave() {
        let (mut controller, mut surface) = started();
        controller.goto(2, &mut surface);
        controller.select_state("B", &mut surface);

        let last = surface.chart.as_ref().unwrap().markers.len() - 1;

        assert!(controller.marker_enter(last, &mut surface));
        assert_eq!(surface.narration, "On 1/2/2020, B had 15 cases and 1 deaths.");
        assert_eq!(
            surface.chart.as_ref().unwrap().marker_fill(last),
            Some(MARKER_HOVER_COLOR)
        );

        assert!(controller.marker_leave(last, &mut surface));
        assert_eq!(surface.narration, Scene::StateDetail.caption());
        assert_eq!(surface.chart.as_ref().unwrap().marker_fill(last), Some(MARKER_COLOR));
    }

    #[test]
    fn test_hover_ignored_outside_detail() {
        let (controller, mut surface) = started();
        surface.take_events();

        assert!(!controller.marker_enter(0, &mut surface));
        assert!(surface.events.is_empty());
    }

    #[test]
    fn test_empty_dataset_navigates_safely() {
        let mut surface = RecordingSurface::default();
        let mut controller = SceneController::start(Arc::new(Dataset::default()), &mut surface);

        controller.goto(1, &mut surface);
        assert!(surface.chart.is_some());

        controller.goto(2, &mut surface);
        assert_eq!(controller.selected_state(), None);
        assert!(surface.selector.as_ref().unwrap().options.is_empty());
        assert!(surface.chart.is_none());

        controller.goto(0, &mut surface);
        assert_eq!(controller.scene(), Scene::National);
    }
}

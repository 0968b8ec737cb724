//! Scenes
//!
//! The three-scene walkthrough: scene identities and captions, the
//! [`SceneController`] state machine, the pure renderers, and the
//! [`Surface`] they draw onto.

pub mod controller;
pub mod hover;
pub mod render;
pub mod surface;

pub use controller::SceneController;
pub use hover::{hover_narration, on_marker_enter, on_marker_leave};
pub use render::{
    render_national, render_snapshot, render_state_detail, render_state_selector,
    StateSelector,
};
pub use surface::{report_load_failure, Surface};

use serde::Serialize;
use std::num::IntErrorKind;

use crate::aggregate::{latest_state_snapshot, national_series, state_series};
use crate::chart::Chart;
use crate::dataset::Dataset;

/// Number of scenes in the walkthrough
pub const SCENE_COUNT: usize = 3;

const DETAIL_CAPTION: &str = "Scene 3: Select a state to see its history, \
     explore COVID cases and deaths for the selected state";

/// One step of the walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// National cases over time
    National,
    /// Per-state totals at the latest date
    StateSnapshot,
    /// One state's history with a state picker
    StateDetail,
}

impl Scene {
    pub const ALL: [Scene; SCENE_COUNT] = [
        Scene::National,
        Scene::StateSnapshot,
        Scene::StateDetail,
    ];

    /// Scene for an arbitrary index, clamped into range
    pub fn clamped(target: i64) -> Scene {
        let index = target.clamp(0, SCENE_COUNT as i64 - 1) as usize;
        Self::ALL[index]
    }

    /// Zero-based position
    pub fn index(self) -> usize {
        match self {
            Scene::National => 0,
            Scene::StateSnapshot => 1,
            Scene::StateDetail => 2,
        }
    }

    /// Default narration text
    pub fn caption(self) -> &'static str {
        match self {
            Scene::National => "Scene 1: National COVID-19 case trends",
            Scene::StateSnapshot => "Scene 2: Total COVID cases by state",
            Scene::StateDetail => DETAIL_CAPTION,
        }
    }

    /// Position indicator, e.g. `Scene 2 / 3`
    pub fn indicator(self) -> String {
        format!("Scene {} / {}", self.index() + 1, SCENE_COUNT)
    }

    /// Whether the "previous" control is enabled
    pub fn has_previous(self) -> bool {
        self.index() > 0
    }

    /// Whether the "next" control is enabled
    pub fn has_next(self) -> bool {
        self.index() < SCENE_COUNT - 1
    }
}

/// Parse a requested scene index.
///
/// Integers too large for `i64` saturate so they still clamp to the first
/// or last scene. Returns `None` for text that is not an integer.
pub fn parse_scene_index(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(index) => Some(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Render one scene's chart outside the walkthrough.
///
/// The detail chart shows `state`, or the first state when `None`. Returns
/// `None` for a state not in the dataset or when there are no states.
pub fn render_scene(dataset: &Dataset, scene: Scene, state: Option<&str>) -> Option<Chart> {
    match scene {
        Scene::National => Some(render_national(&national_series(dataset))),
        Scene::StateSnapshot => Some(render_snapshot(&latest_state_snapshot(dataset))),
        Scene::StateDetail => {
            let state = match state {
                Some(name) if dataset.has_state(name) => name,
                Some(_) => return None,
                None => dataset.state_names().first()?.as_str(),
            };
            Some(render_state_detail(state, &state_series(dataset, state)))
        }
    }
}

//! Data Transfer Objects
//!
//! Request and response types for the HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::aggregate::NationalPoint;
use crate::chart::ChartKind;
use crate::dataset::CaseRecord;
use crate::scenes::Scene;

/// `GET /select` query string
#[derive(Debug, Deserialize)]
pub struct SelectParams {
    pub state: String,
}

/// `GET /api/v1/charts/:index` query string
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    /// State for the detail chart, defaults to the first state
    #[serde(default)]
    pub state: Option<String>,
}

/// Sorted distinct state names
#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub total: usize,
    pub states: Vec<String>,
}

/// National totals by date
#[derive(Debug, Serialize)]
pub struct NationalResponse {
    pub total: usize,
    pub points: Vec<NationalPoint>,
}

/// One state's records by date
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub state: String,
    pub total: usize,
    pub records: Vec<CaseRecord>,
}

/// Current presentation state
#[derive(Debug, Serialize)]
pub struct SceneStatusResponse {
    pub index: usize,
    pub scene: Scene,
    pub indicator: String,
    pub narration: String,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSummary>,
}

/// What the visualization region currently shows
#[derive(Debug, Serialize)]
pub struct ChartSummary {
    pub kind: ChartKind,
    pub title: String,
    pub markers: usize,
}

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Dataset status: ok, error
    pub dataset: String,
    pub records: usize,
    pub states: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uptime_seconds: u64,
    pub version: String,
}

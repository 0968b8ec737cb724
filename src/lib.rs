//! # covid-scenes
//!
//! A three-scene narrative walkthrough of US COVID-19 case data: national
//! totals over time, per-state totals at the latest date, and one state's
//! history with hoverable markers.
//!
//! ## Modules
//!
//! - [`dataset`]: Schema-checked CSV loading into typed records
//! - [`aggregate`]: National series, latest per-state snapshot, state series
//! - [`chart`]: Scales, axes and an SVG element tree
//! - [`scenes`]: Scene controller, renderers and the surface they draw on
//! - [`web`]: Axum server delivering the walkthrough
//! - [`config`], [`logging`]: Ambient configuration and tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_scenes::aggregate::latest_state_snapshot;
//! use covid_scenes::dataset::DatasetLoader;
//! use covid_scenes::scenes::render_snapshot;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DatasetLoader::new().load_path(Path::new("us-states.csv"))?;
//!
//!     let snapshot = latest_state_snapshot(&dataset);
//!     let chart = render_snapshot(&snapshot);
//!     std::fs::write("snapshot.svg", chart.to_svg())?;
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod format;
pub mod logging;
pub mod scenes;
pub mod web;

// Re-export top-level types for convenience
pub use dataset::{CaseRecord, Dataset, DatasetLoader, LoadError, LoadResult};

pub use aggregate::{
    latest_state_snapshot, national_series, state_series, NationalPoint, StateSnapshot,
    StateTotal,
};

pub use chart::{Chart, ChartKind, Marker};

pub use scenes::{render_scene, Scene, SceneController, StateSelector, Surface};

pub use web::{build_router, serve, AppState, HtmlSurface, WebError};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig, ServerConfig};

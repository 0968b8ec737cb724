//! Chart Layer
//!
//! Scales, axes and an SVG element tree, plus the [`Chart`] model the
//! scene renderers produce.
//!
//! - [`scale`]: Linear, time and band scales
//! - [`axis`]: Bottom and left axis groups
//! - [`svg`]: Element tree and markup serialization

pub mod axis;
pub mod scale;
pub mod svg;

pub use axis::{axis_bottom, axis_left, Tick};
pub use scale::{BandScale, LinearScale, TickInterval, TimeScale};
pub use svg::SvgElement;

use serde::Serialize;

use crate::dataset::CaseRecord;

/// Outer dimensions and margins of a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Layout {
    /// 800x400 line-chart layout
    pub const LINE: Layout = Layout {
        width: 800.0,
        height: 400.0,
        margin_left: 60.0,
        margin_right: 40.0,
        margin_top: 30.0,
        margin_bottom: 40.0,
    };

    /// 800x520 bar-chart layout with room for state labels
    pub const BAR: Layout = Layout {
        width: 800.0,
        height: 520.0,
        margin_left: 120.0,
        margin_right: 40.0,
        margin_top: 30.0,
        margin_bottom: 40.0,
    };

    /// Horizontal pixel range inside the margins
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin_left, self.width - self.margin_right)
    }

    /// Vertical pixel range, bottom to top
    pub fn y_range_up(&self) -> (f64, f64) {
        (self.height - self.margin_bottom, self.margin_top)
    }

    /// Vertical pixel range, top to bottom
    pub fn y_range_down(&self) -> (f64, f64) {
        (self.margin_top, self.height - self.margin_bottom)
    }

    /// Tick count for the horizontal axis
    pub fn x_tick_count(&self) -> usize {
        (self.width / 100.0) as usize
    }
}

/// Which renderer produced a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    NationalLine,
    StateBars,
    StateDetailLine,
}

/// A hoverable point on the state-detail chart
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position within the chart's marker list
    pub index: usize,
    /// The record the marker sits on
    pub record: CaseRecord,
}

impl Marker {
    /// Element id of the marker's circle
    pub fn element_id(&self) -> String {
        marker_element_id(self.index)
    }
}

/// Element id for the marker at `index`
pub fn marker_element_id(index: usize) -> String {
    format!("marker-{}", index)
}

/// A rendered chart: SVG tree plus interaction metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub svg: SvgElement,
    pub markers: Vec<Marker>,
}

impl Chart {
    /// Look up a marker by index
    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Recolour a marker's circle. Returns false for an unknown marker.
    pub fn set_marker_fill(&mut self, index: usize, fill: &str) -> bool {
        match self.svg.find_by_id_mut(&marker_element_id(index)) {
            Some(circle) => {
                circle.set_attr("fill", fill);
                true
            }
            None => false,
        }
    }

    /// Current fill of a marker's circle
    pub fn marker_fill(&self, index: usize) -> Option<&str> {
        self.svg
            .find_by_id(&marker_element_id(index))
            .and_then(|c| c.get_attr("fill"))
    }

    /// Serialized SVG markup
    pub fn to_svg(&self) -> String {
        self.svg.to_markup()
    }
}

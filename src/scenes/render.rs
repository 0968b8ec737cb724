//! Scene Renderers
//!
//! Pure functions from an aggregate (and, for the detail chart, the
//! selected state) to a [`Chart`]. Nothing here keeps state between calls.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{NationalPoint, StateSnapshot};
use crate::chart::svg::num;
use crate::chart::{
    axis_bottom, axis_left, marker_element_id, BandScale, Chart, ChartKind, Layout, LinearScale,
    Marker, SvgElement, Tick, TimeScale,
};
use crate::dataset::CaseRecord;
use crate::format::{format_date, format_tick, format_time_tick};

pub const NATIONAL_TITLE: &str = "Total COVID-19 Cases in US Over Time";

pub const NATIONAL_LINE_COLOR: &str = "#3e88c2";
pub const BAR_COLOR: &str = "#ec6464";
pub const STATE_LINE_COLOR: &str = "#eeb13f";
pub const MARKER_COLOR: &str = "#1748a3";
pub const MARKER_HOVER_COLOR: &str = "#b92727";

/// Every n-th point of a state series carries a marker (plus the last one)
pub const MARKER_STRIDE: usize = 14;
const MARKER_RADIUS: f64 = 4.0;
const LINE_WIDTH: f64 = 3.0;
const BAND_PADDING: f64 = 0.15;
const Y_TICKS: usize = 10;

/// Options for the state picker, in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSelector {
    pub options: Vec<String>,
}

/// Build the state picker from the sorted state names
pub fn render_state_selector(state_names: &[String]) -> StateSelector {
    StateSelector {
        options: state_names.to_vec(),
    }
}

/// Line chart of national totals
pub fn render_national(series: &[NationalPoint]) -> Chart {
    let points: Vec<(NaiveDate, i64)> = series.iter().map(|p| (p.date, p.total_cases)).collect();
    let line = LineChart::new(&points);

    Chart {
        kind: ChartKind::NationalLine,
        title: NATIONAL_TITLE.to_string(),
        svg: line.draw(NATIONAL_TITLE, NATIONAL_LINE_COLOR),
        markers: Vec::new(),
    }
}

/// Horizontal bar chart of the latest per-state totals
pub fn render_snapshot(snapshot: &StateSnapshot) -> Chart {
    let layout = Layout::BAR;
    let title = match snapshot.date {
        Some(date) => format!("Total Cases by State (as of {})", format_date(date)),
        None => "Total Cases by State (no data)".to_string(),
    };

    let states: Vec<String> = snapshot.entries.iter().map(|e| e.state.clone()).collect();
    let y = BandScale::new(states, layout.y_range_down(), BAND_PADDING);
    let x = LinearScale::from_zero(snapshot.max_total().map(|m| m as f64), layout.x_range())
        .nice(Y_TICKS);

    let state_ticks: Vec<Tick> = y
        .domain()
        .iter()
        .filter_map(|state| {
            y.position(state)
                .map(|pos| Tick::new(pos + y.bandwidth() / 2.0, state.clone()))
        })
        .collect();

    let x0 = x.apply(0.0);
    let bars = snapshot.entries.iter().filter_map(|entry| {
        let top = y.position(&entry.state)?;
        Some(
            SvgElement::new("rect")
                .attr("class", "bar")
                .num_attr("x", x0)
                .num_attr("y", top)
                .num_attr("width", x.apply(entry.total_cases as f64) - x0)
                .num_attr("height", y.bandwidth())
                .attr("fill", BAR_COLOR),
        )
    });

    let svg = SvgElement::document(layout.width, layout.height)
        .child(axis_bottom(
            &magnitude_ticks(&x, layout.x_tick_count()),
            x.range(),
            layout.height - layout.margin_bottom,
        ))
        .child(axis_left(&state_ticks, layout.y_range_down(), layout.margin_left))
        .children(bars)
        .child(title_text(&layout, &title));

    Chart {
        kind: ChartKind::StateBars,
        title,
        svg,
        markers: Vec::new(),
    }
}

/// Line chart of one state's cases with hoverable markers
pub fn render_state_detail(state: &str, series: &[CaseRecord]) -> Chart {
    let title = format!("COVID-19 Cases in {} Over Time", state);
    let points: Vec<(NaiveDate, i64)> = series.iter().map(|r| (r.date, r.cases)).collect();
    let line = LineChart::new(&points);

    let markers: Vec<Marker> = marker_positions(series.len())
        .into_iter()
        .enumerate()
        .map(|(index, pos)| Marker {
            index,
            record: series[pos].clone(),
        })
        .collect();

    let circles = markers.iter().map(|marker| {
        SvgElement::new("circle")
            .attr("id", marker_element_id(marker.index))
            .attr("class", "marker")
            .num_attr("cx", line.x.apply(marker.record.date))
            .num_attr("cy", line.y.apply(marker.record.cases as f64))
            .num_attr("r", MARKER_RADIUS)
            .attr("fill", MARKER_COLOR)
    });

    let svg = line
        .draw(&title, STATE_LINE_COLOR)
        .child(SvgElement::new("g").attr("class", "markers").children(circles));

    Chart {
        kind: ChartKind::StateDetailLine,
        title,
        svg,
        markers,
    }
}

/// Indices of the points that carry a marker
pub fn marker_positions(len: usize) -> Vec<usize> {
    (0..len)
        .filter(|i| i % MARKER_STRIDE == 0 || *i == len - 1)
        .collect()
}

/// Shared construction of the two line charts: time x-axis, zero-based
/// niced y-axis, one continuous path.
struct LineChart<'a> {
    layout: Layout,
    points: &'a [(NaiveDate, i64)],
    x: TimeScale,
    y: LinearScale,
}

impl<'a> LineChart<'a> {
    fn new(points: &'a [(NaiveDate, i64)]) -> Self {
        let layout = Layout::LINE;
        let x = TimeScale::from_dates(points.iter().map(|(d, _)| *d), layout.x_range());
        let max = points.iter().map(|(_, v)| *v).max().map(|m| m as f64);
        let y = LinearScale::from_zero(max, layout.y_range_up()).nice(Y_TICKS);

        Self {
            layout,
            points,
            x,
            y,
        }
    }

    fn draw(&self, title: &str, color: &str) -> SvgElement {
        let layout = &self.layout;

        let time_ticks: Vec<Tick> = self
            .x
            .ticks(layout.x_tick_count())
            .into_iter()
            .map(|d| Tick::new(self.x.apply(d), format_time_tick(d)))
            .collect();

        let mut svg = SvgElement::document(layout.width, layout.height)
            .child(axis_bottom(
                &time_ticks,
                layout.x_range(),
                layout.height - layout.margin_bottom,
            ))
            .child(axis_left(
                &magnitude_ticks(&self.y, Y_TICKS),
                self.y.range(),
                layout.margin_left,
            ));

        if !self.points.is_empty() {
            svg = svg.child(
                SvgElement::new("path")
                    .attr("class", "line")
                    .attr("fill", "none")
                    .attr("stroke", color)
                    .num_attr("stroke-width", LINE_WIDTH)
                    .attr("d", self.path_data()),
            );
        }

        svg.child(title_text(layout, title))
    }

    fn path_data(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, (date, value))| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!(
                    "{}{},{}",
                    cmd,
                    num(self.x.apply(*date)),
                    num(self.y.apply(*value as f64))
                )
            })
            .collect()
    }
}

fn magnitude_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    let step = scale.tick_step(count);
    scale
        .ticks(count)
        .into_iter()
        .map(|v| Tick::new(scale.apply(v), format_tick(v, step)))
        .collect()
}

fn title_text(layout: &Layout, title: &str) -> SvgElement {
    SvgElement::new("text")
        .attr("class", "title")
        .num_attr("x", layout.width / 2.0)
        .num_attr("y", layout.margin_top - 10.0)
        .attr("text-anchor", "middle")
        .attr("font-size", "20")
        .attr("font-weight", "600")
        .text(title)
}

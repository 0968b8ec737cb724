//! Axis generation
//!
//! Builds the `<g>` groups for bottom and left axes: a domain line, one
//! tick mark per tick, and a label under (or beside) each mark.

use super::svg::{num, SvgElement};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// A tick position in pixels with its label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

fn axis_group(transform: String, anchor: &'static str) -> SvgElement {
    SvgElement::new("g")
        .attr("class", "axis")
        .attr("transform", transform)
        .attr("fill", "none")
        .attr("font-size", "10")
        .attr("font-family", "sans-serif")
        .attr("text-anchor", anchor)
}

/// Horizontal axis drawn at `y`, ticks pointing down
pub fn axis_bottom(ticks: &[Tick], range: (f64, f64), y: f64) -> SvgElement {
    let (r0, r1) = range;
    let domain = SvgElement::new("path")
        .attr("class", "domain")
        .attr("stroke", "currentColor")
        .attr(
            "d",
            format!("M{},{}V0H{}V{}", num(r0), num(TICK_SIZE), num(r1), num(TICK_SIZE)),
        );

    let marks = ticks.iter().map(|tick| {
        SvgElement::new("g")
            .attr("class", "tick")
            .attr("transform", format!("translate({},0)", num(tick.position)))
            .child(
                SvgElement::new("line")
                    .attr("stroke", "currentColor")
                    .num_attr("y2", TICK_SIZE),
            )
            .child(
                SvgElement::new("text")
                    .attr("fill", "currentColor")
                    .num_attr("y", TICK_SIZE + TICK_PADDING)
                    .attr("dy", "0.71em")
                    .text(tick.label.clone()),
            )
    });

    axis_group(format!("translate(0,{})", num(y)), "middle")
        .child(domain)
        .children(marks)
}

/// Vertical axis drawn at `x`, ticks pointing left
pub fn axis_left(ticks: &[Tick], range: (f64, f64), x: f64) -> SvgElement {
    let (r0, r1) = range;
    let domain = SvgElement::new("path")
        .attr("class", "domain")
        .attr("stroke", "currentColor")
        .attr(
            "d",
            format!("M-{},{}H0V{}H-{}", num(TICK_SIZE), num(r0), num(r1), num(TICK_SIZE)),
        );

    let marks = ticks.iter().map(|tick| {
        SvgElement::new("g")
            .attr("class", "tick")
            .attr("transform", format!("translate(0,{})", num(tick.position)))
            .child(
                SvgElement::new("line")
                    .attr("stroke", "currentColor")
                    .num_attr("x2", -TICK_SIZE),
            )
            .child(
                SvgElement::new("text")
                    .attr("fill", "currentColor")
                    .num_attr("x", -(TICK_SIZE + TICK_PADDING))
                    .attr("dy", "0.32em")
                    .text(tick.label.clone()),
            )
    });

    axis_group(format!("translate({},0)", num(x)), "end")
        .child(domain)
        .children(marks)
}

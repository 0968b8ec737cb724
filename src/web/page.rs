//! HTML page model
//!
//! [`HtmlSurface`] keeps the five page regions as plain values and renders
//! them to a complete document. The controller drives it like any other
//! [`Surface`]; the HTTP layer only serializes it.
//!
//! Hover runs in the browser, but the values it swaps in are computed here
//! by the controller's hover handlers and attached to each marker as data
//! attributes.

use std::fmt::Write;

use crate::chart::svg::escape;
use crate::chart::{Chart, SvgElement};
use crate::scenes::{SceneController, StateSelector, Surface};

const PAGE_TITLE: &str = "COVID-19 in the United States";

const STYLE: &str = "\
body{font-family:sans-serif;margin:2em auto;max-width:840px;color:#222}\
header{display:flex;align-items:center;gap:1em}\
header form{margin:0}\
#scene-indicator{font-weight:bold}\
#annotation{min-height:3em}\
.axis text{fill:#444}\
.marker{cursor:pointer}";

const HOVER_SCRIPT: &str = "\
(function(){\
var note=document.getElementById('annotation');\
document.querySelectorAll('#viz-container circle.marker').forEach(function(m){\
m.addEventListener('mouseenter',function(){\
note.textContent=m.getAttribute('data-enter-narration');\
m.setAttribute('fill',m.getAttribute('data-enter-fill'));});\
m.addEventListener('mouseleave',function(){\
note.textContent=m.getAttribute('data-leave-narration');\
m.setAttribute('fill',m.getAttribute('data-leave-fill'));});\
});\
})();";

/// Server-side model of the presentation page
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    indicator: String,
    previous_enabled: bool,
    next_enabled: bool,
    narration: String,
    chart: Option<Chart>,
    selector: Option<StateSelector>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn narration(&self) -> &str {
        &self.narration
    }

    pub fn previous_enabled(&self) -> bool {
        self.previous_enabled
    }

    pub fn next_enabled(&self) -> bool {
        self.next_enabled
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn selector(&self) -> Option<&StateSelector> {
        self.selector.as_ref()
    }

    /// Render the full document.
    ///
    /// With a controller, the selector marks the selected state and detail
    /// markers carry their hover values.
    pub fn render(&self, controller: Option<&SceneController>) -> String {
        let mut html = String::with_capacity(16 * 1024);
        let selected = controller.and_then(|c| c.selected_state());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
        let _ = writeln!(html, "<style>{}</style>", STYLE);
        html.push_str("</head>\n<body>\n<header>\n");
        html.push_str(&nav_button("prev", "/nav/prev", "Previous", self.previous_enabled));
        let _ = writeln!(
            html,
            "<span id=\"scene-indicator\">{}</span>",
            escape(&self.indicator)
        );
        html.push_str(&nav_button("next", "/nav/next", "Next", self.next_enabled));
        html.push_str("</header>\n");
        let _ = writeln!(html, "<p id=\"annotation\">{}</p>", escape(&self.narration));

        html.push_str("<div id=\"state-selector\">");
        if let Some(selector) = &self.selector {
            html.push_str(&selector_form(selector, selected));
        }
        html.push_str("</div>\n");

        html.push_str("<div id=\"viz-container\">");
        if let Some(chart) = &self.chart {
            let mut svg = chart.svg.clone();
            if let Some(controller) = controller {
                bind_hover(&mut svg, chart, controller);
            }
            html.push_str(&svg.to_markup());
        }
        html.push_str("</div>\n");

        let _ = writeln!(html, "<script>{}</script>", HOVER_SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Surface for HtmlSurface {
    fn set_indicator(&mut self, text: &str) {
        self.indicator = text.to_string();
    }

    fn set_previous_enabled(&mut self, enabled: bool) {
        self.previous_enabled = enabled;
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        self.next_enabled = enabled;
    }

    fn set_narration(&mut self, text: &str) {
        self.narration = text.to_string();
    }

    fn clear_chart(&mut self) {
        self.chart = None;
    }

    fn mount_chart(&mut self, chart: Chart) {
        self.chart = Some(chart);
    }

    fn clear_selector(&mut self) {
        self.selector = None;
    }

    fn mount_selector(&mut self, selector: StateSelector) {
        self.selector = Some(selector);
    }

    fn set_marker_fill(&mut self, marker: usize, fill: &str) {
        if let Some(chart) = self.chart.as_mut() {
            chart.set_marker_fill(marker, fill);
        }
    }
}

fn nav_button(id: &str, action: &str, label: &str, enabled: bool) -> String {
    format!(
        "<form method=\"get\" action=\"{}\"><button id=\"{}\" type=\"submit\"{}>{}</button></form>\n",
        action,
        id,
        if enabled { "" } else { " disabled" },
        label
    )
}

fn selector_form(selector: &StateSelector, selected: Option<&str>) -> String {
    let mut form = String::from(
        "<form method=\"get\" action=\"/select\">\
         <select name=\"state\" onchange=\"this.form.submit()\">",
    );
    for option in &selector.options {
        let marked = if Some(option.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        let escaped = escape(option);
        let _ = write!(form, "<option value=\"{}\"{}>{}</option>", escaped, marked, escaped);
    }
    form.push_str("</select><noscript><button type=\"submit\">Show</button></noscript></form>");
    form
}

/// Collects what one hover handler call would show
#[derive(Default)]
struct HoverCapture {
    narration: String,
    fill: String,
}

impl Surface for HoverCapture {
    fn set_indicator(&mut self, _text: &str) {}
    fn set_previous_enabled(&mut self, _enabled: bool) {}
    fn set_next_enabled(&mut self, _enabled: bool) {}

    fn set_narration(&mut self, text: &str) {
        self.narration = text.to_string();
    }

    fn clear_chart(&mut self) {}
    fn mount_chart(&mut self, _chart: Chart) {}
    fn clear_selector(&mut self) {}
    fn mount_selector(&mut self, _selector: StateSelector) {}

    fn set_marker_fill(&mut self, _marker: usize, fill: &str) {
        self.fill = fill.to_string();
    }
}

fn bind_hover(svg: &mut SvgElement, chart: &Chart, controller: &SceneController) {
    for marker in &chart.markers {
        let mut enter = HoverCapture::default();
        let mut leave = HoverCapture::default();
        if !controller.marker_enter(marker.index, &mut enter)
            || !controller.marker_leave(marker.index, &mut leave)
        {
            continue;
        }

        if let Some(circle) = svg.find_by_id_mut(&marker.element_id()) {
            circle.set_attr("data-enter-narration", enter.narration);
            circle.set_attr("data-enter-fill", enter.fill);
            circle.set_attr("data-leave-narration", leave.narration);
            circle.set_attr("data-leave-fill", leave.fill);
        }
    }
}

//! SVG element tree
//!
//! A minimal retained element model: charts are built as a tree of
//! [`SvgElement`]s, mutated in place (marker recolouring) and serialized to
//! markup on demand.

use std::fmt::Write;

/// One SVG element with attributes, optional text, and children
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<SvgElement>,
}

impl SvgElement {
    /// Create an empty element
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Root `<svg>` element of the given pixel size
    pub fn document(width: f64, height: f64) -> Self {
        Self::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", num(width))
            .attr("height", num(height))
            .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
    }

    /// Set an attribute, replacing any previous value
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set a numeric attribute
    pub fn num_attr(self, name: &'static str, value: f64) -> Self {
        self.attr(name, num(value))
    }

    /// Set text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child
    pub fn child(mut self, child: SvgElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append many children
    pub fn children(mut self, children: impl IntoIterator<Item = SvgElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Depth-first search for the element with the given `id`
    pub fn find_by_id(&self, id: &str) -> Option<&SvgElement> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// Mutable depth-first search for the element with the given `id`
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut SvgElement> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// All descendants (and self) with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&SvgElement> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a SvgElement>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            child.collect(tag, found);
        }
    }

    /// Serialize to markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }

        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Format a coordinate with at most two decimals
pub fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Escape text for use in XML/HTML content and attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_nesting_and_escaping() {
        let svg = SvgElement::document(100.0, 50.0)
            .child(SvgElement::new("text").num_attr("x", 10.5).text("A & B"))
            .child(SvgElement::new("circle").attr("id", "dot").num_attr("r", 4.0));

        let markup = svg.to_markup();
        assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(markup.contains("<text x=\"10.5\">A &amp; B</text>"));
        assert!(markup.contains("<circle id=\"dot\" r=\"4\"/>"));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_find_and_mutate_by_id() {
        let mut svg = SvgElement::document(10.0, 10.0).child(
            SvgElement::new("g").child(
                SvgElement::new("circle")
                    .attr("id", "marker-0")
                    .attr("fill", "#000"),
            ),
        );

        svg.find_by_id_mut("marker-0")
            .unwrap()
            .set_attr("fill", "#fff");

        assert_eq!(svg.find_by_id("marker-0").unwrap().get_attr("fill"), Some("#fff"));
        assert!(svg.find_by_id("missing").is_none());
        assert_eq!(svg.find_all("circle").len(), 1);
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(60.0), "60");
        assert_eq!(num(12.346), "12.35");
        assert_eq!(num(-0.001), "0");
    }
}

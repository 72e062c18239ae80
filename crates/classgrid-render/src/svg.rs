//! SVG output. Each draw command becomes one element, appended in execution order.

use crate::model::Rect;
use crate::surface::RenderSurface;
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
use classgrid_core::Color;
use std::fmt::Write as _;
use std::sync::Arc;

pub struct SvgSurface {
    width: u32,
    height: u32,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_measurer(width, height, Arc::new(DeterministicTextMeasurer::default()))
    }

    pub fn with_measurer(
        width: u32,
        height: u32,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        Self {
            width,
            height,
            measurer,
            body: String::new(),
        }
    }

    /// Closes the document and returns the SVG text.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl RenderSurface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt(rect.x),
            fmt(rect.y),
            fmt(rect.width),
            fmt(rect.height)
        );
        if radius > 0.0 {
            let _ = write!(self.body, r#" rx="{}""#, fmt(radius));
        }
        push_paint(&mut self.body, "fill", color);
        self.body.push_str("/>");
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, color: Color) {
        let _ = write!(self.body, r#"<text x="{}" y="{}""#, fmt(x), fmt(y));
        if let Some(family) = style.font_family.as_deref() {
            self.body.push_str(r#" font-family=""#);
            escape_xml_into(&mut self.body, family);
            self.body.push('"');
        }
        let _ = write!(self.body, r#" font-size="{}""#, fmt(style.font_size));
        if let Some(weight) = style.font_weight.as_deref() {
            self.body.push_str(r#" font-weight=""#);
            escape_xml_into(&mut self.body, weight);
            self.body.push('"');
        }
        push_paint(&mut self.body, "fill", color);
        self.body.push_str(r#" xml:space="preserve">"#);
        escape_xml_into(&mut self.body, text);
        self.body.push_str("</text>");
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            fmt(from.0),
            fmt(from.1),
            fmt(to.0),
            fmt(to.1)
        );
        push_paint(&mut self.body, "stroke", color);
        self.body.push_str(r#" stroke-width="1"/>"#);
    }
}

impl TextMeasurer for SvgSurface {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.measurer.measure(text, style)
    }
}

fn push_paint(out: &mut String, attr: &str, color: Color) {
    let _ = write!(
        out,
        r##" {attr}="#{:02x}{:02x}{:02x}""##,
        color.r, color.g, color.b
    );
    if !color.is_opaque() {
        let _ = write!(out, r#" {attr}-opacity="{}""#, fmt(color.a as f64 / 255.0));
    }
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    format!("{v}")
}

fn escape_xml_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

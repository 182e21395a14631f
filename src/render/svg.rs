use crate::geometry::arrowhead_points;
use crate::model::{Document, Point, Rgba};
use crate::settings::Metrics;

use super::{RenderOptions, Stroke, Surface, WHITE, draw_document};

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn rgba_to_svg_rgb(rgba: Rgba) -> (String, f32) {
    let opacity = (rgba.a as f32) / 255.0;
    (format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b), opacity)
}

fn stroke_attrs(stroke: Stroke, dash: Option<[f32; 2]>) -> String {
    let (rgb, opacity) = rgba_to_svg_rgb(stroke.color);
    let mut attrs = format!(
        r#"stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.3}" fill="none""#,
        rgb, opacity, stroke.width
    );
    if let Some([dash, gap]) = dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{dash:.3} {gap:.3}""#));
    }
    attrs
}

/// Accumulates SVG elements; [`SvgSurface::finish`] wraps them in a document.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self, width: f32, height: f32) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.3} {height:.3}" width="{width:.3}" height="{height:.3}">"#
        ));
        out.push('\n');
        let (bg, _) = rgba_to_svg_rgb(WHITE);
        out.push_str(&format!(
            r#"<rect x="0" y="0" width="{width:.3}" height="{height:.3}" fill="{bg}" />"#
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let (rgb, opacity) = rgba_to_svg_rgb(color);
        self.body.push_str(&format!(
            r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}" fill-opacity="{:.3}" />"#,
            center.x, center.y, radius, rgb, opacity
        ));
        self.body.push('\n');
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" {} />"#,
            center.x,
            center.y,
            radius,
            stroke_attrs(stroke, None)
        ));
        self.body.push('\n');
    }

    fn stroke_path(
        &mut self,
        start: Point,
        control: Option<Point>,
        end: Point,
        stroke: Stroke,
        dash: Option<[f32; 2]>,
    ) {
        let d = match control {
            Some(c) => format!(
                "M {:.3} {:.3} Q {:.3} {:.3} {:.3} {:.3}",
                start.x, start.y, c.x, c.y, end.x, end.y
            ),
            None => format!("M {:.3} {:.3} L {:.3} {:.3}", start.x, start.y, end.x, end.y),
        };
        self.body.push_str(&format!(
            r#"<path d="{}" {} />"#,
            d,
            stroke_attrs(stroke, dash)
        ));
        self.body.push('\n');
    }

    fn draw_text(&mut self, anchor: Point, text: &str, size: f32, color: Rgba) {
        let (rgb, opacity) = rgba_to_svg_rgb(color);
        self.body.push_str(&format!(
            r#"<text x="{:.3}" y="{:.3}" font-family="sans-serif" font-size="{:.3}" fill="{}" fill-opacity="{:.3}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            anchor.x,
            anchor.y,
            size,
            rgb,
            opacity,
            escape_xml(text)
        ));
        self.body.push('\n');
    }

    fn arrowhead(&mut self, tip: Point, angle: f32, size: f32, color: Rgba) {
        let (rgb, opacity) = rgba_to_svg_rgb(color);
        let points = arrowhead_points(tip, angle, size)
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.body.push_str(&format!(
            r#"<polygon points="{points}" fill="{rgb}" fill-opacity="{opacity:.3}" />"#
        ));
        self.body.push('\n');
    }
}

pub fn document_to_svg(doc: &Document, metrics: &Metrics, width: f32, height: f32) -> String {
    let mut surface = SvgSurface::new();
    draw_document(&mut surface, doc, metrics, &RenderOptions::default());
    surface.finish(width, height)
}

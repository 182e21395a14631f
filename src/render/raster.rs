//! Software rasterizer for PNG export. Flat fills and strokes only; text is
//! not rasterized.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::geometry::{arrowhead_points, distance, distance_to_segment, flatten_path};
use crate::model::{Document, Point, Rgba};
use crate::settings::Metrics;

use super::{RenderOptions, Stroke, Surface, WHITE, draw_document};

const CURVE_STEPS: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("export size {0}x{1} is empty")]
    EmptyCanvas(u32, u32),
}

pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyCanvas(width, height));
        }
        let bg = image::Rgba([background.r, background.g, background.b, background.a]);
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, bg),
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let px = self.image.get_pixel_mut(x, y);
        let a = f32::from(color.a) / 255.0;
        let src = [color.r, color.g, color.b];
        for (i, s) in src.iter().enumerate() {
            let d = f32::from(px.0[i]);
            px.0[i] = (f32::from(*s) * a + d * (1.0 - a)).round() as u8;
        }
        let da = f32::from(px.0[3]) / 255.0;
        px.0[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
    }

    /// Calls `inside` for each pixel center in the clipped box and blends
    /// `color` where it returns true.
    fn fill_where(
        &mut self,
        min: Point,
        max: Point,
        color: Rgba,
        inside: impl Fn(Point) -> bool,
    ) {
        let w = self.image.width() as f32;
        let h = self.image.height() as f32;
        let x0 = min.x.floor().clamp(0.0, w) as u32;
        let y0 = min.y.floor().clamp(0.0, h) as u32;
        let x1 = max.x.ceil().clamp(0.0, w) as u32;
        let y1 = max.y.ceil().clamp(0.0, h) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                if inside(Point::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_segment(&mut self, a: Point, b: Point, stroke: Stroke) {
        let half = (stroke.width * 0.5).max(0.5);
        let min = Point::new(a.x.min(b.x) - half, a.y.min(b.y) - half);
        let max = Point::new(a.x.max(b.x) + half, a.y.max(b.y) + half);
        self.fill_where(min, max, stroke.color, |p| distance_to_segment(p, a, b) <= half);
    }
}

/// Splits a polyline into the drawn pieces of a dash pattern.
fn dash_pieces(points: &[Point], dash: f32, gap: f32) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    if dash <= 0.0 || gap < 0.0 {
        return out;
    }
    let mut drawing = true;
    let mut left = dash;
    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut seg = distance(a, b);
        while seg > f32::EPSILON {
            let step = left.min(seg);
            let t = step / seg;
            let next = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            if drawing {
                out.push((a, next));
            }
            a = next;
            seg -= step;
            left -= step;
            if left <= f32::EPSILON {
                drawing = !drawing;
                left = if drawing { dash } else { gap };
            }
        }
    }
    out
}

impl Surface for RasterSurface {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let min = Point::new(center.x - radius, center.y - radius);
        let max = Point::new(center.x + radius, center.y + radius);
        self.fill_where(min, max, color, |p| distance(p, center) <= radius);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        let half = (stroke.width * 0.5).max(0.5);
        let outer = radius + half;
        let min = Point::new(center.x - outer, center.y - outer);
        let max = Point::new(center.x + outer, center.y + outer);
        self.fill_where(min, max, stroke.color, |p| {
            (distance(p, center) - radius).abs() <= half
        });
    }

    fn stroke_path(
        &mut self,
        start: Point,
        control: Option<Point>,
        end: Point,
        stroke: Stroke,
        dash: Option<[f32; 2]>,
    ) {
        let points = flatten_path(start, control, end, CURVE_STEPS);
        let pieces = match dash {
            Some([d, g]) => dash_pieces(&points, d, g),
            None => points.windows(2).map(|w| (w[0], w[1])).collect(),
        };
        for (a, b) in pieces {
            self.stroke_segment(a, b, stroke);
        }
    }

    fn draw_text(&mut self, _anchor: Point, _text: &str, _size: f32, _color: Rgba) {}

    fn arrowhead(&mut self, tip: Point, angle: f32, size: f32, color: Rgba) {
        let [p0, p1, p2] = arrowhead_points(tip, angle, size);
        let min = Point::new(p0.x.min(p1.x).min(p2.x), p0.y.min(p1.y).min(p2.y));
        let max = Point::new(p0.x.max(p1.x).max(p2.x), p0.y.max(p1.y).max(p2.y));
        let edge = |a: Point, b: Point, p: Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        self.fill_where(min, max, color, |p| {
            let e0 = edge(p0, p1, p);
            let e1 = edge(p1, p2, p);
            let e2 = edge(p2, p0, p);
            (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
        });
    }
}

pub fn document_to_png(
    doc: &Document,
    metrics: &Metrics,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    let mut surface = RasterSurface::new(width, height, WHITE)?;
    draw_document(&mut surface, doc, metrics, &RenderOptions::default());
    surface.encode_png()
}

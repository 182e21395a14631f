use eframe::egui;

use crate::geometry::{arrowhead_points, flatten_path};
use crate::model::{Point, Rgba};
use crate::render::{Stroke, Surface};

const CURVE_STEPS: usize = 32;

pub(super) fn to_pos2(p: Point) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

pub(super) fn from_pos2(p: egui::Pos2) -> Point {
    Point::new(p.x, p.y)
}

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Paints onto an egui painter; canvas coordinates are offset by `origin`.
pub(super) struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
}

impl<'a> EguiSurface<'a> {
    pub(super) fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }

    fn screen(&self, p: Point) -> egui::Pos2 {
        to_pos2(p) + self.origin
    }

    fn stroke(stroke: Stroke) -> egui::Stroke {
        egui::Stroke::new(stroke.width, color32(stroke.color))
    }
}

impl Surface for EguiSurface<'_> {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.painter
            .circle_filled(self.screen(center), radius, color32(color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.painter
            .circle_stroke(self.screen(center), radius, Self::stroke(stroke));
    }

    fn stroke_path(
        &mut self,
        start: Point,
        control: Option<Point>,
        end: Point,
        stroke: Stroke,
        dash: Option<[f32; 2]>,
    ) {
        let points: Vec<egui::Pos2> = flatten_path(start, control, end, CURVE_STEPS)
            .into_iter()
            .map(|p| self.screen(p))
            .collect();
        let stroke = Self::stroke(stroke);
        match dash {
            Some([dash_len, gap_len]) => {
                self.painter
                    .extend(egui::Shape::dashed_line(&points, stroke, dash_len, gap_len));
            }
            None => {
                self.painter.add(egui::Shape::line(points, stroke));
            }
        }
    }

    fn draw_text(&mut self, anchor: Point, text: &str, size: f32, color: Rgba) {
        self.painter.text(
            self.screen(anchor),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            color32(color),
        );
    }

    fn arrowhead(&mut self, tip: Point, angle: f32, size: f32, color: Rgba) {
        let points = arrowhead_points(tip, angle, size)
            .iter()
            .map(|p| self.screen(*p))
            .collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            color32(color),
            egui::Stroke::NONE,
        ));
    }
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, board: egui::Rect) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    painter.rect_filled(board, 0.0, egui::Color32::WHITE);
    painter.rect_stroke(
        board,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
        egui::StrokeKind::Outside,
    );
}

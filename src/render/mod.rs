//! Scene rendering against an abstract drawing surface.
//!
//! Rendering is a pure function of the document: it issues primitive calls
//! on a [`Surface`] and never reads anything back. The desktop canvas, the
//! SVG exporter and the PNG exporter are all surfaces.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

pub mod raster;
pub mod svg;

use crate::geometry::{end_direction, midpoint, quadratic_point};
use crate::hit::{Handle, Hit};
use crate::model::{Arrow, ArrowStyle, Document, EntityRef, Pick, Player, Point, Rgba, Team, Zone};
use crate::settings::Metrics;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Primitive drawing operations a backend must provide.
pub trait Surface {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke);

    /// Straight segment when `control` is `None`, quadratic curve otherwise.
    /// `dash` is `[dash_length, gap_length]`.
    fn stroke_path(
        &mut self,
        start: Point,
        control: Option<Point>,
        end: Point,
        stroke: Stroke,
        dash: Option<[f32; 2]>,
    );

    /// Text centered on `anchor`.
    fn draw_text(&mut self, anchor: Point, text: &str, size: f32, color: Rgba);

    /// Filled triangle whose tip sits on `tip`, pointing along `angle`.
    fn arrowhead(&mut self, tip: Point, angle: f32, size: f32, color: Rgba);
}

pub const INK: Rgba = Rgba::rgb(20, 20, 20);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const ZONE_FILL: Rgba = Rgba::rgba(128, 0, 128, 77);
const ZONE_STROKE: Rgba = Rgba::rgb(128, 0, 128);
const PICK_COLOR: Rgba = Rgba::rgb(255, 150, 0);
const EMPHASIS_COLOR: Rgba = Rgba::rgb(200, 40, 40);
const HANDLE_COLOR: Rgba = Rgba::rgb(90, 160, 255);
const GUIDE_COLOR: Rgba = Rgba::rgba(90, 160, 255, 140);
const LABEL_SIZE: f32 = 12.0;

pub fn team_color(team: Team) -> Rgba {
    match team {
        Team::A => Rgba::rgb(220, 40, 40),
        Team::B => Rgba::rgb(40, 80, 220),
    }
}

pub fn arrow_stroke(style: ArrowStyle) -> (Stroke, Option<[f32; 2]>) {
    match style {
        ArrowStyle::Solid => (Stroke::new(2.0, INK), None),
        ArrowStyle::Dashed => (Stroke::new(2.0, INK), Some([10.0, 5.0])),
        ArrowStyle::Emphasis => (Stroke::new(4.0, EMPHASIS_COLOR), None),
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Draw endpoint and control handles of arrows and picks.
    pub show_handles: bool,
    /// Handle currently being dragged, drawn highlighted.
    pub active: Option<Hit>,
}

/// Draws zones, arrows, picks, players and the ball, in that order.
pub fn draw_document(
    surface: &mut dyn Surface,
    doc: &Document,
    metrics: &Metrics,
    options: &RenderOptions,
) {
    for zone in &doc.zones {
        draw_zone(surface, zone);
    }
    for arrow in &doc.arrows {
        draw_arrow(surface, arrow, metrics);
    }
    for pick in &doc.picks {
        draw_pick(surface, pick, metrics);
    }
    for player in doc.players.iter().filter(|p| p.visible) {
        draw_player(surface, player, metrics);
    }
    if let Some(ball) = &doc.ball {
        surface.fill_circle(ball.pos, metrics.ball_radius, INK);
    }
    if options.show_handles {
        draw_handles(surface, doc, metrics);
    }
    if let Some(hit) = options.active {
        draw_active(surface, doc, metrics, hit);
    }
}

fn draw_zone(surface: &mut dyn Surface, zone: &Zone) {
    surface.fill_circle(zone.center, zone.radius, ZONE_FILL);
    surface.stroke_circle(zone.center, zone.radius, Stroke::new(2.0, ZONE_STROKE));
}

fn draw_arrow(surface: &mut dyn Surface, arrow: &Arrow, metrics: &Metrics) {
    let (stroke, dash) = arrow_stroke(arrow.style);
    surface.stroke_path(arrow.start, arrow.control, arrow.end, stroke, dash);
    let angle = end_direction(arrow.start, arrow.control, arrow.end);
    let size = metrics.arrowhead_size + stroke.width;
    surface.arrowhead(arrow.end, angle, size, stroke.color);
    if !arrow.label.is_empty() {
        let mid = match arrow.control {
            Some(c) => quadratic_point(arrow.start, c, arrow.end, 0.5),
            None => midpoint(arrow.start, arrow.end),
        };
        let anchor = Point::new(mid.x, mid.y - LABEL_SIZE);
        surface.draw_text(anchor, &arrow.label, LABEL_SIZE, INK);
    }
}

/// A pick ends in a bar across its end tangent; a degenerate pick is a ring.
fn draw_pick(surface: &mut dyn Surface, pick: &Pick, metrics: &Metrics) {
    let stroke = Stroke::new(3.0, PICK_COLOR);
    if pick.is_point() {
        surface.stroke_circle(pick.start, metrics.pick_marker_radius, stroke);
        return;
    }
    surface.stroke_path(pick.start, pick.control, pick.end, stroke, None);
    let angle = end_direction(pick.start, pick.control, pick.end);
    let (sin, cos) = angle.sin_cos();
    let half = metrics.pick_marker_radius;
    let a = Point::new(pick.end.x - sin * half, pick.end.y + cos * half);
    let b = Point::new(pick.end.x + sin * half, pick.end.y - cos * half);
    surface.stroke_path(a, None, b, stroke, None);
}

fn draw_player(surface: &mut dyn Surface, player: &Player, metrics: &Metrics) {
    surface.fill_circle(player.pos, metrics.player_radius, team_color(player.team));
    surface.stroke_circle(player.pos, metrics.player_radius, Stroke::new(1.0, WHITE));
    if !player.label.is_empty() {
        let anchor = Point::new(player.pos.x, player.pos.y - metrics.player_radius - 7.0);
        surface.draw_text(anchor, &player.label, LABEL_SIZE, INK);
    }
}

fn draw_handles(surface: &mut dyn Surface, doc: &Document, metrics: &Metrics) {
    let lines = doc
        .arrows
        .iter()
        .map(|a| (a.start, a.control, a.end))
        .chain(doc.picks.iter().map(|k| (k.start, k.control, k.end)));
    let ring = Stroke::new(1.0, HANDLE_COLOR);
    let r = metrics.handle_radius * 0.6;
    for (start, control, end) in lines {
        surface.stroke_circle(start, r, ring);
        surface.stroke_circle(end, r, ring);
        if let Some(c) = control {
            let guide = Stroke::new(1.0, GUIDE_COLOR);
            surface.stroke_path(start, None, c, guide, Some([4.0, 4.0]));
            surface.stroke_path(c, None, end, guide, Some([4.0, 4.0]));
            surface.fill_circle(c, r, HANDLE_COLOR);
        }
    }
}

fn draw_active(surface: &mut dyn Surface, doc: &Document, metrics: &Metrics, hit: Hit) {
    let ring = Stroke::new(2.0, HANDLE_COLOR);
    let line_point = |start: Point, control: Option<Point>, end: Point| match hit.handle {
        Handle::Start => Some(start),
        Handle::End => Some(end),
        Handle::Control => control,
        _ => None,
    };
    let spot = match hit.target {
        EntityRef::Player(id) => doc
            .players
            .iter()
            .find(|p| p.id == id)
            .map(|p| (p.pos, metrics.player_radius + 3.0)),
        EntityRef::Ball => doc.ball.map(|b| (b.pos, metrics.ball_radius + 3.0)),
        EntityRef::Arrow(id) => doc
            .arrows
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| line_point(a.start, a.control, a.end))
            .map(|p| (p, metrics.handle_radius)),
        EntityRef::Pick(id) => doc
            .picks
            .iter()
            .find(|k| k.id == id)
            .and_then(|k| line_point(k.start, k.control, k.end))
            .map(|p| (p, metrics.handle_radius)),
        EntityRef::Zone(id) => doc
            .zones
            .iter()
            .find(|z| z.id == id)
            .map(|z| (z.center, z.radius)),
    };
    if let Some((center, radius)) = spot {
        surface.stroke_circle(center, radius, ring);
    }
}

//! Hit-testing: which entity, and which of its handles, lies under a point.
//!
//! Small handles are resolved before large areas so that a control point
//! sitting inside a zone stays grabbable. Within one tier the first entity in
//! collection order wins; distance never breaks ties.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{distance, distance_to_path};
use crate::model::{Document, EntityRef, Point};
use crate::settings::Metrics;

/// Which part of an entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// The entity body (players, ball).
    None,
    Start,
    End,
    Control,
    /// Zone interior; moves the zone.
    Center,
    /// Zone boundary band; resizes the zone.
    Edge,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: EntityRef,
    pub handle: Handle,
}

impl Hit {
    fn new(target: EntityRef, handle: Handle) -> Self {
        Self { target, handle }
    }
}

#[must_use]
pub fn hit_test(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    control_handle(doc, metrics, p)
        .or_else(|| endpoint_handle(doc, metrics, p))
        .or_else(|| zone_part(doc, metrics, p))
        .or_else(|| player_body(doc, metrics, p))
        .or_else(|| ball_body(doc, metrics, p))
}

fn control_handle(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    let near = |c: Option<Point>| c.is_some_and(|c| distance(p, c) <= metrics.handle_radius);
    if let Some(a) = doc.arrows.iter().find(|a| near(a.control)) {
        return Some(Hit::new(EntityRef::Arrow(a.id), Handle::Control));
    }
    doc.picks
        .iter()
        .find(|k| near(k.control))
        .map(|k| Hit::new(EntityRef::Pick(k.id), Handle::Control))
}

fn endpoint_handle(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    let which = |start: Point, end: Point| {
        if distance(p, start) <= metrics.handle_radius {
            Some(Handle::Start)
        } else if distance(p, end) <= metrics.handle_radius {
            Some(Handle::End)
        } else {
            None
        }
    };
    for a in &doc.arrows {
        if let Some(handle) = which(a.start, a.end) {
            return Some(Hit::new(EntityRef::Arrow(a.id), handle));
        }
    }
    for k in &doc.picks {
        if let Some(handle) = which(k.start, k.end) {
            return Some(Hit::new(EntityRef::Pick(k.id), handle));
        }
    }
    None
}

fn zone_part(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    let edge = doc
        .zones
        .iter()
        .find(|z| (distance(p, z.center) - z.radius).abs() <= metrics.zone_edge_tolerance)
        .map(|z| Hit::new(EntityRef::Zone(z.id), Handle::Edge));
    edge.or_else(|| {
        doc.zones
            .iter()
            .find(|z| distance(p, z.center) <= z.radius)
            .map(|z| Hit::new(EntityRef::Zone(z.id), Handle::Center))
    })
}

fn player_body(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    doc.players
        .iter()
        .find(|pl| pl.visible && distance(p, pl.pos) <= metrics.player_radius)
        .map(|pl| Hit::new(EntityRef::Player(pl.id), Handle::None))
}

fn ball_body(doc: &Document, metrics: &Metrics, p: Point) -> Option<Hit> {
    doc.ball
        .filter(|b| distance(p, b.pos) <= metrics.ball_radius)
        .map(|_| Hit::new(EntityRef::Ball, Handle::None))
}

/// The labelled entity a double-click at `p` refers to: a visible player,
/// else an arrow whose path passes within the handle radius.
#[must_use]
pub fn hit_label_target(doc: &Document, metrics: &Metrics, p: Point) -> Option<EntityRef> {
    if let Some(hit) = player_body(doc, metrics, p) {
        return Some(hit.target);
    }
    doc.arrows
        .iter()
        .find(|a| distance_to_path(p, a.start, a.control, a.end) <= metrics.handle_radius)
        .map(|a| EntityRef::Arrow(a.id))
}

/// The line-like entity (arrow or pick) whose path passes under `p`.
#[must_use]
pub fn hit_line(doc: &Document, metrics: &Metrics, p: Point) -> Option<EntityRef> {
    let arrow = doc
        .arrows
        .iter()
        .find(|a| distance_to_path(p, a.start, a.control, a.end) <= metrics.handle_radius)
        .map(|a| EntityRef::Arrow(a.id));
    arrow.or_else(|| {
        doc.picks
            .iter()
            .find(|k| distance_to_path(p, k.start, k.control, k.end) <= metrics.handle_radius)
            .map(|k| EntityRef::Pick(k.id))
    })
}

//! The drag state machine.
//!
//! A gesture runs from pointer-down (which resolves one hit) to pointer-up or
//! pointer-leave. The target is held as an [`EntityRef`], never as a borrow
//! into the scene, so the scene store stays the only owner of entity data.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use crate::geometry::distance;
use crate::hit::{Handle, Hit, hit_test};
use crate::history::History;
use crate::model::{Document, EntityRef, Point};
use crate::scene::Scene;
use crate::settings::Metrics;

#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// One handle of one entity follows the pointer.
    Dragging {
        target: EntityRef,
        handle: Handle,
        /// Grabbed anchor minus pointer at pointer-down; keeps the grabbed
        /// point from jumping under the pointer.
        offset: Point,
        /// Pointer position at pointer-down.
        origin: Point,
        /// Scene as it was at pointer-down. Moved into history on the first
        /// move away from `origin`, so a plain click records nothing.
        pending: Option<Document>,
    },
}

#[derive(Debug, Default)]
pub struct EditSession {
    state: DragState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn target(&self) -> Option<(EntityRef, Handle)> {
        match &self.state {
            DragState::Dragging { target, handle, .. } => Some((*target, *handle)),
            DragState::Idle => None,
        }
    }

    /// Starts a drag if something is under `p`. Ignored while a drag is
    /// already running.
    pub fn pointer_down(&mut self, scene: &Scene, metrics: &Metrics, p: Point) -> Option<Hit> {
        if self.is_dragging() {
            tracing::debug!("pointer-down ignored during drag");
            return None;
        }
        let hit = hit_test(scene.document(), metrics, p)?;
        let offset = match (hit.handle, anchor_of(scene, hit)) {
            (Handle::Edge, _) | (_, None) => Point::default(),
            (_, Some(anchor)) => anchor - p,
        };
        tracing::debug!(entity = %hit.target, handle = ?hit.handle, "drag started");
        self.state = DragState::Dragging {
            target: hit.target,
            handle: hit.handle,
            offset,
            origin: p,
            pending: Some(scene.snapshot()),
        };
        Some(hit)
    }

    /// Applies the pointer to the grabbed handle. Returns whether a redraw is
    /// needed.
    pub fn pointer_move(
        &mut self,
        scene: &mut Scene,
        history: &mut History,
        metrics: &Metrics,
        p: Point,
    ) -> bool {
        let (target, handle, offset) = match &self.state {
            DragState::Dragging {
                target,
                handle,
                offset,
                ..
            } => (*target, *handle, *offset),
            DragState::Idle => return false,
        };
        if !scene.contains(target) {
            tracing::debug!(entity = %target, "drag target vanished");
            self.state = DragState::Idle;
            return false;
        }
        if let DragState::Dragging {
            origin, pending, ..
        } = &mut self.state
        {
            if pending.is_some() && p == *origin {
                return false;
            }
            if let Some(snapshot) = pending.take() {
                history.record(snapshot);
            }
        }
        apply_drag(scene, target, handle, p + offset, p, metrics.min_zone_radius);
        true
    }

    /// Ends the gesture. Returns whether a drag was running.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            tracing::debug!("drag finished");
        }
        self.state = DragState::Idle;
        was_dragging
    }

    /// Pointer left the surface: the gesture ends, applied moves are kept.
    pub fn pointer_leave(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            tracing::debug!("drag cancelled by pointer leave");
        }
        self.state = DragState::Idle;
        was_dragging
    }
}

/// The point a handle grabs: a body position, a line handle or a zone center.
pub fn anchor_of(scene: &Scene, hit: Hit) -> Option<Point> {
    match hit.target {
        EntityRef::Player(id) => scene.player(id).map(|p| p.pos),
        EntityRef::Ball => scene.ball().map(|b| b.pos),
        EntityRef::Arrow(id) => scene
            .arrow(id)
            .and_then(|a| line_handle(a.start, a.end, a.control, hit.handle)),
        EntityRef::Pick(id) => scene
            .pick(id)
            .and_then(|k| line_handle(k.start, k.end, k.control, hit.handle)),
        EntityRef::Zone(id) => scene.zone(id).map(|z| z.center),
    }
}

fn line_handle(start: Point, end: Point, control: Option<Point>, handle: Handle) -> Option<Point> {
    match handle {
        Handle::Start => Some(start),
        Handle::End => Some(end),
        Handle::Control => control,
        _ => None,
    }
}

fn apply_drag(
    scene: &mut Scene,
    target: EntityRef,
    handle: Handle,
    goal: Point,
    pointer: Point,
    min_zone_radius: f32,
) {
    match target {
        EntityRef::Player(id) => {
            if let Some(p) = scene.player_mut(id) {
                p.pos = goal;
            }
        }
        EntityRef::Ball => {
            if let Some(b) = scene.ball_mut() {
                b.pos = goal;
            }
        }
        EntityRef::Arrow(id) => {
            if let Some(a) = scene.arrow_mut(id) {
                set_line_handle(&mut a.start, &mut a.end, &mut a.control, handle, goal);
            }
        }
        EntityRef::Pick(id) => {
            if let Some(k) = scene.pick_mut(id) {
                set_line_handle(&mut k.start, &mut k.end, &mut k.control, handle, goal);
            }
        }
        EntityRef::Zone(id) => {
            if let Some(z) = scene.zone_mut(id) {
                if handle == Handle::Edge {
                    z.radius = distance(pointer, z.center).max(min_zone_radius);
                } else {
                    z.center = goal;
                }
            }
        }
    }
}

fn set_line_handle(
    start: &mut Point,
    end: &mut Point,
    control: &mut Option<Point>,
    handle: Handle,
    goal: Point,
) {
    match handle {
        Handle::Start => *start = goal,
        Handle::End => *end = goal,
        Handle::Control => {
            if let Some(c) = control {
                *c = goal;
            }
        }
        Handle::None | Handle::Center | Handle::Edge => {}
    }
}

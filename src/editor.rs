//! The command layer: one scene, its history and the drag session.
//!
//! Every mutation goes through [`Editor::execute`] or the pointer methods so
//! that history is written at the right moments and a redraw is requested
//! after each completed change.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::codec::{self, CodecError};
use crate::edit::EditSession;
use crate::factory::{Bounds, Factory};
use crate::geometry::default_control;
use crate::hit::{Hit, hit_label_target, hit_line};
use crate::history::History;
use crate::model::{
    ArrowStyle, Document, Entity, EntityRef, Pick, Point, Team, clip_label,
};
use crate::render::raster::{self, ExportError};
use crate::render::svg;
use crate::scene::Scene;
use crate::settings::{Metrics, Placement, Settings};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddPlayer(Team),
    AddBall,
    AddArrow(ArrowStyle),
    AddPick,
    /// Pick between the two most recently added visible players.
    AddPickFromPlayers,
    AddZone,
    ClearBoard,
    ToggleTeamVisibility(Team),
    Relabel { target: EntityRef, text: String },
    /// Bends a straight arrow/pick or straightens a curved one.
    ToggleCurve(EntityRef),
    Remove(EntityRef),
    Undo,
    Redo,
}

pub struct Editor {
    scene: Scene,
    history: History,
    session: EditSession,
    metrics: Metrics,
    factory: Factory<StdRng>,
    canvas: (f32, f32),
    status: Option<String>,
    redraw: bool,
    last_line: Option<EntityRef>,
}

impl Editor {
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Deterministic scatter placement.
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, rng: StdRng) -> Self {
        let bounds = Bounds {
            width: settings.canvas_width,
            height: settings.canvas_height,
            margin: settings.metrics.scatter_margin,
        };
        Self {
            scene: Scene::new(),
            history: History::new(settings.history_limit),
            session: EditSession::new(),
            metrics: settings.metrics,
            factory: Factory::new(settings.placement, bounds, rng),
            canvas: (settings.canvas_width, settings.canvas_height),
            status: None,
            redraw: true,
            last_line: None,
        }
    }

    pub fn document(&self) -> &Document {
        self.scene.document()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn placement(&self) -> Placement {
        self.factory.placement()
    }

    /// Affects entities added from now on.
    pub fn set_placement(&mut self, placement: Placement) {
        self.factory.set_placement(placement);
    }

    /// The arrow or pick most recently created or clicked.
    pub fn last_line(&self) -> Option<EntityRef> {
        self.last_line.filter(|r| self.scene.contains(*r))
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Runs one command. Returns whether the scene changed.
    pub fn execute(&mut self, cmd: Command) -> bool {
        if self.session.pointer_leave() {
            tracing::debug!("drag ended by command");
        }
        let changed = match cmd {
            Command::Undo => {
                let changed = self.history.undo(&mut self.scene);
                if !changed {
                    self.set_status("nothing to undo");
                }
                changed
            }
            Command::Redo => {
                let changed = self.history.redo(&mut self.scene);
                if !changed {
                    self.set_status("nothing to redo");
                }
                changed
            }
            other => self.apply(other),
        };
        if changed {
            self.redraw = true;
        }
        changed
    }

    fn apply(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::AddPlayer(team) => {
                let index = self.scene.document().players_of(team).count();
                let player = self.factory.player(team, index);
                self.insert(Entity::Player(player));
            }
            Command::AddBall => {
                let ball = self.factory.ball();
                self.insert(Entity::Ball(ball));
            }
            Command::AddArrow(style) => {
                let arrow = self.factory.arrow(style);
                let r = self.insert(Entity::Arrow(arrow));
                self.last_line = Some(r);
            }
            Command::AddPick => {
                let pick = self.factory.pick();
                let r = self.insert(Entity::Pick(pick));
                self.last_line = Some(r);
            }
            Command::AddPickFromPlayers => {
                let mut visible = self.scene.document().players.iter().filter(|p| p.visible).rev();
                let (Some(last), Some(prev)) = (visible.next(), visible.next()) else {
                    self.set_status("a pick between players needs two visible players");
                    return false;
                };
                let pick = Pick::new(prev.pos, last.pos);
                let r = self.insert(Entity::Pick(pick));
                self.last_line = Some(r);
            }
            Command::AddZone => {
                let zone = self.factory.zone();
                self.insert(Entity::Zone(zone));
            }
            Command::ClearBoard => {
                if self.scene.is_empty() {
                    return false;
                }
                self.history.snapshot_before_change(&self.scene);
                self.scene.clear();
                self.last_line = None;
                tracing::info!("board cleared");
            }
            Command::ToggleTeamVisibility(team) => {
                if self.scene.document().players_of(team).next().is_none() {
                    self.set_status(format!("team {} has no players", team.label_prefix()));
                    return false;
                }
                self.history.snapshot_before_change(&self.scene);
                // Mixed visibility resolves to all shown.
                let show = self
                    .scene
                    .document()
                    .players_of(team)
                    .any(|p| !p.visible);
                for p in self.scene.players_mut().filter(|p| p.team == team) {
                    p.visible = show;
                }
                tracing::info!(team = team.label_prefix(), visible = show, "team visibility toggled");
            }
            Command::Relabel { target, text } => return self.relabel(target, &text),
            Command::ToggleCurve(target) => return self.toggle_curve(target),
            Command::Remove(target) => {
                if !self.scene.contains(target) {
                    self.set_status(format!("nothing to remove: {target} not found"));
                    return false;
                }
                self.history.snapshot_before_change(&self.scene);
                self.scene.remove(target);
                tracing::info!(entity = %target, "removed");
            }
            Command::Undo | Command::Redo => return false,
        }
        true
    }

    fn insert(&mut self, entity: Entity) -> EntityRef {
        self.history.snapshot_before_change(&self.scene);
        let r = self.scene.add(entity);
        tracing::info!(entity = %r, "added");
        r
    }

    fn relabel(&mut self, target: EntityRef, text: &str) -> bool {
        let label = clip_label(text);
        let current = match target {
            EntityRef::Player(id) => self.scene.player(id).map(|p| p.label.as_str()),
            EntityRef::Arrow(id) => self.scene.arrow(id).map(|a| a.label.as_str()),
            _ => None,
        };
        let Some(current) = current else {
            self.set_status(format!("nothing to relabel: {target} has no label"));
            return false;
        };
        if current == label {
            return false;
        }
        self.history.snapshot_before_change(&self.scene);
        match target {
            EntityRef::Player(id) => {
                if let Some(p) = self.scene.player_mut(id) {
                    p.label = label;
                }
            }
            EntityRef::Arrow(id) => {
                if let Some(a) = self.scene.arrow_mut(id) {
                    a.label = label;
                }
            }
            _ => {}
        }
        tracing::info!(entity = %target, "relabelled");
        true
    }

    fn toggle_curve(&mut self, target: EntityRef) -> bool {
        let line = match target {
            EntityRef::Arrow(id) => self.scene.arrow(id).map(|a| (a.start, a.end, a.control)),
            EntityRef::Pick(id) => self.scene.pick(id).map(|k| (k.start, k.end, k.control)),
            _ => None,
        };
        let Some((start, end, control)) = line else {
            self.set_status(format!("nothing to bend: {target} is not a line"));
            return false;
        };
        let next = match control {
            Some(_) => None,
            None => Some(default_control(start, end)),
        };
        self.history.snapshot_before_change(&self.scene);
        match target {
            EntityRef::Arrow(id) => {
                if let Some(a) = self.scene.arrow_mut(id) {
                    a.control = next;
                }
            }
            EntityRef::Pick(id) => {
                if let Some(k) = self.scene.pick_mut(id) {
                    k.control = next;
                }
            }
            _ => {}
        }
        self.last_line = Some(target);
        tracing::info!(entity = %target, curved = next.is_some(), "curve toggled");
        true
    }

    /// Relabels whatever a double-click at `p` points at.
    pub fn relabel_at(&mut self, p: Point, text: &str) -> bool {
        match hit_label_target(self.scene.document(), &self.metrics, p) {
            Some(target) => self.execute(Command::Relabel {
                target,
                text: text.to_string(),
            }),
            None => {
                self.set_status("nothing to relabel here");
                false
            }
        }
    }

    pub fn label_target_at(&self, p: Point) -> Option<EntityRef> {
        hit_label_target(self.scene.document(), &self.metrics, p)
    }

    pub fn pointer_down(&mut self, p: Point) -> Option<Hit> {
        let hit = self.session.pointer_down(&self.scene, &self.metrics, p);
        if hit.is_none() {
            if let Some(line) = hit_line(self.scene.document(), &self.metrics, p) {
                self.last_line = Some(line);
            }
        }
        if let Some(h) = hit {
            if matches!(h.target, EntityRef::Arrow(_) | EntityRef::Pick(_)) {
                self.last_line = Some(h.target);
            }
        }
        hit
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        let moved = self
            .session
            .pointer_move(&mut self.scene, &mut self.history, &self.metrics, p);
        if moved {
            self.redraw = true;
        }
        moved
    }

    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.session.pointer_leave()
    }

    pub fn save(&self) -> Result<String, CodecError> {
        let text = codec::serialize(self.scene.document())?;
        tracing::info!(entities = self.scene.len(), bytes = text.len(), "document serialized");
        Ok(text)
    }

    /// Replaces the scene with a parsed document. A malformed document
    /// changes nothing, history included. Loading is undoable.
    pub fn load(&mut self, text: &str) -> Result<(), CodecError> {
        let mut doc = codec::deserialize(text)?;
        doc.clamp_zone_radii(self.metrics.min_zone_radius);
        self.session.pointer_leave();
        self.history.snapshot_before_change(&self.scene);
        self.scene.restore(doc);
        self.last_line = None;
        self.redraw = true;
        tracing::info!(entities = self.scene.len(), "document loaded");
        Ok(())
    }

    pub fn export_svg(&self) -> String {
        let (w, h) = self.canvas;
        svg::document_to_svg(self.scene.document(), &self.metrics, w, h)
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        let (w, h) = self.canvas;
        raster::document_to_png(
            self.scene.document(),
            &self.metrics,
            w.round().max(0.0) as u32,
            h.round().max(0.0) as u32,
        )
    }
}

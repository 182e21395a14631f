//! The scene store: sole owner of every entity record.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::model::{Arrow, Ball, Document, Entity, EntityRef, Pick, Player, Zone};

#[derive(Clone, Debug)]
pub struct Scene {
    doc: Document,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            doc: Document::default(),
            next_id: 1,
        }
    }

    pub fn from_document(mut doc: Document) -> Self {
        doc.normalize_ids();
        let next_id = doc.max_id() + 1;
        Self { doc, next_id }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends the entity to its collection, or replaces the ball.
    pub fn add(&mut self, entity: Entity) -> EntityRef {
        match entity {
            Entity::Player(mut p) => {
                p.id = self.allocate_id();
                let id = p.id;
                self.doc.players.push(p);
                EntityRef::Player(id)
            }
            Entity::Ball(b) => {
                self.doc.ball = Some(b);
                EntityRef::Ball
            }
            Entity::Arrow(mut a) => {
                a.id = self.allocate_id();
                let id = a.id;
                self.doc.arrows.push(a);
                EntityRef::Arrow(id)
            }
            Entity::Pick(mut p) => {
                p.id = self.allocate_id();
                let id = p.id;
                self.doc.picks.push(p);
                EntityRef::Pick(id)
            }
            Entity::Zone(mut z) => {
                z.id = self.allocate_id();
                let id = z.id;
                self.doc.zones.push(z);
                EntityRef::Zone(id)
            }
        }
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, target: EntityRef) -> bool {
        match target {
            EntityRef::Player(id) => remove_by(&mut self.doc.players, |p| p.id == id),
            EntityRef::Ball => self.doc.ball.take().is_some(),
            EntityRef::Arrow(id) => remove_by(&mut self.doc.arrows, |a| a.id == id),
            EntityRef::Pick(id) => remove_by(&mut self.doc.picks, |p| p.id == id),
            EntityRef::Zone(id) => remove_by(&mut self.doc.zones, |z| z.id == id),
        }
    }

    pub fn clear(&mut self) {
        self.doc = Document::default();
    }

    pub fn snapshot(&self) -> Document {
        self.doc.clone()
    }

    /// Replaces the whole document. Ids stay unique and the id counter never
    /// moves backwards.
    pub fn restore(&mut self, mut doc: Document) {
        doc.normalize_ids();
        self.next_id = self.next_id.max(doc.max_id() + 1);
        self.doc = doc;
    }

    pub fn contains(&self, target: EntityRef) -> bool {
        match target {
            EntityRef::Player(id) => self.player(id).is_some(),
            EntityRef::Ball => self.doc.ball.is_some(),
            EntityRef::Arrow(id) => self.arrow(id).is_some(),
            EntityRef::Pick(id) => self.pick(id).is_some(),
            EntityRef::Zone(id) => self.zone(id).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.doc.players.len()
            + usize::from(self.doc.ball.is_some())
            + self.doc.arrows.len()
            + self.doc.picks.len()
            + self.doc.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    pub fn player(&self, id: u64) -> Option<&Player> {
        self.doc.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u64) -> Option<&mut Player> {
        self.doc.players.iter_mut().find(|p| p.id == id)
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.doc.players.iter_mut()
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.doc.ball.as_ref()
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.doc.ball.as_mut()
    }

    pub fn arrow(&self, id: u64) -> Option<&Arrow> {
        self.doc.arrows.iter().find(|a| a.id == id)
    }

    pub fn arrow_mut(&mut self, id: u64) -> Option<&mut Arrow> {
        self.doc.arrows.iter_mut().find(|a| a.id == id)
    }

    pub fn pick(&self, id: u64) -> Option<&Pick> {
        self.doc.picks.iter().find(|p| p.id == id)
    }

    pub fn pick_mut(&mut self, id: u64) -> Option<&mut Pick> {
        self.doc.picks.iter_mut().find(|p| p.id == id)
    }

    pub fn zone(&self, id: u64) -> Option<&Zone> {
        self.doc.zones.iter().find(|z| z.id == id)
    }

    pub fn zone_mut(&mut self, id: u64) -> Option<&mut Zone> {
        self.doc.zones.iter_mut().find(|z| z.id == id)
    }
}

fn remove_by<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !pred(item));
    items.len() != before
}

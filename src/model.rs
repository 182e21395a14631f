//! Scene entities and the serializable scene document.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Longest label accepted by a relabel; longer input is truncated.
pub const MAX_LABEL_CHARS: usize = 24;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    pub fn label_prefix(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }

    /// Spawn point of the first player of the team.
    pub fn home(self) -> Point {
        match self {
            Team::A => Point::new(100.0, 100.0),
            Team::B => Point::new(200.0, 100.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArrowStyle {
    #[default]
    Solid,
    Dashed,
    Emphasis,
}

impl ArrowStyle {
    pub const ALL: [ArrowStyle; 3] = [ArrowStyle::Solid, ArrowStyle::Dashed, ArrowStyle::Emphasis];

    pub fn name(self) -> &'static str {
        match self {
            ArrowStyle::Solid => "solid",
            ArrowStyle::Dashed => "dashed",
            ArrowStyle::Emphasis => "emphasis",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    #[serde(default)]
    pub id: u64,
    pub team: Team,
    pub pos: Point,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Player {
    pub fn new(team: Team, pos: Point, label: impl Into<String>) -> Self {
        Self {
            id: 0,
            team,
            pos,
            label: label.into(),
            visible: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ball {
    pub pos: Point,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Arrow {
    #[serde(default)]
    pub id: u64,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub control: Option<Point>,
    #[serde(default)]
    pub style: ArrowStyle,
    #[serde(default)]
    pub label: String,
}

impl Arrow {
    pub fn straight(start: Point, end: Point, style: ArrowStyle) -> Self {
        Self {
            id: 0,
            start,
            end,
            control: None,
            style,
            label: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pick {
    #[serde(default)]
    pub id: u64,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub control: Option<Point>,
}

impl Pick {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: 0,
            start,
            end,
            control: None,
        }
    }

    /// A pick whose endpoints coincide is drawn as a point marker.
    pub fn is_point(&self) -> bool {
        self.control.is_none() && self.start == self.end
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    #[serde(default)]
    pub id: u64,
    pub center: Point,
    pub radius: f32,
}

impl Zone {
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            id: 0,
            center,
            radius,
        }
    }
}

/// An owned entity, as handed to the scene store.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Player(Player),
    Ball(Ball),
    Arrow(Arrow),
    Pick(Pick),
    Zone(Zone),
}

/// Non-owning identity of an entity inside a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Player(u64),
    Ball,
    Arrow(u64),
    Pick(u64),
    Zone(u64),
}

impl EntityRef {
    pub fn kind_name(self) -> &'static str {
        match self {
            EntityRef::Player(_) => "player",
            EntityRef::Ball => "ball",
            EntityRef::Arrow(_) => "arrow",
            EntityRef::Pick(_) => "pick",
            EntityRef::Zone(_) => "zone",
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Player(id)
            | EntityRef::Arrow(id)
            | EntityRef::Pick(id)
            | EntityRef::Zone(id) => write!(f, "{} {}", self.kind_name(), id),
            EntityRef::Ball => f.write_str("ball"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<Player>,
    #[serde(default)]
    pub ball: Option<Ball>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrows: Vec<Arrow>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub picks: Vec<Pick>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zones: Vec<Zone>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
            && self.ball.is_none()
            && self.arrows.is_empty()
            && self.picks.is_empty()
            && self.zones.is_empty()
    }

    pub fn players_of(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == team)
    }

    pub fn max_id(&self) -> u64 {
        let players = self.players.iter().map(|p| p.id);
        let arrows = self.arrows.iter().map(|a| a.id);
        let picks = self.picks.iter().map(|p| p.id);
        let zones = self.zones.iter().map(|z| z.id);
        players
            .chain(arrows)
            .chain(picks)
            .chain(zones)
            .max()
            .unwrap_or(0)
    }

    /// Gives every entity lacking a unique non-zero id a fresh one.
    /// Entities that already have unique ids keep them.
    pub fn normalize_ids(&mut self) {
        let mut next = self.max_id() + 1;
        let mut seen = HashSet::new();
        let mut fix = |id: &mut u64| {
            if *id == 0 || !seen.insert(*id) {
                *id = next;
                seen.insert(next);
                next += 1;
            }
        };
        for p in &mut self.players {
            fix(&mut p.id);
        }
        for a in &mut self.arrows {
            fix(&mut a.id);
        }
        for p in &mut self.picks {
            fix(&mut p.id);
        }
        for z in &mut self.zones {
            fix(&mut z.id);
        }
    }

    pub fn clamp_zone_radii(&mut self, floor: f32) {
        for z in &mut self.zones {
            if !(z.radius >= floor) {
                z.radius = floor;
            }
        }
    }

    /// Whether every coordinate and radius is a finite number.
    pub fn is_finite(&self) -> bool {
        self.players.iter().all(|p| p.pos.is_finite())
            && self.ball.is_none_or(|b| b.pos.is_finite())
            && self.arrows.iter().all(|a| {
                a.start.is_finite() && a.end.is_finite() && a.control.is_none_or(Point::is_finite)
            })
            && self.picks.iter().all(|p| {
                p.start.is_finite() && p.end.is_finite() && p.control.is_none_or(Point::is_finite)
            })
            && self
                .zones
                .iter()
                .all(|z| z.center.is_finite() && z.radius.is_finite())
    }
}

/// Truncates a label to [`MAX_LABEL_CHARS`] characters.
pub fn clip_label(text: &str) -> String {
    text.trim().chars().take(MAX_LABEL_CHARS).collect()
}

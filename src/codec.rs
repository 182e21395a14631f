//! JSON persistence for the scene document.
//!
//! Saved documents carry a `version` field. Documents without one that use
//! the older flat layout (`redPlayers`, `bluePlayers`, arrows as
//! `{x1, y1, x2, y2, dashed}`) are converted on load. Missing or `null`
//! collections always load as empty.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Arrow, ArrowStyle, Ball, Document, Pick, Player, Point, Team, Zone, null_as_default};

pub const FORMAT_VERSION: u64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("malformed document: {0}")]
    Invalid(&'static str),
}

#[derive(Serialize)]
struct Stored<'a> {
    version: u64,
    #[serde(flatten)]
    document: &'a Document,
}

pub fn serialize(doc: &Document) -> Result<String, CodecError> {
    let stored = Stored {
        version: FORMAT_VERSION,
        document: doc,
    };
    Ok(serde_json::to_string_pretty(&stored)?)
}

/// Parses and validates a document. Ids are normalized so every entity has a
/// unique one.
pub fn deserialize(text: &str) -> Result<Document, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(CodecError::Invalid("expected a JSON object at the top level"));
    };
    let mut doc = if is_legacy(&map) {
        tracing::info!("converting legacy document layout");
        serde_json::from_value::<LegacyDocument>(Value::Object(map))?.into_document()
    } else {
        if let Some(version) = map.get("version").and_then(Value::as_u64) {
            if version > FORMAT_VERSION {
                tracing::warn!(version, "document is newer than this build; unknown fields are ignored");
            }
        }
        serde_json::from_value::<Document>(Value::Object(map))?
    };
    if !doc.is_finite() {
        return Err(CodecError::Invalid("non-finite coordinate"));
    }
    doc.normalize_ids();
    Ok(doc)
}

fn is_legacy(map: &Map<String, Value>) -> bool {
    !map.contains_key("version")
        && (map.contains_key("redPlayers") || map.contains_key("bluePlayers"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    red_players: Vec<LegacyPlayer>,
    #[serde(default, deserialize_with = "null_as_default")]
    blue_players: Vec<LegacyPlayer>,
    #[serde(default, deserialize_with = "null_as_default")]
    arrows: Vec<LegacyArrow>,
    #[serde(default, deserialize_with = "null_as_default")]
    picks: Vec<LegacyPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    zones: Vec<LegacyZone>,
    #[serde(default)]
    ball: Option<LegacyPoint>,
}

#[derive(Deserialize)]
struct LegacyPlayer {
    x: f32,
    y: f32,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Deserialize)]
struct LegacyArrow {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    #[serde(default)]
    dashed: bool,
}

#[derive(Deserialize)]
struct LegacyPoint {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct LegacyZone {
    x: f32,
    y: f32,
    radius: f32,
}

impl LegacyDocument {
    fn into_document(self) -> Document {
        let player = |team: Team| {
            move |p: LegacyPlayer| {
                Player::new(team, Point::new(p.x, p.y), p.label.unwrap_or_default())
            }
        };
        let players = self
            .red_players
            .into_iter()
            .map(player(Team::A))
            .chain(self.blue_players.into_iter().map(player(Team::B)))
            .collect();
        let arrows = self
            .arrows
            .into_iter()
            .map(|a| {
                let style = if a.dashed {
                    ArrowStyle::Dashed
                } else {
                    ArrowStyle::Solid
                };
                Arrow::straight(Point::new(a.x1, a.y1), Point::new(a.x2, a.y2), style)
            })
            .collect();
        let picks = self
            .picks
            .into_iter()
            .map(|p| Pick::new(Point::new(p.x, p.y), Point::new(p.x, p.y)))
            .collect();
        let zones = self
            .zones
            .into_iter()
            .map(|z| Zone::new(Point::new(z.x, z.y), z.radius))
            .collect();
        Document {
            players,
            ball: self.ball.map(|b| Ball {
                pos: Point::new(b.x, b.y),
            }),
            arrows,
            picks,
            zones,
        }
    }
}

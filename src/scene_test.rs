use super::*;
use crate::model::{ArrowStyle, Point, Team};

fn player_at(x: f32, y: f32) -> Entity {
    Entity::Player(Player::new(Team::A, Point::new(x, y), "A1"))
}

#[test]
fn add_assigns_increasing_ids() {
    let mut scene = Scene::new();
    let a = scene.add(player_at(0.0, 0.0));
    let b = scene.add(Entity::Arrow(Arrow::straight(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        ArrowStyle::Solid,
    )));
    assert_eq!(a, EntityRef::Player(1));
    assert_eq!(b, EntityRef::Arrow(2));
    assert_eq!(scene.len(), 2);
}

#[test]
fn adding_a_ball_replaces_the_old_one() {
    let mut scene = Scene::new();
    scene.add(Entity::Ball(Ball {
        pos: Point::new(1.0, 1.0),
    }));
    let r = scene.add(Entity::Ball(Ball {
        pos: Point::new(2.0, 2.0),
    }));
    assert_eq!(r, EntityRef::Ball);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.ball().map(|b| b.pos), Some(Point::new(2.0, 2.0)));
}

#[test]
fn remove_by_identity_and_absent_is_noop() {
    let mut scene = Scene::new();
    let r = scene.add(player_at(5.0, 5.0));
    assert!(scene.remove(r));
    assert!(!scene.remove(r));
    assert!(!scene.remove(EntityRef::Zone(99)));
    assert!(scene.is_empty());
}

#[test]
fn clear_empties_everything() {
    let mut scene = Scene::new();
    scene.add(player_at(5.0, 5.0));
    scene.add(Entity::Zone(Zone::new(Point::new(1.0, 1.0), 30.0)));
    scene.add(Entity::Ball(Ball {
        pos: Point::new(1.0, 1.0),
    }));
    scene.clear();
    assert!(scene.is_empty());
    assert!(scene.ball().is_none());
}

#[test]
fn snapshot_is_a_deep_copy() {
    let mut scene = Scene::new();
    let r = scene.add(player_at(5.0, 5.0));
    let snap = scene.snapshot();
    if let EntityRef::Player(id) = r {
        scene.player_mut(id).expect("player").pos = Point::new(50.0, 50.0);
    }
    assert_eq!(snap.players[0].pos, Point::new(5.0, 5.0));
}

#[test]
fn restore_never_moves_id_counter_backwards() {
    let mut scene = Scene::new();
    for _ in 0..5 {
        scene.add(player_at(0.0, 0.0));
    }
    scene.restore(Document::default());
    let r = scene.add(player_at(0.0, 0.0));
    assert_eq!(r, EntityRef::Player(6));
}

#[test]
fn restore_advances_counter_past_loaded_ids() {
    let mut scene = Scene::new();
    let mut doc = Document::default();
    doc.zones.push(Zone {
        id: 40,
        ..Zone::new(Point::new(0.0, 0.0), 30.0)
    });
    scene.restore(doc);
    let r = scene.add(player_at(0.0, 0.0));
    assert_eq!(r, EntityRef::Player(41));
    assert!(scene.contains(EntityRef::Zone(40)));
}

#[test]
fn from_document_normalizes_ids() {
    let doc = Document {
        players: vec![
            Player::new(Team::A, Point::new(0.0, 0.0), "A1"),
            Player::new(Team::B, Point::new(0.0, 0.0), "B1"),
        ],
        ..Document::default()
    };
    let scene = Scene::from_document(doc);
    assert!(scene.contains(EntityRef::Player(1)));
    assert!(scene.contains(EntityRef::Player(2)));
}

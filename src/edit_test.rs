use super::*;
use crate::model::{Arrow, ArrowStyle, Entity, Player, Team, Zone};

fn metrics() -> Metrics {
    Metrics::default()
}

fn scene_with(entity: Entity) -> (Scene, EntityRef) {
    let mut scene = Scene::new();
    let r = scene.add(entity);
    (scene, r)
}

// =============================================================================
// transitions
// =============================================================================

#[test]
fn pointer_down_on_empty_space_stays_idle() {
    let scene = Scene::new();
    let mut session = EditSession::new();
    assert!(session.pointer_down(&scene, &metrics(), Point::new(10.0, 10.0)).is_none());
    assert!(!session.is_dragging());
}

#[test]
fn pointer_down_while_dragging_is_ignored() {
    let mut scene = Scene::new();
    let first = scene.add(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    scene.add(Entity::Player(Player::new(Team::B, Point::new(300.0, 100.0), "B1")));
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    assert!(session.pointer_down(&scene, &metrics(), Point::new(300.0, 100.0)).is_none());
    assert_eq!(session.target().map(|(t, _)| t), Some(first));
}

#[test]
fn pointer_up_and_leave_return_to_idle() {
    let (scene, _) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    assert!(session.pointer_up());
    assert!(!session.pointer_up());

    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    assert!(session.pointer_leave());
    assert!(matches!(session.state(), DragState::Idle));
}

// =============================================================================
// mutations
// =============================================================================

#[test]
fn drag_keeps_the_grab_offset() {
    let (mut scene, r) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(105.0, 103.0));
    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(125.0, 143.0));
    let EntityRef::Player(id) = r else {
        panic!("expected a player ref");
    };
    assert_eq!(scene.player(id).map(|p| p.pos), Some(Point::new(120.0, 140.0)));
}

#[test]
fn zone_edge_drag_respects_radius_floor() {
    let (mut scene, r) = scene_with(Entity::Zone(Zone::new(Point::new(600.0, 300.0), 50.0)));
    let mut history = History::default();
    let mut session = EditSession::new();
    let hit = session.pointer_down(&scene, &metrics(), Point::new(650.0, 300.0));
    assert_eq!(hit.map(|h| h.handle), Some(Handle::Edge));

    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(610.0, 300.0));
    let EntityRef::Zone(id) = r else {
        panic!("expected a zone ref");
    };
    assert_eq!(scene.zone(id).map(|z| z.radius), Some(20.0));

    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(600.0, 380.0));
    assert_eq!(scene.zone(id).map(|z| z.radius), Some(80.0));
    assert_eq!(scene.zone(id).map(|z| z.center), Some(Point::new(600.0, 300.0)));
}

#[test]
fn zone_interior_drag_moves_center() {
    let (mut scene, r) = scene_with(Entity::Zone(Zone::new(Point::new(600.0, 300.0), 50.0)));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(610.0, 300.0));
    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(630.0, 320.0));
    let EntityRef::Zone(id) = r else {
        panic!("expected a zone ref");
    };
    let zone = scene.zone(id).expect("zone");
    assert_eq!(zone.center, Point::new(620.0, 320.0));
    assert_eq!(zone.radius, 50.0);
}

#[test]
fn control_handle_drag_moves_only_control() {
    let mut arrow = Arrow::straight(Point::new(400.0, 100.0), Point::new(500.0, 150.0), ArrowStyle::Solid);
    arrow.control = Some(Point::new(450.0, 80.0));
    let (mut scene, r) = scene_with(Entity::Arrow(arrow));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(450.0, 80.0));
    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(470.0, 40.0));
    let EntityRef::Arrow(id) = r else {
        panic!("expected an arrow ref");
    };
    let a = scene.arrow(id).expect("arrow");
    assert_eq!(a.control, Some(Point::new(470.0, 40.0)));
    assert_eq!(a.start, Point::new(400.0, 100.0));
    assert_eq!(a.end, Point::new(500.0, 150.0));
}

// =============================================================================
// history policy
// =============================================================================

#[test]
fn stationary_move_writes_no_history() {
    let (mut scene, _) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let before = scene.snapshot();
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    assert!(!session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(100.0, 100.0)));
    assert!(session.pointer_up());
    assert!(!history.can_undo());
    assert_eq!(scene.snapshot(), before);
}

#[test]
fn returning_to_the_press_point_still_moves() {
    let (mut scene, r) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    assert!(session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(130.0, 100.0)));
    assert!(session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(100.0, 100.0)));
    let EntityRef::Player(id) = r else {
        panic!("expected a player ref");
    };
    assert_eq!(scene.player(id).expect("player").pos, Point::new(100.0, 100.0));
    assert_eq!(history.undo_len(), 1);
}

#[test]
fn one_gesture_writes_one_snapshot() {
    let (mut scene, _) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let before = scene.snapshot();
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    for step in 1..10 {
        let d = step as f32 * 5.0;
        session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(100.0 + d, 100.0));
    }
    session.pointer_up();
    assert_eq!(history.undo_len(), 1);
    history.undo(&mut scene);
    assert_eq!(scene.snapshot(), before);
}

#[test]
fn leave_keeps_partial_mutation() {
    let (mut scene, r) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(150.0, 100.0));
    session.pointer_leave();
    let EntityRef::Player(id) = r else {
        panic!("expected a player ref");
    };
    assert_eq!(scene.player(id).map(|p| p.pos), Some(Point::new(150.0, 100.0)));
    assert!(!session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(300.0, 100.0)));
}

#[test]
fn vanished_target_ends_drag() {
    let (mut scene, _) = scene_with(Entity::Player(Player::new(Team::A, Point::new(100.0, 100.0), "A1")));
    let mut history = History::default();
    let mut session = EditSession::new();
    session.pointer_down(&scene, &metrics(), Point::new(100.0, 100.0));
    scene.clear();
    assert!(!session.pointer_move(&mut scene, &mut history, &metrics(), Point::new(120.0, 100.0)));
    assert!(!session.is_dragging());
    assert!(!history.can_undo());
}

#[test]
fn anchor_of_line_handles() {
    let (scene, r) = scene_with(Entity::Arrow(Arrow::straight(
        Point::new(1.0, 2.0),
        Point::new(3.0, 4.0),
        ArrowStyle::Dashed,
    )));
    let end = Hit {
        target: r,
        handle: Handle::End,
    };
    let control = Hit {
        target: r,
        handle: Handle::Control,
    };
    assert_eq!(anchor_of(&scene, end), Some(Point::new(3.0, 4.0)));
    assert_eq!(anchor_of(&scene, control), None);
}

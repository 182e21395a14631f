use super::*;

fn player(id: u64, team: Team) -> Player {
    Player {
        id,
        ..Player::new(team, Point::new(0.0, 0.0), "")
    }
}

// =============================================================================
// ids
// =============================================================================

#[test]
fn max_id_ignores_the_ball() {
    let doc = Document {
        players: vec![player(3, Team::A)],
        ball: Some(Ball {
            pos: Point::new(1.0, 1.0),
        }),
        zones: vec![Zone {
            id: 7,
            ..Zone::new(Point::new(0.0, 0.0), 30.0)
        }],
        ..Document::default()
    };
    assert_eq!(doc.max_id(), 7);
}

#[test]
fn normalize_ids_fills_zero_and_duplicate_ids() {
    let mut doc = Document {
        players: vec![player(0, Team::A), player(4, Team::B), player(4, Team::A)],
        ..Document::default()
    };
    doc.normalize_ids();
    let ids: Vec<u64> = doc.players.iter().map(|p| p.id).collect();
    assert_eq!(ids[1], 4);
    assert!(ids.iter().all(|id| *id != 0));
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn normalize_ids_keeps_unique_ids() {
    let mut doc = Document {
        players: vec![player(2, Team::A), player(9, Team::B)],
        ..Document::default()
    };
    let before = doc.clone();
    doc.normalize_ids();
    assert_eq!(doc, before);
}

// =============================================================================
// invariants
// =============================================================================

#[test]
fn clamp_zone_radii_raises_small_and_nan_radii() {
    let mut doc = Document {
        zones: vec![
            Zone::new(Point::new(0.0, 0.0), 5.0),
            Zone::new(Point::new(0.0, 0.0), f32::NAN),
            Zone::new(Point::new(0.0, 0.0), 80.0),
        ],
        ..Document::default()
    };
    doc.clamp_zone_radii(20.0);
    let radii: Vec<f32> = doc.zones.iter().map(|z| z.radius).collect();
    assert_eq!(radii, vec![20.0, 20.0, 80.0]);
}

#[test]
fn non_finite_control_point_is_detected() {
    let mut arrow = Arrow::straight(Point::new(0.0, 0.0), Point::new(1.0, 1.0), ArrowStyle::Solid);
    arrow.control = Some(Point::new(f32::INFINITY, 0.0));
    let doc = Document {
        arrows: vec![arrow],
        ..Document::default()
    };
    assert!(!doc.is_finite());
    assert!(Document::default().is_finite());
}

#[test]
fn degenerate_pick_is_a_point() {
    let p = Point::new(5.0, 5.0);
    assert!(Pick::new(p, p).is_point());
    assert!(!Pick::new(p, Point::new(6.0, 5.0)).is_point());
}

// =============================================================================
// labels and display
// =============================================================================

#[test]
fn clip_label_trims_and_truncates() {
    assert_eq!(clip_label("  PG  "), "PG");
    let long = "x".repeat(MAX_LABEL_CHARS + 10);
    assert_eq!(clip_label(&long).chars().count(), MAX_LABEL_CHARS);
}

#[test]
fn entity_ref_display_names_kind_and_id() {
    assert_eq!(EntityRef::Arrow(12).to_string(), "arrow 12");
    assert_eq!(EntityRef::Ball.to_string(), "ball");
}

#[test]
fn players_of_filters_by_team() {
    let doc = Document {
        players: vec![player(1, Team::A), player(2, Team::B), player(3, Team::A)],
        ..Document::default()
    };
    assert_eq!(doc.players_of(Team::A).count(), 2);
    assert_eq!(doc.players_of(Team::B).count(), 1);
}

// =============================================================================
// layering
// =============================================================================

#[test]
fn editing_core_has_no_ui_dependency() {
    let core = [
        ("model.rs", include_str!("model.rs")),
        ("geometry.rs", include_str!("geometry.rs")),
        ("scene.rs", include_str!("scene.rs")),
        ("hit.rs", include_str!("hit.rs")),
        ("edit.rs", include_str!("edit.rs")),
        ("history.rs", include_str!("history.rs")),
        ("codec.rs", include_str!("codec.rs")),
        ("editor.rs", include_str!("editor.rs")),
        ("render/mod.rs", include_str!("render/mod.rs")),
    ];
    for (name, source) in core {
        assert!(!source.contains("eframe"), "{name} reaches into the shell");
    }
}

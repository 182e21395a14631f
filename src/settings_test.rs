use super::*;

#[test]
fn defaults_match_board_metrics() {
    let s = Settings::default();
    assert_eq!(s.history_limit, 200);
    assert_eq!(s.placement, Placement::Fixed);
    assert_eq!(s.metrics.player_radius, 15.0);
    assert_eq!(s.metrics.min_zone_radius, 20.0);
    assert_eq!(s.metrics.zone_edge_tolerance, 6.0);
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    let text = r#"
slot_name = "press"
placement = "scatter"

[metrics]
handle_radius = 12.0
"#;
    let s = parse_settings(text, true).expect("toml parses");
    assert_eq!(s.slot_name, "press");
    assert_eq!(s.placement, Placement::Scatter);
    assert_eq!(s.metrics.handle_radius, 12.0);
    assert_eq!(s.metrics.player_radius, 15.0);
    assert_eq!(s.file_path, "play.json");
}

#[test]
fn json_is_accepted_when_toml_fails() {
    let s = parse_settings(r#"{"history_limit": 5}"#, true).expect("json fallback");
    assert_eq!(s.history_limit, 5);
}

#[test]
fn garbage_is_rejected() {
    assert!(parse_settings("history_limit = [", true).is_none());
}

#[test]
fn save_then_load_round_trips_through_toml() {
    let dir = std::env::temp_dir().join(format!("playboard-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("settings.toml");
    let settings = Settings {
        canvas_width: 800.0,
        placement: Placement::Scatter,
        ..Settings::default()
    };
    save_settings(&path, &settings).expect("save");
    let loaded = load_settings(&path).expect("load");
    assert_eq!(loaded, settings);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_loads_as_none() {
    let path = std::env::temp_dir().join("playboard-definitely-missing.toml");
    assert!(load_settings(&path).is_none());
}

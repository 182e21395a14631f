use super::*;

fn ids(rows: &[Ranked]) -> Vec<CommandId> {
    rows.iter().map(|r| r.entry.id).collect()
}

fn ready() -> CommandContext {
    CommandContext {
        has_undo: true,
        has_redo: true,
        has_line: true,
        player_count: 2,
    }
}

// =============================================================================
// ranking
// =============================================================================

#[test]
fn empty_query_lists_everything_with_blocked_rows_last() {
    let rows = rank("", CommandContext::default());
    assert_eq!(rows.len(), ENTRIES.len());
    assert_eq!(rows[0].entry.id, CommandId::AddPlayerA);
    let blocked: Vec<CommandId> = rows
        .iter()
        .skip_while(|r| r.blocker.is_none())
        .map(|r| r.entry.id)
        .collect();
    assert_eq!(
        blocked,
        vec![
            CommandId::AddPickFromPlayers,
            CommandId::ToggleCurve,
            CommandId::RemoveLine,
            CommandId::Undo,
            CommandId::Redo,
        ]
    );
}

#[test]
fn nothing_is_blocked_when_the_editor_is_ready() {
    let rows = rank("", ready());
    assert!(rows.iter().all(|r| r.blocker.is_none()));
}

#[test]
fn keywords_match_as_well_as_titles() {
    let rows = rank("screen", CommandContext::default());
    assert_eq!(rows[0].entry.id, CommandId::AddPick);
    let between = rows
        .iter()
        .find(|r| r.entry.id == CommandId::AddPickFromPlayers)
        .expect("pick between players listed");
    assert_eq!(between.blocker, Some("needs two visible players"));
}

#[test]
fn query_is_case_insensitive() {
    assert_eq!(ids(&rank("REDO", ready()))[0], CommandId::Redo);
}

#[test]
fn unmatched_query_lists_nothing() {
    assert!(rank("qqxqq", ready()).is_empty());
}

// =============================================================================
// selection
// =============================================================================

#[test]
fn arrow_keys_stay_within_runnable_rows() {
    let mut palette = CommandPalette::default();
    palette.step(true, 2);
    palette.step(true, 2);
    palette.step(true, 2);
    assert_eq!(palette.selected, 1);
    palette.step(false, 2);
    palette.step(false, 2);
    assert_eq!(palette.selected, 0);
    palette.step(true, 0);
    assert_eq!(palette.selected, 0);
}

#[test]
fn picking_a_blocked_row_reports_why_and_stays_open() {
    let mut palette = CommandPalette::default();
    palette.open("undo");
    let rows = rank("undo", CommandContext::default());
    let undo = rows
        .iter()
        .find(|r| r.entry.id == CommandId::Undo)
        .expect("undo listed");
    assert_eq!(palette.pick(undo), PaletteOutcome::Blocked("nothing to undo"));
    assert!(palette.open);
}

#[test]
fn picking_a_runnable_row_closes_the_palette() {
    let mut palette = CommandPalette::default();
    palette.open("zone");
    let rows = rank("zone", ready());
    assert_eq!(palette.pick(&rows[0]), PaletteOutcome::Run(CommandId::AddZone));
    assert!(!palette.open);
    assert!(palette.query.is_empty());
}

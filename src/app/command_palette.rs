#[cfg(test)]
#[path = "command_palette_test.rs"]
mod command_palette_test;

use std::cmp::Reverse;

use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::editor::Command;
use crate::model::{ArrowStyle, Team};

use super::BoardApp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandId {
    AddPlayerA,
    AddPlayerB,
    AddBall,
    AddSolidArrow,
    AddDashedArrow,
    AddEmphasisArrow,
    AddPick,
    AddPickFromPlayers,
    AddZone,
    ToggleTeamA,
    ToggleTeamB,
    ToggleCurve,
    RemoveLine,
    ClearBoard,
    Undo,
    Redo,
    SaveJson,
    LoadJson,
    QuickSave,
    QuickLoad,
    SlotSave,
    SlotLoad,
    ExportSvg,
    ExportPng,
    ToggleScatter,
    Help,
}

pub(super) struct PaletteEntry {
    id: CommandId,
    title: &'static str,
    keywords: &'static str,
    keys: Option<&'static str>,
}

const fn entry(id: CommandId, title: &'static str, keywords: &'static str) -> PaletteEntry {
    PaletteEntry { id, title, keywords, keys: None }
}

const fn keyed(id: CommandId, title: &'static str, keywords: &'static str, keys: &'static str) -> PaletteEntry {
    PaletteEntry { id, title, keywords, keys: Some(keys) }
}

const ENTRIES: &[PaletteEntry] = &[
    entry(CommandId::AddPlayerA, "Add: Team A player", "player team a red"),
    entry(CommandId::AddPlayerB, "Add: Team B player", "player team b blue"),
    entry(CommandId::AddBall, "Add: Ball", "ball"),
    entry(CommandId::AddSolidArrow, "Add: Solid arrow", "arrow solid run cut"),
    entry(CommandId::AddDashedArrow, "Add: Dashed arrow", "arrow dashed pass"),
    entry(CommandId::AddEmphasisArrow, "Add: Emphasis arrow", "arrow emphasis thick drive"),
    entry(CommandId::AddPick, "Add: Pick", "pick screen"),
    entry(CommandId::AddPickFromPlayers, "Add: Pick between last two players", "pick screen players between"),
    entry(CommandId::AddZone, "Add: Zone", "zone area circle"),
    entry(CommandId::ToggleTeamA, "Team A: Show/hide", "visibility hide show red"),
    entry(CommandId::ToggleTeamB, "Team B: Show/hide", "visibility hide show blue"),
    entry(CommandId::ToggleCurve, "Line: Toggle curve", "bend straighten arrow pick"),
    entry(CommandId::RemoveLine, "Line: Remove", "delete arrow pick"),
    entry(CommandId::ClearBoard, "Edit: Clear board", "reset wipe"),
    keyed(CommandId::Undo, "Edit: Undo", "back revert", "⌘Z"),
    keyed(CommandId::Redo, "Edit: Redo", "forward again", "⌘⇧Z"),
    keyed(CommandId::SaveJson, "File: Save", "json write", "⌘S"),
    keyed(CommandId::LoadJson, "File: Load", "open json read", "⌘O"),
    entry(CommandId::QuickSave, "File: Quick save", "path json"),
    entry(CommandId::QuickLoad, "File: Quick load", "path json"),
    entry(CommandId::SlotSave, "Slot: Save", "store"),
    entry(CommandId::SlotLoad, "Slot: Load", "restore"),
    keyed(CommandId::ExportSvg, "File: Export SVG", "vector", "⌘E"),
    entry(CommandId::ExportPng, "File: Export PNG", "image raster"),
    entry(CommandId::ToggleScatter, "Settings: Toggle scatter placement", "random fixed placement"),
    keyed(CommandId::Help, "Help: Show help", "keys shortcuts", "F1"),
];

/// Editor state the palette needs to tell which commands can run.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct CommandContext {
    pub has_undo: bool,
    pub has_redo: bool,
    pub has_line: bool,
    pub player_count: usize,
}

impl CommandContext {
    /// Why `id` cannot run right now.
    fn blocker(self, id: CommandId) -> Option<&'static str> {
        match id {
            CommandId::Undo if !self.has_undo => Some("nothing to undo"),
            CommandId::Redo if !self.has_redo => Some("nothing to redo"),
            CommandId::ToggleCurve | CommandId::RemoveLine if !self.has_line => {
                Some("click an arrow or pick first")
            }
            CommandId::AddPickFromPlayers if self.player_count < 2 => {
                Some("needs two visible players")
            }
            _ => None,
        }
    }
}

/// One filtered palette row.
struct Ranked {
    entry: &'static PaletteEntry,
    score: i64,
    blocker: Option<&'static str>,
}

/// Matches `query` against titles and keywords. Runnable commands come
/// first, then higher scores; table order breaks ties.
fn rank(query: &str, cx: CommandContext) -> Vec<Ranked> {
    let matcher = SkimMatcherV2::default();
    let query = query.trim().to_lowercase();
    let mut rows: Vec<Ranked> = ENTRIES
        .iter()
        .filter_map(|entry| {
            let score = if query.is_empty() {
                0
            } else {
                matcher
                    .fuzzy_match(entry.title, &query)
                    .max(matcher.fuzzy_match(entry.keywords, &query))?
            };
            Some(Ranked {
                entry,
                score,
                blocker: cx.blocker(entry.id),
            })
        })
        .collect();
    rows.sort_by_key(|r| (r.blocker.is_some(), Reverse(r.score)));
    rows
}

/// What the user picked from the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PaletteOutcome {
    Run(CommandId),
    /// A command that cannot run; carries the reason for the status bar.
    Blocked(&'static str),
}

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Moves the highlight within the runnable rows, which lead the list.
    fn step(&mut self, down: bool, runnable: usize) {
        if runnable == 0 {
            self.selected = 0;
        } else if down {
            self.selected = (self.selected + 1).min(runnable - 1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    fn pick(&mut self, row: &Ranked) -> PaletteOutcome {
        match row.blocker {
            Some(reason) => PaletteOutcome::Blocked(reason),
            None => {
                let id = row.entry.id;
                self.close();
                PaletteOutcome::Run(id)
            }
        }
    }

    pub(super) fn execute(app: &mut BoardApp, ctx: &egui::Context, id: CommandId) {
        match id {
            CommandId::AddPlayerA => app.run(Command::AddPlayer(Team::A)),
            CommandId::AddPlayerB => app.run(Command::AddPlayer(Team::B)),
            CommandId::AddBall => app.run(Command::AddBall),
            CommandId::AddSolidArrow => app.run(Command::AddArrow(ArrowStyle::Solid)),
            CommandId::AddDashedArrow => app.run(Command::AddArrow(ArrowStyle::Dashed)),
            CommandId::AddEmphasisArrow => app.run(Command::AddArrow(ArrowStyle::Emphasis)),
            CommandId::AddPick => app.run(Command::AddPick),
            CommandId::AddPickFromPlayers => app.run(Command::AddPickFromPlayers),
            CommandId::AddZone => app.run(Command::AddZone),
            CommandId::ToggleTeamA => app.run(Command::ToggleTeamVisibility(Team::A)),
            CommandId::ToggleTeamB => app.run(Command::ToggleTeamVisibility(Team::B)),
            CommandId::ToggleCurve => app.toggle_curve_of_last_line(),
            CommandId::RemoveLine => app.remove_last_line(),
            CommandId::ClearBoard => app.run(Command::ClearBoard),
            CommandId::Undo => app.run(Command::Undo),
            CommandId::Redo => app.run(Command::Redo),
            CommandId::SaveJson => app.save_json_dialog(),
            CommandId::LoadJson => app.open_json_dialog(),
            CommandId::QuickSave => app.save_to_path(),
            CommandId::QuickLoad => app.load_from_path(),
            CommandId::SlotSave => app.save_slot(),
            CommandId::SlotLoad => app.load_slot(),
            CommandId::ExportSvg => app.save_svg_dialog(),
            CommandId::ExportPng => app.save_png_dialog(),
            CommandId::ToggleScatter => app.toggle_scatter(),
            CommandId::Help => app.show_help = true,
        }
        ctx.request_repaint();
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<PaletteOutcome> {
        if !self.open {
            return None;
        }
        let rows = rank(&self.query, cx);
        let runnable = rows.iter().take_while(|r| r.blocker.is_none()).count();
        self.selected = self.selected.min(runnable.saturating_sub(1));

        let (escape, down, up, enter) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::Enter),
            )
        });
        if escape {
            self.close();
            return None;
        }
        if down || up {
            self.step(down, runnable);
        }

        let mut clicked = None;
        let width = 420.0;
        let top = ctx.content_rect().center_top() + egui::vec2(-width * 0.5, 40.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(top)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(width);
                    let query = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Type a command"),
                    );
                    if std::mem::take(&mut self.request_focus) {
                        query.request_focus();
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                        for (idx, row) in rows.iter().enumerate() {
                            let title = match row.blocker {
                                Some(_) => egui::RichText::new(row.entry.title).weak(),
                                None => egui::RichText::new(row.entry.title),
                            };
                            let resp = ui
                                .horizontal(|ui| {
                                    let resp = ui.selectable_label(idx == self.selected, title);
                                    if let Some(keys) = row.entry.keys {
                                        ui.weak(keys);
                                    }
                                    resp
                                })
                                .inner;
                            let resp = match row.blocker {
                                Some(reason) => resp.on_hover_text(reason),
                                None => resp,
                            };
                            if idx == self.selected && (down || up) {
                                resp.scroll_to_me(None);
                            }
                            if resp.clicked() {
                                clicked = Some(idx);
                            }
                        }
                    });
                    ui.weak(format!("{} of {} commands", rows.len(), ENTRIES.len()));
                });
            });

        let chosen = clicked.or((enter && !rows.is_empty()).then_some(self.selected))?;
        let row = rows.get(chosen)?;
        Some(self.pick(row))
    }
}

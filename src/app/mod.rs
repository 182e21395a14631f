use std::path::PathBuf;

use crate::editor::{Command, Editor};
use crate::model::{EntityRef, Point};
use crate::settings::{self, Settings};
use crate::storage::DirStore;

mod actions;
mod command_palette;
mod help;
mod render;
mod update;

/// Inline prompt opened by a double-click on a labelled entity.
#[derive(Clone, Debug)]
struct RelabelPrompt {
    target: EntityRef,
    anchor: Point,
    text: String,
    request_focus: bool,
}

pub struct BoardApp {
    editor: Editor,
    settings: Settings,
    settings_path: PathBuf,
    slots: DirStore,
    relabel: Option<RelabelPrompt>,
    command_palette: command_palette::CommandPalette,
    show_help: bool,
}

impl BoardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = settings::config_path().unwrap_or_else(|| PathBuf::from("settings.toml"));
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings(std::path::Path::new("settings.json")))
            .unwrap_or_default();
        tracing::info!(path = %settings_path.display(), "settings resolved");
        Self::with_settings(settings, settings_path)
    }

    fn with_settings(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            editor: Editor::new(&settings),
            slots: DirStore::new(&settings.slot_dir),
            settings,
            settings_path,
            relabel: None,
            command_palette: command_palette::CommandPalette::default(),
            show_help: false,
        }
    }

    pub(super) fn run(&mut self, cmd: Command) {
        self.editor.execute(cmd);
    }

    pub(super) fn toggle_curve_of_last_line(&mut self) {
        match self.editor.last_line() {
            Some(line) => self.run(Command::ToggleCurve(line)),
            None => self.editor.set_status("Click an arrow or pick first"),
        }
    }

    pub(super) fn remove_last_line(&mut self) {
        match self.editor.last_line() {
            Some(line) => self.run(Command::Remove(line)),
            None => self.editor.set_status("Click an arrow or pick first"),
        }
    }

    fn open_relabel(&mut self, p: Point) {
        let Some(target) = self.editor.label_target_at(p) else {
            return;
        };
        let doc = self.editor.document();
        let current = match target {
            EntityRef::Player(id) => doc.players.iter().find(|pl| pl.id == id).map(|pl| pl.label.clone()),
            EntityRef::Arrow(id) => doc.arrows.iter().find(|a| a.id == id).map(|a| a.label.clone()),
            _ => None,
        };
        self.relabel = Some(RelabelPrompt {
            target,
            anchor: p,
            text: current.unwrap_or_default(),
            request_focus: true,
        });
    }
}

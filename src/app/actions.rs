use std::path::Path;

use crate::settings::{self, Placement};
use crate::storage::SlotStore;

use super::BoardApp;

fn file_stem(path: &str, fallback: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(fallback)
        .to_string()
}

impl BoardApp {
    pub(super) fn save_to_path(&mut self) {
        let path = self.settings.file_path.clone();
        self.write_json(Path::new(&path));
    }

    pub(super) fn load_from_path(&mut self) {
        let path = self.settings.file_path.clone();
        self.read_json(Path::new(&path));
    }

    fn write_json(&mut self, path: &Path) -> bool {
        let json = match self.editor.save() {
            Ok(json) => json,
            Err(e) => {
                self.editor.set_status(format!("Serialize failed: {e}"));
                return false;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "play saved");
                self.editor.set_status(format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "save failed");
                self.editor.set_status(format!("Save failed: {e}"));
                false
            }
        }
    }

    fn read_json(&mut self, path: &Path) -> bool {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                self.editor.set_status(format!("Read failed: {e}"));
                return false;
            }
        };
        match self.editor.load(&text) {
            Ok(()) => {
                self.relabel = None;
                self.editor.set_status(format!("Loaded {}", path.display()));
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load rejected");
                self.editor.set_status(format!("Load failed: {e}"));
                false
            }
        }
    }

    pub(super) fn save_json_dialog(&mut self) {
        let default_name = format!("{}.json", file_stem(&self.settings.file_path, "play"));
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        {
            if self.write_json(&path) {
                self.settings.file_path = path.display().to_string();
                self.persist_settings();
            }
        }
    }

    pub(super) fn open_json_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            if self.read_json(&path) {
                self.settings.file_path = path.display().to_string();
                self.persist_settings();
            }
        }
    }

    pub(super) fn save_slot(&mut self) {
        let slot = self.settings.slot_name.clone();
        let json = match self.editor.save() {
            Ok(json) => json,
            Err(e) => {
                self.editor.set_status(format!("Serialize failed: {e}"));
                return;
            }
        };
        match self.slots.write(&slot, json.as_bytes()) {
            Ok(()) => self.editor.set_status(format!("Saved slot {slot}")),
            Err(e) => self.editor.set_status(format!("Slot save failed: {e}")),
        }
    }

    pub(super) fn load_slot(&mut self) {
        let slot = self.settings.slot_name.clone();
        let bytes = match self.slots.read(&slot) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.editor.set_status(format!("Slot {slot} is empty"));
                return;
            }
            Err(e) => {
                self.editor.set_status(format!("Slot load failed: {e}"));
                return;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        match self.editor.load(&text) {
            Ok(()) => {
                self.relabel = None;
                self.editor.set_status(format!("Loaded slot {slot}"));
            }
            Err(e) => self.editor.set_status(format!("Slot load failed: {e}")),
        }
    }

    pub(super) fn save_svg_to_path(&mut self) {
        let path = self.settings.svg_path.clone();
        self.write_svg(Path::new(&path));
    }

    fn write_svg(&mut self, path: &Path) -> bool {
        let svg = self.editor.export_svg();
        match std::fs::write(path, svg) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "svg exported");
                self.editor.set_status(format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                self.editor.set_status(format!("SVG save failed: {e}"));
                false
            }
        }
    }

    pub(super) fn save_svg_dialog(&mut self) {
        let default_name = format!("{}.svg", file_stem(&self.settings.file_path, "play"));
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("SVG", &["svg"])
            .save_file()
        {
            if self.write_svg(&path) {
                self.settings.svg_path = path.display().to_string();
                self.persist_settings();
            }
        }
    }

    pub(super) fn save_png_dialog(&mut self) {
        let default_name = format!("{}.png", file_stem(&self.settings.file_path, "play"));
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };
        let bytes = match self.editor.export_png() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.editor.set_status(format!("PNG export failed: {e}"));
                return;
            }
        };
        match std::fs::write(&path, bytes) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "png exported");
                self.editor.set_status(format!("Saved {}", path.display()));
                self.settings.png_path = path.display().to_string();
                self.persist_settings();
            }
            Err(e) => self.editor.set_status(format!("PNG save failed: {e}")),
        }
    }

    pub(super) fn toggle_scatter(&mut self) {
        self.settings.placement = match self.settings.placement {
            Placement::Fixed => Placement::Scatter,
            Placement::Scatter => Placement::Fixed,
        };
        self.editor.set_placement(self.settings.placement);
        self.editor
            .set_status(format!("Placement: {:?}", self.settings.placement));
        self.persist_settings();
    }

    pub(super) fn persist_settings(&mut self) {
        if let Err(e) = settings::save_settings(&self.settings_path, &self.settings) {
            tracing::warn!(error = %e, "settings save failed");
            self.editor.set_status(format!("Settings save failed: {e}"));
        }
    }
}

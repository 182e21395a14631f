use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings toml error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where newly added entities land.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Fixed,
    Scatter,
}

/// Sizes that drive both drawing and grabbing, in canvas units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Metrics {
    pub player_radius: f32,
    pub ball_radius: f32,
    pub handle_radius: f32,
    pub zone_edge_tolerance: f32,
    pub min_zone_radius: f32,
    pub pick_marker_radius: f32,
    pub arrowhead_size: f32,
    pub scatter_margin: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            player_radius: 15.0,
            ball_radius: 8.0,
            handle_radius: 8.0,
            zone_edge_tolerance: 6.0,
            min_zone_radius: 20.0,
            pick_marker_radius: 10.0,
            arrowhead_size: 12.0,
            scatter_margin: 40.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub file_path: String,
    pub svg_path: String,
    pub png_path: String,
    pub slot_dir: String,
    pub slot_name: String,
    pub history_limit: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub placement: Placement,
    pub metrics: Metrics,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_path: "play.json".to_string(),
            svg_path: "play.svg".to_string(),
            png_path: "play.png".to_string(),
            slot_dir: "plays".to_string(),
            slot_name: "play".to_string(),
            history_limit: 200,
            canvas_width: 1000.0,
            canvas_height: 600.0,
            placement: Placement::Fixed,
            metrics: Metrics::default(),
        }
    }
}

/// `~/.config/playboard.toml` if it exists, else `settings.toml` in the
/// working directory if it exists.
pub fn config_path() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("playboard.toml");
        if path.exists() {
            return Some(path);
        }
    }
    let local = PathBuf::from("settings.toml");
    local.exists().then_some(local)
}

pub fn parse_settings(text: &str, toml_first: bool) -> Option<Settings> {
    if toml_first {
        toml::from_str::<Settings>(text)
            .ok()
            .or_else(|| serde_json::from_str::<Settings>(text).ok())
    } else {
        serde_json::from_str::<Settings>(text)
            .ok()
            .or_else(|| toml::from_str::<Settings>(text).ok())
    }
}

pub fn load_settings(path: &Path) -> Option<Settings> {
    let text = std::fs::read_to_string(path).ok()?;
    let toml_first = path.extension().is_some_and(|e| e == "toml");
    let settings = parse_settings(&text, toml_first);
    if settings.is_none() {
        tracing::warn!(path = %path.display(), "ignoring unreadable settings file");
    }
    settings
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let text = if path.extension().is_some_and(|e| e == "toml") {
        toml::to_string_pretty(settings)?
    } else {
        serde_json::to_string_pretty(settings)?
    };
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

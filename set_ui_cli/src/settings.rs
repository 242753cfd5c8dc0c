use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use set_core::DeckMode;
use strum_macros::Display;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "set-game-settings.json";

/// What to do when the board holds no set after a claim.
#[derive(
    Debug, Default, PartialEq, Eq, Copy, Clone, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum NoSetHandling {
    #[strum(serialize = "autoAdd")]
    AutoAdd,
    #[default]
    #[strum(serialize = "hint")]
    Hint,
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Off,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub deck_mode: DeckMode,
    pub handle_no_sets: NoSetHandling,
    /// Keep the set count visible after a claim instead of hiding it again.
    pub sticky_set_count: bool,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

//! Persisted parse/write options.
//!
//! ```toml
//! [parse]
//! keep_extension = false
//! clean_names = true
//!
//! [write]
//! ignore_blanks = false
//! game_name = false
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DatError;
use crate::reader::ParseOptions;
use crate::writer::WriteOptions;

/// Default settings file: `~/.config/romdat/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romdat").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    pub keep_extension: bool,
    pub clean_names: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            keep_extension: false,
            clean_names: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteSettings {
    pub ignore_blanks: bool,
    pub game_name: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatSettings {
    pub parse: ParseSettings,
    pub write: WriteSettings,
}

impl DatSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, DatError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to `path`, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(io::Error::other)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn parse_options(
        &self,
        system_id: usize,
        source_id: usize,
        source_name: impl Into<String>,
    ) -> ParseOptions {
        ParseOptions {
            system_id,
            source_id,
            source_name: source_name.into(),
            keep_extension: self.parse.keep_extension,
            clean_names: self.parse.clean_names,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            ignore_blanks: self.write.ignore_blanks,
            game_name: self.write.game_name,
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

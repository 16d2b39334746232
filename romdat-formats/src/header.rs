use serde::{Deserialize, Serialize};

/// How a catalog expects parent and clone sets to be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergingMode {
    #[default]
    None,
    Split,
    Merged,
}

/// Catalog-level metadata.
///
/// Only the tagged (RomCenter) format stores most of these fields; the other
/// writers consult `name` and `emulator_version`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatHeader {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub plugin: Option<String>,
    /// Emulator column of attract-mode listings.
    pub emulator_version: Option<String>,
    pub merging: MergingMode,
}

impl DatHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Store `value` unless the slot already holds a value or `value` is blank.
pub(crate) fn fill(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

//! The normalized catalog entry every format reads and writes.
//!
//! An entry is one expected file (or disk image, BIOS set, ...) owned by a
//! machine. The machine is carried by value on every entry; grouping entries
//! by machine is the writer's job.

use serde::{Deserialize, Serialize};

use crate::hash::{HashType, Hashes, PLACEHOLDER_HASH};

/// Size of a Rom whose size is not known (hash-list files, placeholders).
pub const SIZE_UNKNOWN: i64 = -1;

/// Size of a legitimately empty file.
pub const SIZE_ZERO: i64 = 0;

/// Dump status of an entry.
///
/// The discriminants are bit values so a status can be tested as a flag set
/// by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemStatus {
    #[default]
    None = 0,
    Good = 1,
    BadDump = 2,
    Nodump = 4,
    Verified = 8,
}

impl ItemStatus {
    pub fn bits(&self) -> u64 {
        *self as u64
    }
}

/// Discriminant of [`EntryKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    Rom,
    Disk,
    BiosSet,
    Release,
    Archive,
    Sample,
}

/// Which input produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Source {
    pub system_id: usize,
    pub source_id: usize,
}

/// The machine (game, driver) owning an entry.
///
/// `clone_of` and `rom_of` name other machines; they are not resolved here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub name: String,
    pub description: Option<String>,
    pub clone_of: Option<String>,
    pub rom_of: Option<String>,
    pub comment: Option<String>,
    pub year: Option<String>,
    pub manufacturer: Option<String>,
    // Front-end listing columns
    pub category: Option<String>,
    pub players: Option<String>,
    pub rotation: Option<String>,
    pub control: Option<String>,
    pub display_status: Option<String>,
    pub display_count: Option<String>,
    pub display_type: Option<String>,
    pub buttons: Option<String>,
}

impl Machine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_clone_of(mut self, parent: impl Into<String>) -> Self {
        self.clone_of = Some(parent.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rom {
    /// Size in bytes; [`SIZE_UNKNOWN`] when the source does not say.
    pub size: i64,
    pub hashes: Hashes,
    pub alt_name: Option<String>,
    pub alt_title: Option<String>,
    /// Name of the parent's file this one merges with.
    pub merge: Option<String>,
}

impl Default for Rom {
    fn default() -> Self {
        Self {
            size: SIZE_UNKNOWN,
            hashes: Hashes::default(),
            alt_name: None,
            alt_title: None,
            merge: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub hashes: Hashes,
    pub merge: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiosSet {
    pub description: Option<String>,
    pub default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub region: Option<String>,
    pub language: Option<String>,
    pub date: Option<String>,
    pub default: bool,
}

/// Type-specific payload of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Rom(Rom),
    Disk(Disk),
    BiosSet(BiosSet),
    Release(Release),
    Archive,
    Sample,
}

impl EntryKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Rom(_) => ItemType::Rom,
            Self::Disk(_) => ItemType::Disk,
            Self::BiosSet(_) => ItemType::BiosSet,
            Self::Release(_) => ItemType::Release,
            Self::Archive => ItemType::Archive,
            Self::Sample => ItemType::Sample,
        }
    }
}

/// A single catalog entry.
///
/// An empty `name` (or `machine.name`) is the "null" value: such entries are
/// dropped by the readers and skipped by the writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub machine: Machine,
    pub status: ItemStatus,
    pub source: Source,
    pub kind: EntryKind,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, machine: Machine, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            machine,
            status: ItemStatus::None,
            source: Source::default(),
            kind,
        }
    }

    pub fn rom(name: impl Into<String>, machine: Machine, rom: Rom) -> Self {
        Self::new(name, machine, EntryKind::Rom(rom))
    }

    pub fn disk(name: impl Into<String>, machine: Machine, disk: Disk) -> Self {
        Self::new(name, machine, EntryKind::Disk(disk))
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn machine_name(&self) -> &str {
        &self.machine.name
    }

    pub fn as_rom(&self) -> Option<&Rom> {
        match &self.kind {
            EntryKind::Rom(rom) => Some(rom),
            _ => None,
        }
    }

    pub fn as_disk(&self) -> Option<&Disk> {
        match &self.kind {
            EntryKind::Disk(disk) => Some(disk),
            _ => None,
        }
    }

    /// Hash set of a Rom or Disk.
    pub fn hashes(&self) -> Option<&Hashes> {
        match &self.kind {
            EntryKind::Rom(rom) => Some(&rom.hashes),
            EntryKind::Disk(disk) => Some(&disk.hashes),
            _ => None,
        }
    }

    /// Size of a Rom, `None` for every other kind.
    pub fn size(&self) -> Option<i64> {
        self.as_rom().map(|rom| rom.size)
    }

    /// Whether this is a synthetic empty-directory entry (unknown size, CRC `"null"`).
    pub fn is_placeholder(&self) -> bool {
        self.as_rom().is_some_and(|rom| {
            rom.size == SIZE_UNKNOWN && rom.hashes.crc.as_deref() == Some(PLACEHOLDER_HASH)
        })
    }

    /// Finalize a placeholder entry into a concrete empty file.
    ///
    /// A `"null"` name becomes `"-"`, the size becomes zero, and every hash
    /// holding `"null"` becomes that algorithm's zero digest while the others
    /// are cleared. Entries that are not placeholders are left untouched, so
    /// applying this twice is the same as applying it once.
    pub fn normalize_placeholder(&mut self) -> bool {
        if !self.is_placeholder() {
            return false;
        }
        if self.name == PLACEHOLDER_HASH {
            self.name = "-".to_string();
        }
        if let EntryKind::Rom(rom) = &mut self.kind {
            rom.size = SIZE_ZERO;
            for kind in HashType::ALL {
                let value = match rom.hashes.get(kind) {
                    Some(PLACEHOLDER_HASH) => Some(kind.zero().to_string()),
                    _ => None,
                };
                rom.hashes.set(kind, value);
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;

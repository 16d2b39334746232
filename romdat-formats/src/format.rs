//! Format selection and the capability interface every codec implements.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use romdat_core::{CatalogEntry, CatalogLogger, HashType};

use crate::attract_mode::AttractMode;
use crate::error::DatError;
use crate::everdrive_smdb::EverdriveSmdb;
use crate::hashfile::Hashfile;
use crate::header::DatHeader;
use crate::listrom::Listrom;
use crate::reader::ParseOptions;
use crate::romcenter::RomCenter;
use crate::writer::WriteOptions;

/// The catalog formats this crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatFormat {
    /// `;`-separated front-end listing with a `#Title;Name;...` header.
    AttractMode,
    /// One checksum per line for a single algorithm (SFV, md5sum, ...).
    Hashfile(HashType),
    /// MAME `-listroms` output.
    Listrom,
    /// Tab-separated Everdrive checksum database.
    EverdriveSmdb,
    /// Sectioned RomCenter file with `¬`-separated game rows.
    RomCenter,
}

impl DatFormat {
    pub const ALL: [DatFormat; 10] = [
        Self::AttractMode,
        Self::Hashfile(HashType::Crc32),
        Self::Hashfile(HashType::Md5),
        Self::Hashfile(HashType::Sha1),
        Self::Hashfile(HashType::Sha256),
        Self::Hashfile(HashType::Sha384),
        Self::Hashfile(HashType::Sha512),
        Self::Listrom,
        Self::EverdriveSmdb,
        Self::RomCenter,
    ];

    /// Build a fresh codec. Codecs carry per-file state, so use one per file.
    pub fn codec(&self) -> Box<dyn DatCodec> {
        match *self {
            Self::AttractMode => Box::new(AttractMode),
            Self::Hashfile(hash) => Box::new(Hashfile::new(hash)),
            Self::Listrom => Box::new(Listrom::default()),
            Self::EverdriveSmdb => Box::new(EverdriveSmdb),
            Self::RomCenter => Box::new(RomCenter::default()),
        }
    }

    /// Short identifier accepted by [`FromStr`].
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::AttractMode => "attractmode",
            Self::Hashfile(HashType::Crc32) => "sfv",
            Self::Hashfile(HashType::Md5) => "md5",
            Self::Hashfile(HashType::Sha1) => "sha1",
            Self::Hashfile(HashType::Sha256) => "sha256",
            Self::Hashfile(HashType::Sha384) => "sha384",
            Self::Hashfile(HashType::Sha512) => "sha512",
            Self::Listrom => "listrom",
            Self::EverdriveSmdb => "smdb",
            Self::RomCenter => "romcenter",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Hashfile(_) => self.short_name(),
            Self::RomCenter => "dat",
            Self::AttractMode | Self::Listrom | Self::EverdriveSmdb => "txt",
        }
    }
}

impl fmt::Display for DatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DatFormat {
    type Err = DatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_lowercase().as_str() {
            "attractmode" | "attract-mode" | "am" => Self::AttractMode,
            "sfv" | "crc" | "crc32" => Self::Hashfile(HashType::Crc32),
            "md5" => Self::Hashfile(HashType::Md5),
            "sha1" => Self::Hashfile(HashType::Sha1),
            "sha256" => Self::Hashfile(HashType::Sha256),
            "sha384" => Self::Hashfile(HashType::Sha384),
            "sha512" => Self::Hashfile(HashType::Sha512),
            "listrom" | "lr" => Self::Listrom,
            "smdb" | "everdrive" | "everdrivesmdb" => Self::EverdriveSmdb,
            "romcenter" | "rc" => Self::RomCenter,
            other => return Err(DatError::unknown_format(other)),
        };
        Ok(format)
    }
}

/// Per-line state handed to a codec while parsing.
pub struct ParseContext<'a> {
    pub options: &'a ParseOptions,
    pub header: &'a mut DatHeader,
    pub logger: &'a dyn CatalogLogger,
    /// 1-based number of the line being parsed.
    pub line_number: usize,
}

impl ParseContext<'_> {
    /// Log a skipped line with its position.
    pub fn warn(&self, message: impl fmt::Display) {
        self.logger.warning(&format!(
            "{}:{}: {message}",
            self.options.source_name, self.line_number
        ));
    }
}

/// What a codec sees while writing.
pub struct WriteContext<'a> {
    pub header: &'a DatHeader,
    pub options: &'a WriteOptions,
    pub logger: &'a dyn CatalogLogger,
}

/// Line classifier and renderer for one catalog format.
///
/// The drivers in [`crate::reader`] and [`crate::writer`] own line order,
/// game boundaries, and entry validation; a codec only maps between one line
/// and one entry.
pub trait DatCodec: Send {
    /// Classify one line: produce an entry, update codec or header state, or skip it.
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry>;

    fn write_header(&self, _out: &mut dyn Write, _cx: &WriteContext<'_>) -> io::Result<()> {
        Ok(())
    }

    /// Called before the first entry of each machine.
    fn write_game_start(
        &self,
        _out: &mut dyn Write,
        _entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        Ok(())
    }

    /// Called after the last entry of each machine.
    fn write_game_end(&self, _out: &mut dyn Write, _cx: &WriteContext<'_>) -> io::Result<()> {
        Ok(())
    }

    fn write_entry(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        cx: &WriteContext<'_>,
    ) -> io::Result<()>;
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;

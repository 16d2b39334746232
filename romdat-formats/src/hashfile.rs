//! Single-algorithm checksum lists (SFV, md5sum, sha1sum, ...).
//!
//! ```text
//! foo.bin deadbeef                              <- SFV (CRC-32)
//! d41d8cd98f00b204e9800998ecf8427e *foo.bin     <- every other algorithm
//! ```
//!
//! Every entry belongs to one machine named after the list file itself.

use std::io::{self, Write};
use std::path::Path;

use romdat_core::{
    CatalogEntry, EntryKind, HashType, Hashes, Machine, Rom, SIZE_UNKNOWN, clean_hash,
};

use crate::format::{DatCodec, ParseContext, WriteContext};

pub struct Hashfile {
    hash: HashType,
}

impl Hashfile {
    pub fn new(hash: HashType) -> Self {
        Self { hash }
    }
}

/// Machine name derived from the list's file name.
fn machine_name(source_name: &str, keep_extension: bool) -> String {
    let path = Path::new(source_name);
    let name = if keep_extension {
        path.file_name()
    } else {
        path.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split a line into `(name, hash)`.
///
/// SFV lines are `name hash` with the hash after the last whitespace run;
/// everything else is `hash name` or `hash *name`. A `*` binary marker or a
/// hash-shaped first token also flags an SFV line as hash-first.
fn split_line(line: &str, hash: HashType) -> Option<(&str, &str)> {
    let (first, rest) = line.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    if let Some(name) = rest.strip_prefix('*') {
        return Some((name, first));
    }
    if hash != HashType::Crc32 {
        return Some((rest, first));
    }

    let (name, last) = line.rsplit_once(char::is_whitespace)?;
    if clean_hash(last, hash).is_empty() && !clean_hash(first, hash).is_empty() {
        return Some((rest, first));
    }
    Some((name.trim_end(), last))
}

impl DatCodec for Hashfile {
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return None;
        }

        let Some((name, raw_hash)) = split_line(line, self.hash) else {
            cx.warn(format_args!("Unrecognized {} line: {line}", self.hash.name()));
            return None;
        };

        let hash = clean_hash(raw_hash, self.hash);
        if hash.is_empty() {
            cx.warn(format_args!("Invalid {} value '{raw_hash}'", self.hash.name()));
            return None;
        }

        let machine = machine_name(&cx.options.source_name, cx.options.keep_extension);
        let rom = Rom {
            size: SIZE_UNKNOWN,
            hashes: Hashes::new().with(self.hash, hash),
            ..Rom::default()
        };
        Some(CatalogEntry::rom(name, Machine::new(machine), rom))
    }

    fn write_entry(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        let hashes = match &entry.kind {
            EntryKind::Rom(rom) => &rom.hashes,
            EntryKind::Disk(disk) if self.hash != HashType::Crc32 => &disk.hashes,
            _ => return Ok(()),
        };
        let Some(hash) = hashes.get(self.hash).filter(|h| !h.is_empty()) else {
            cx.logger.verbose(&format!(
                "Skipping '{}' in '{}': no {} hash",
                entry.name,
                entry.machine.name,
                self.hash.name()
            ));
            return Ok(());
        };

        let name = if cx.options.game_name {
            format!("{}/{}", entry.machine.name, entry.name)
        } else {
            entry.name.clone()
        };

        match self.hash {
            HashType::Crc32 => writeln!(out, "{name} {hash}"),
            _ => writeln!(out, "{hash} *{name}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/hashfile_tests.rs"]
mod tests;

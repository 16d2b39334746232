//! Everdrive SMDB: tab-separated checksum database.
//!
//! Columns: SHA-256, `machine/name`, SHA-1, MD5, CRC-32. The file carries
//! no sizes, so every entry has an unknown size.

use std::io::{self, Write};

use romdat_core::{
    CatalogEntry, EntryKind, HashType, Hashes, Machine, Rom, SIZE_UNKNOWN, clean_hash_opt,
};

use crate::format::{DatCodec, ParseContext, WriteContext};

const COLUMNS: usize = 5;

pub struct EverdriveSmdb;

impl DatCodec for EverdriveSmdb {
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < COLUMNS {
            cx.warn(format_args!(
                "Expected {COLUMNS} tab-separated columns, found {}",
                columns.len()
            ));
            return None;
        }

        let Some((machine, name)) = columns[1].split_once('/') else {
            cx.warn(format_args!("No machine folder in '{}'", columns[1]));
            return None;
        };

        let hashes = Hashes {
            sha256: clean_hash_opt(columns[0], HashType::Sha256),
            sha1: clean_hash_opt(columns[2], HashType::Sha1),
            md5: clean_hash_opt(columns[3], HashType::Md5),
            crc: clean_hash_opt(columns[4], HashType::Crc32),
            ..Hashes::default()
        };
        let rom = Rom {
            size: SIZE_UNKNOWN,
            hashes,
            ..Rom::default()
        };
        Some(CatalogEntry::rom(
            name,
            Machine::new(machine).with_description(machine),
            rom,
        ))
    }

    fn write_entry(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        let EntryKind::Rom(rom) = &entry.kind else {
            return Ok(());
        };
        let hash = |kind| rom.hashes.get(kind).unwrap_or_default();
        writeln!(
            out,
            "{}\t{}/{}\t{}\t{}\t{}",
            hash(HashType::Sha256),
            entry.machine.name,
            entry.name,
            hash(HashType::Sha1),
            hash(HashType::Md5),
            hash(HashType::Crc32),
        )
    }
}

#[cfg(test)]
#[path = "tests/everdrive_smdb_tests.rs"]
mod tests;

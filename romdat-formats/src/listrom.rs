//! MAME `-listroms` output.
//!
//! ```text
//! ROMs required for driver "005".
//! Name                                   Size Checksum
//! 1346b.cpu-u25                          2048 CRC(8e68533e) SHA1(a257c556d31691068ed5c991f1fb2b51da4826db)
//! 6331.sound-u8                            32 BAD CRC(1d298cb0) SHA1(bb0bb62365402543e3154b9a77be9c75010e6abc) BAD_DUMP
//! 16v8h-blue.u24                          279 NO GOOD DUMP KNOWN
//! ```
//!
//! The name column is found by splitting on the first run of four spaces
//! (three as a fallback), so names containing such runs are misread.

use std::io::{self, Write};

use romdat_core::{
    CatalogEntry, Disk, EntryKind, HashType, Hashes, ItemStatus, Machine, Rom, clean_hash_opt,
};

use crate::format::{DatCodec, ParseContext, WriteContext};

/// Column header printed under every machine line.
pub const HEADER: &str = "Name                                   Size Checksum";

/// Width the name and size columns are padded to.
const NAME_WIDTH: usize = 43;

/// Separator used when a name fills the whole column.
const NAME_GAP: &str = "          ";

const BAD_DUMP: &str = "BAD_DUMP";
const NO_GOOD_DUMP: &str = "NO GOOD DUMP KNOWN";

#[derive(Debug, Default)]
pub struct Listrom {
    /// Machine named by the last `ROMs required for` line.
    machine: Option<String>,
}

/// Extract the machine name from the tail of a `ROMs required for ...` line.
fn machine_from_tail(tail: &str) -> String {
    if let (Some(open), Some(close)) = (tail.find('"'), tail.rfind('"')) {
        if close > open {
            return tail[open + 1..close].to_string();
        }
    }
    let tail = tail.trim();
    let tail = tail.strip_prefix("driver").unwrap_or(tail);
    tail.trim().trim_end_matches('.').trim().to_string()
}

/// Split off the name column at the first run of 4 (or 3) spaces.
fn split_name_column(line: &str) -> Option<(&str, &str)> {
    let at = line.find("    ").or_else(|| line.find("   "))?;
    Some((line[..at].trim_end(), &line[at..]))
}

/// Hash inside a `CRC(...)` / `SHA1(...)` token.
fn token_hash(token: &str, kind: HashType) -> Option<String> {
    let inner = match (token.find('('), token.strip_suffix(')')) {
        (Some(open), Some(body)) if open < body.len() => &body[open + 1..],
        _ => token,
    };
    clean_hash_opt(inner, kind)
}

fn parse_size(token: &str) -> i64 {
    token.parse().unwrap_or(0)
}

fn classify(name: &str, rest: &str, machine: &str) -> Option<CatalogEntry> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let rest = rest.trim_end();
    let bad_dump = tokens.last() == Some(&BAD_DUMP);
    let no_dump = rest.ends_with(NO_GOOD_DUMP);
    let machine = Machine::new(machine);

    let entry = match tokens.len() {
        // SHA1(...)
        1 => CatalogEntry::disk(name, machine, disk(tokens[0])),
        // BAD SHA1(...) BAD_DUMP
        3 if bad_dump => {
            CatalogEntry::disk(name, machine, disk(tokens[1])).with_status(ItemStatus::BadDump)
        }
        // size CRC(...) SHA1(...)
        3 => CatalogEntry::rom(name, machine, rom(tokens[0], tokens[1], tokens[2])),
        // NO GOOD DUMP KNOWN
        4 if no_dump => {
            CatalogEntry::disk(name, machine, Disk::default()).with_status(ItemStatus::Nodump)
        }
        // size BAD CRC(...) SHA1(...) BAD_DUMP
        5 if bad_dump => CatalogEntry::rom(name, machine, rom(tokens[0], tokens[2], tokens[3]))
            .with_status(ItemStatus::BadDump),
        // size NO GOOD DUMP KNOWN
        5 if no_dump => {
            CatalogEntry::rom(name, machine, Rom::default()).with_status(ItemStatus::Nodump)
        }
        _ => return None,
    };
    Some(entry)
}

fn disk(sha1: &str) -> Disk {
    Disk {
        hashes: Hashes {
            sha1: token_hash(sha1, HashType::Sha1),
            ..Hashes::default()
        },
        merge: None,
    }
}

fn rom(size: &str, crc: &str, sha1: &str) -> Rom {
    Rom {
        size: parse_size(size),
        hashes: Hashes {
            crc: token_hash(crc, HashType::Crc32),
            sha1: token_hash(sha1, HashType::Sha1),
            ..Hashes::default()
        },
        ..Rom::default()
    }
}

/// Right-pad `name` to `width`, or follow it with a fixed gap when it does not fit.
fn pad_name(name: &str, width: usize) -> String {
    if name.chars().count() < width {
        format!("{name:<width$}")
    } else {
        format!("{name}{NAME_GAP}")
    }
}

impl DatCodec for Listrom {
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with("Name") && line.ends_with("Checksum") {
            return None;
        }
        if line.starts_with("No ROMs required for") {
            return None;
        }
        if let Some(tail) = line.strip_prefix("ROMs required for") {
            self.machine = Some(machine_from_tail(tail));
            return None;
        }

        let Some(machine) = self.machine.as_deref() else {
            cx.warn(format_args!("Entry before any machine line: {line}"));
            return None;
        };
        let Some((name, rest)) = split_name_column(line) else {
            cx.warn(format_args!("Possibly unrecognized line: {line}"));
            return None;
        };

        let entry = classify(name, rest, machine);
        if entry.is_none() {
            cx.warn(format_args!("Possibly unrecognized line: {line}"));
        }
        entry
    }

    fn write_game_start(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        writeln!(out, "ROMs required for driver \"{}\".", entry.machine.name)?;
        writeln!(out, "{HEADER}")
    }

    fn write_game_end(&self, out: &mut dyn Write, _cx: &WriteContext<'_>) -> io::Result<()> {
        writeln!(out)
    }

    fn write_entry(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        let bad_dump = entry.status == ItemStatus::BadDump;
        let no_dump = entry.status == ItemStatus::Nodump;

        let mut row = match &entry.kind {
            EntryKind::Rom(rom) => {
                // A known size is kept on nodumps so the row reads back as a rom.
                let size = if rom.size >= 0 {
                    rom.size.to_string()
                } else {
                    String::new()
                };
                let mut row = pad_name(&entry.name, NAME_WIDTH - size.len());
                row.push_str(&size);
                if bad_dump {
                    row.push_str(" BAD");
                }
                if no_dump {
                    row.push(' ');
                    row.push_str(NO_GOOD_DUMP);
                } else {
                    if let Some(crc) = rom.hashes.get(HashType::Crc32) {
                        row.push_str(&format!(" CRC({crc})"));
                    }
                    if let Some(sha1) = rom.hashes.get(HashType::Sha1) {
                        row.push_str(&format!(" SHA1({sha1})"));
                    }
                }
                row
            }
            EntryKind::Disk(disk) => {
                let mut row = pad_name(&entry.name, NAME_WIDTH);
                if bad_dump {
                    row.push_str(" BAD");
                }
                if no_dump {
                    row.push(' ');
                    row.push_str(NO_GOOD_DUMP);
                } else if let Some(sha1) = disk.hashes.get(HashType::Sha1) {
                    row.push_str(&format!(" SHA1({sha1})"));
                }
                row
            }
            _ => return Ok(()),
        };

        if bad_dump {
            row.push(' ');
            row.push_str(BAD_DUMP);
        }
        writeln!(out, "{row}")
    }
}

#[cfg(test)]
#[path = "tests/listrom_tests.rs"]
mod tests;

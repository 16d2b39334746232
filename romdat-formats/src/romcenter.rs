//! RomCenter 2.x DAT files.
//!
//! ```text
//! [CREDITS]
//! author=...
//! [DAT]
//! version=2.50
//! split=0
//! merge=0
//! [EMULATOR]
//! refname=...
//! version=...
//! [GAMES]
//! ¬parent¬parent description¬game¬game description¬rom¬crc¬size¬romof¬merge¬
//! ```
//!
//! Free-text row fields are HTML-entity encoded.

use std::borrow::Cow;
use std::io::{self, Write};

use quick_xml::escape::{escape, unescape};
use romdat_core::{
    CatalogEntry, EntryKind, HashType, Hashes, Machine, Rom, SIZE_UNKNOWN, clean_hash_opt,
};

use crate::format::{DatCodec, ParseContext, WriteContext};
use crate::header::{DatHeader, MergingMode, fill};

const SEPARATOR: char = '¬';

/// Fields in a game row, counting the empty ones before the first and after the last `¬`.
const ROW_FIELDS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Credits,
    Dat,
    Emulator,
    Games,
    Other,
}

#[derive(Debug, Default)]
pub struct RomCenter {
    section: Option<Section>,
}

fn decode(value: &str) -> String {
    unescape(value)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| value.to_string())
}

fn opt(value: &str) -> Option<String> {
    let value = decode(value.trim());
    if value.is_empty() { None } else { Some(value) }
}

fn parse_size(value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        return SIZE_UNKNOWN;
    }
    value.parse().unwrap_or(0)
}

fn flag(value: &str) -> bool {
    value.trim() == "1"
}

impl RomCenter {
    fn parse_key_value(&self, line: &str, header: &mut DatHeader) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let key = key.trim().to_lowercase();
        match (self.section, key.as_str()) {
            (Some(Section::Credits), "author") => fill(&mut header.author, value),
            (Some(Section::Credits), "version") => fill(&mut header.version, value),
            (Some(Section::Credits), "email") => fill(&mut header.email, value),
            (Some(Section::Credits), "homepage") => fill(&mut header.homepage, value),
            (Some(Section::Credits), "url") => fill(&mut header.url, value),
            (Some(Section::Credits), "date") => fill(&mut header.date, value),
            (Some(Section::Credits), "comment") => fill(&mut header.comment, value),
            (Some(Section::Dat), "plugin") => fill(&mut header.plugin, value),
            (Some(Section::Dat), "split") => {
                if flag(value) && header.merging == MergingMode::None {
                    header.merging = MergingMode::Split;
                }
            }
            (Some(Section::Dat), "merge") => {
                if flag(value) && header.merging == MergingMode::None {
                    header.merging = MergingMode::Merged;
                }
            }
            (Some(Section::Emulator), "refname") => fill(&mut header.name, value),
            (Some(Section::Emulator), "version") => fill(&mut header.description, value),
            _ => {}
        }
    }

    fn parse_row(&self, line: &str, cx: &ParseContext<'_>) -> Option<CatalogEntry> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() < ROW_FIELDS - 1 {
            cx.warn(format_args!(
                "Expected {} fields in game row, found {}",
                ROW_FIELDS - 2,
                fields.len().saturating_sub(2)
            ));
            return None;
        }

        let name = decode(fields[3].trim());
        let clone_of = opt(fields[1]).filter(|parent| *parent != name);
        let machine = Machine {
            description: opt(fields[4]),
            clone_of,
            rom_of: opt(fields[8]),
            ..Machine::new(name)
        };
        let rom = Rom {
            size: parse_size(fields[7]),
            hashes: Hashes {
                crc: clean_hash_opt(fields[6], HashType::Crc32),
                ..Hashes::default()
            },
            merge: opt(fields[9]),
            ..Rom::default()
        };
        Some(CatalogEntry::rom(decode(fields[5].trim()), machine, rom))
    }
}

impl DatCodec for RomCenter {
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.starts_with('[') && line.ends_with(']') {
            self.section = Some(match line[1..line.len() - 1].trim().to_lowercase().as_str() {
                "credits" => Section::Credits,
                "dat" => Section::Dat,
                "emulator" => Section::Emulator,
                "games" => Section::Games,
                _ => Section::Other,
            });
            return None;
        }

        match self.section {
            Some(Section::Games) if line.starts_with(SEPARATOR) => self.parse_row(line, cx),
            Some(Section::Games) => {
                cx.warn(format_args!("Unrecognized game row: {line}"));
                None
            }
            Some(Section::Credits | Section::Dat | Section::Emulator) => {
                self.parse_key_value(line, cx.header);
                None
            }
            Some(Section::Other) | None => None,
        }
    }

    fn write_header(&self, out: &mut dyn Write, cx: &WriteContext<'_>) -> io::Result<()> {
        let header = cx.header;
        let value = |v: &Option<String>| v.clone().unwrap_or_default();

        writeln!(out, "[CREDITS]")?;
        writeln!(out, "author={}", value(&header.author))?;
        writeln!(out, "version={}", value(&header.version))?;
        for (key, field) in [
            ("email", &header.email),
            ("homepage", &header.homepage),
            ("url", &header.url),
            ("date", &header.date),
        ] {
            if let Some(field) = field {
                writeln!(out, "{key}={field}")?;
            }
        }
        writeln!(out, "comment={}", value(&header.comment))?;

        writeln!(out, "[DAT]")?;
        writeln!(out, "version=2.50")?;
        if let Some(plugin) = &header.plugin {
            writeln!(out, "plugin={plugin}")?;
        }
        let split = header.merging == MergingMode::Split;
        let merge = header.merging == MergingMode::Merged;
        writeln!(out, "split={}", u8::from(split))?;
        writeln!(out, "merge={}", u8::from(merge))?;

        writeln!(out, "[EMULATOR]")?;
        writeln!(out, "refname={}", value(&header.name))?;
        writeln!(out, "version={}", value(&header.description))?;

        writeln!(out, "[GAMES]")
    }

    fn write_entry(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        let (crc, size, merge) = match &entry.kind {
            EntryKind::Rom(rom) => (
                rom.hashes.get(HashType::Crc32).unwrap_or_default(),
                if rom.size >= 0 {
                    rom.size.to_string()
                } else {
                    String::new()
                },
                rom.merge.as_deref(),
            ),
            EntryKind::Disk(disk) => ("", String::new(), disk.merge.as_deref()),
            _ => return Ok(()),
        };

        let machine = &entry.machine;
        let description = machine.description.as_deref().unwrap_or(&machine.name);
        let (parent, parent_description) = match machine.clone_of.as_deref() {
            Some(parent) if !parent.is_empty() => (parent, parent),
            _ => (machine.name.as_str(), description),
        };

        writeln!(
            out,
            "¬{}¬{}¬{}¬{}¬{}¬{}¬{}¬{}¬{}¬",
            escape(parent),
            escape(parent_description),
            escape(machine.name.as_str()),
            escape(description),
            escape(entry.name.as_str()),
            crc,
            size,
            escape(machine.rom_of.as_deref().unwrap_or_default()),
            escape(merge.unwrap_or_default()),
        )
    }
}

#[cfg(test)]
#[path = "tests/romcenter_tests.rs"]
mod tests;

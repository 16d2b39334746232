//! Attract-Mode front-end romlists: one `;`-separated record per machine.
//!
//! Records describe machines, not files, so each one becomes a single
//! placeholder Rom named `-` with the empty-file hashes.

use std::io::{self, Write};

use romdat_core::{CatalogEntry, EntryKind, Hashes, Machine, Rom, SIZE_ZERO};

use crate::format::{DatCodec, ParseContext, WriteContext};
use crate::header::fill;

/// Header line written at the top of every listing.
pub const HEADER: &str = "#Title;Name;Emulator;CloneOf;Year;Manufacturer;Category;Players;Rotation;Control;Status;DisplayCount;DisplayType;AltRomname;AltTitle;Extra;Buttons";

const COLUMNS: usize = 17;

pub struct AttractMode;

fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl DatCodec for AttractMode {
    fn parse_line(&mut self, line: &str, cx: &mut ParseContext<'_>) -> Option<CatalogEntry> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }

        let columns: Vec<&str> = line.split(';').collect();
        if columns.len() < COLUMNS {
            cx.warn(format_args!(
                "Expected {COLUMNS} columns, found {}",
                columns.len()
            ));
            return None;
        }

        fill(&mut cx.header.emulator_version, columns[2]);

        let machine = Machine {
            name: columns[0].to_string(),
            description: opt(columns[1]),
            clone_of: opt(columns[3]),
            year: opt(columns[4]),
            manufacturer: opt(columns[5]),
            category: opt(columns[6]),
            players: opt(columns[7]),
            rotation: opt(columns[8]),
            control: opt(columns[9]),
            display_status: opt(columns[10]),
            display_count: opt(columns[11]),
            display_type: opt(columns[12]),
            comment: opt(columns[15]),
            buttons: opt(columns[16]),
            ..Machine::default()
        };

        let mut hashes = Hashes::new();
        hashes.set_zero();
        let rom = Rom {
            size: SIZE_ZERO,
            hashes,
            alt_name: opt(columns[13]),
            alt_title: opt(columns[14]),
            merge: None,
        };
        Some(CatalogEntry::rom("-", machine, rom))
    }

    fn write_header(&self, out: &mut dyn Write, _cx: &WriteContext<'_>) -> io::Result<()> {
        writeln!(out, "{HEADER}")
    }

    /// The whole record is written once per machine, from its first entry.
    fn write_game_start(
        &self,
        out: &mut dyn Write,
        entry: &CatalogEntry,
        cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        let machine = &entry.machine;
        let (alt_name, alt_title) = match &entry.kind {
            EntryKind::Rom(rom) => (rom.alt_name.as_deref(), rom.alt_title.as_deref()),
            _ => (None, None),
        };
        let emulator = cx
            .header
            .emulator_version
            .as_deref()
            .or(cx.header.name.as_deref());

        let fields: [Option<&str>; COLUMNS] = [
            Some(machine.name.as_str()),
            machine.description.as_deref(),
            emulator,
            machine.clone_of.as_deref(),
            machine.year.as_deref(),
            machine.manufacturer.as_deref(),
            machine.category.as_deref(),
            machine.players.as_deref(),
            machine.rotation.as_deref(),
            machine.control.as_deref(),
            machine.display_status.as_deref(),
            machine.display_count.as_deref(),
            machine.display_type.as_deref(),
            alt_name,
            alt_title,
            machine.comment.as_deref(),
            machine.buttons.as_deref(),
        ];
        let record = fields.map(Option::unwrap_or_default).join(";");
        writeln!(out, "{record}")
    }

    fn write_entry(
        &self,
        _out: &mut dyn Write,
        _entry: &CatalogEntry,
        _cx: &WriteContext<'_>,
    ) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/attract_mode_tests.rs"]
mod tests;

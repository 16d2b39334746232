use std::sync::Arc;

use romdat_core::{HashType, LogLevel, MemoryLogger};

use super::*;
use crate::format::DatFormat;
use crate::header::DatHeader;
use crate::reader::{DatFile, ParseOptions, parse_lines};
use crate::writer::{WriteOptions, write_dat};

const PACMAN: &str = "puckman;Puck Man (Japan);mame;pacman;1980;Namco;Maze;1;90;joy4way;good;1;raster;pm;Puck Man;Original;0";

fn parse(lines: &[&str]) -> (DatFile, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let dat = parse_lines(
        DatFormat::AttractMode,
        lines.iter().copied(),
        ParseOptions::new("mame.txt"),
        logger.clone(),
    );
    (dat, logger)
}

fn write(header: &DatHeader, entries: &[CatalogEntry]) -> String {
    let mut out = Vec::new();
    write_dat(
        DatFormat::AttractMode,
        header,
        entries,
        WriteOptions::default(),
        Arc::new(MemoryLogger::new()),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_record() {
    let (dat, logger) = parse(&[HEADER, PACMAN]);
    assert!(logger.records().is_empty());
    assert_eq!(dat.header.emulator_version.as_deref(), Some("mame"));
    assert_eq!(dat.entries.len(), 1);

    let entry = &dat.entries[0];
    assert_eq!(entry.name, "-");
    let machine = &entry.machine;
    assert_eq!(machine.name, "puckman");
    assert_eq!(machine.description.as_deref(), Some("Puck Man (Japan)"));
    assert_eq!(machine.clone_of.as_deref(), Some("pacman"));
    assert_eq!(machine.year.as_deref(), Some("1980"));
    assert_eq!(machine.manufacturer.as_deref(), Some("Namco"));
    assert_eq!(machine.category.as_deref(), Some("Maze"));
    assert_eq!(machine.rotation.as_deref(), Some("90"));
    assert_eq!(machine.display_type.as_deref(), Some("raster"));
    assert_eq!(machine.comment.as_deref(), Some("Original"));
    assert_eq!(machine.buttons.as_deref(), Some("0"));

    let rom = entry.as_rom().unwrap();
    assert_eq!(rom.size, SIZE_ZERO);
    assert_eq!(rom.hashes.get(HashType::Crc32), Some(HashType::Crc32.zero()));
    assert_eq!(rom.hashes.get(HashType::Md5), Some(HashType::Md5.zero()));
    assert_eq!(rom.hashes.get(HashType::Sha1), Some(HashType::Sha1.zero()));
    assert_eq!(rom.alt_name.as_deref(), Some("pm"));
    assert_eq!(rom.alt_title.as_deref(), Some("Puck Man"));
}

#[test]
fn test_empty_columns_are_absent() {
    let (dat, _) = parse(&["dkong;Donkey Kong;;;;;;;;;;;;;;;"]);
    let machine = &dat.entries[0].machine;
    assert_eq!(machine.description.as_deref(), Some("Donkey Kong"));
    assert_eq!(machine.clone_of, None);
    assert_eq!(machine.buttons, None);
    assert_eq!(dat.header.emulator_version, None);
}

#[test]
fn test_short_record_is_warned() {
    let (dat, logger) = parse(&["dkong;Donkey Kong;mame"]);
    assert!(dat.entries.is_empty());
    let warnings = logger.messages(LogLevel::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("mame.txt:1:"));
}

#[test]
fn test_write_one_record_per_machine() {
    let (dat, _) = parse(&[PACMAN]);
    let mut entries = dat.entries.clone();
    entries.push(CatalogEntry::rom(
        "second",
        entries[0].machine.clone(),
        Rom::default(),
    ));

    let text = write(&dat.header, &entries);
    assert_eq!(text, format!("{HEADER}\n{PACMAN}\n"));
}

#[test]
fn test_write_falls_back_to_header_name() {
    let header = DatHeader::new().with_name("fbneo");
    let entry = CatalogEntry::rom("-", Machine::new("sf2"), Rom::default());
    let text = write(&header, &[entry]);
    assert_eq!(text, format!("{HEADER}\nsf2;;fbneo;;;;;;;;;;;;;;\n"));
}

#[test]
fn test_write_then_parse_matches() {
    let (first, _) = parse(&[HEADER, PACMAN]);
    let text = write(&first.header, &first.entries);
    let (second, _) = parse(&text.lines().collect::<Vec<_>>());
    assert_eq!(second, first);
}

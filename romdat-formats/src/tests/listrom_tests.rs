use std::sync::Arc;

use romdat_core::{ItemType, LogLevel, MemoryLogger, SIZE_UNKNOWN};

use super::*;
use crate::format::DatFormat;
use crate::header::DatHeader;
use crate::reader::{ParseOptions, parse_lines};
use crate::writer::{WriteOptions, write_dat};

const SHA1_U25: &str = "a257c556d31691068ed5c991f1fb2b51da4826db";
const SHA1_U8: &str = "bb0bb62365402543e3154b9a77be9c75010e6abc";
const SHA1_HDD: &str = "0123456789abcdef0123456789abcdef01234567";

fn parse(lines: &[&str]) -> (Vec<CatalogEntry>, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let dat = parse_lines(
        DatFormat::Listrom,
        lines.iter().copied(),
        ParseOptions::new("listroms.txt"),
        logger.clone(),
    );
    (dat.entries, logger)
}

fn write(entries: &[CatalogEntry]) -> String {
    let mut out = Vec::new();
    write_dat(
        DatFormat::Listrom,
        &DatHeader::default(),
        entries,
        WriteOptions::default(),
        Arc::new(MemoryLogger::new()),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

fn u25() -> CatalogEntry {
    CatalogEntry::rom(
        "1346b.cpu-u25",
        Machine::new("005"),
        Rom {
            size: 2048,
            hashes: Hashes::new()
                .with(HashType::Crc32, "8e68533e")
                .with(HashType::Sha1, SHA1_U25),
            ..Rom::default()
        },
    )
}

#[test]
fn test_parse_rom_line() {
    let line =
        format!("1346b.cpu-u25                          2048 CRC(8e68533e) SHA1({SHA1_U25})");
    let (entries, logger) = parse(&[
        "ROMs required for driver \"005\".",
        HEADER,
        line.as_str(),
    ]);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], u25());
    assert!(logger.records().is_empty());
}

#[test]
fn test_parse_no_good_dump_rom() {
    let (entries, _) = parse(&[
        "ROMs required for driver \"005\".",
        "16v8h-blue.u24                          279 NO GOOD DUMP KNOWN",
    ]);
    let entry = &entries[0];
    assert_eq!(entry.name, "16v8h-blue.u24");
    assert_eq!(entry.status, ItemStatus::Nodump);
    let rom = entry.as_rom().unwrap();
    assert_eq!(rom.size, SIZE_UNKNOWN);
    assert!(!rom.hashes.has_any());
}

#[test]
fn test_parse_bad_dump_rom() {
    let line = format!(
        "6331.sound-u8                            32 BAD CRC(1d298cb0) SHA1({SHA1_U8}) BAD_DUMP"
    );
    let (entries, _) = parse(&["ROMs required for driver \"005\".", line.as_str()]);

    let entry = &entries[0];
    assert_eq!(entry.name, "6331.sound-u8");
    assert_eq!(entry.status, ItemStatus::BadDump);
    let rom = entry.as_rom().unwrap();
    assert_eq!(rom.size, 32);
    assert_eq!(rom.hashes.get(HashType::Crc32), Some("1d298cb0"));
    assert_eq!(rom.hashes.get(HashType::Sha1), Some(SHA1_U8));
}

#[test]
fn test_parse_disk_lines() {
    let good = format!("cdrom                                       SHA1({SHA1_HDD})");
    let bad = format!("cdrom2                                      BAD SHA1({SHA1_HDD}) BAD_DUMP");
    let missing = "cdrom3                                      NO GOOD DUMP KNOWN";
    let (entries, _) = parse(&[
        "ROMs required for driver \"cd\".",
        good.as_str(),
        bad.as_str(),
        missing,
    ]);

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.item_type() == ItemType::Disk));
    assert_eq!(
        entries[0].hashes().unwrap().get(HashType::Sha1),
        Some(SHA1_HDD)
    );
    assert_eq!(entries[0].status, ItemStatus::None);
    assert_eq!(entries[1].status, ItemStatus::BadDump);
    assert_eq!(entries[2].status, ItemStatus::Nodump);
}

#[test]
fn test_machine_line_variants() {
    assert_eq!(machine_from_tail(" driver \"005\"."), "005");
    assert_eq!(machine_from_tail(" \"pacman\"."), "pacman");
    assert_eq!(machine_from_tail(" 005."), "005");
}

#[test]
fn test_no_roms_line_and_orphans() {
    let (entries, logger) = parse(&[
        "No ROMs required for driver \"empty\".",
        "orphan.bin                               16 CRC(00000001) SHA1(0000000000000000000000000000000000000001)",
    ]);
    assert!(entries.is_empty());
    let warnings = logger.messages(LogLevel::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("listroms.txt:2:"));
}

#[test]
fn test_unrecognized_line_is_warned() {
    let (entries, logger) = parse(&[
        "ROMs required for driver \"005\".",
        "weird.bin    what is this even",
    ]);
    assert!(entries.is_empty());
    assert_eq!(logger.messages(LogLevel::Warning).len(), 1);
}

#[test]
fn test_pad_name() {
    assert_eq!(pad_name("abc", 6), "abc   ");
    assert_eq!(pad_name("abcdef", 6), format!("abcdef{NAME_GAP}"));
}

#[test]
fn test_write_machines_in_natural_order() {
    let ten = CatalogEntry::rom(
        "ic1",
        Machine::new("10yard"),
        Rom {
            size: 16,
            hashes: Hashes::new().with(HashType::Crc32, "00000001"),
            ..Rom::default()
        },
    );
    let text = write(&[ten, u25()]);

    let expected = format!(
        "ROMs required for driver \"005\".\n\
         {HEADER}\n\
         1346b.cpu-u25                          2048 CRC(8e68533e) SHA1({SHA1_U25})\n\
         \n\
         ROMs required for driver \"10yard\".\n\
         {HEADER}\n\
         ic1                                      16 CRC(00000001)\n\
         \n"
    );
    assert_eq!(text, expected);
}

#[test]
fn test_write_status_markers() {
    let bad = u25().with_status(ItemStatus::BadDump);
    let text = write(&[bad]);
    assert!(text.contains(&format!(
        "1346b.cpu-u25                          2048 BAD CRC(8e68533e) SHA1({SHA1_U25}) BAD_DUMP\n"
    )));

    let missing = u25().with_status(ItemStatus::Nodump);
    let text = write(&[missing]);
    assert!(text.contains("1346b.cpu-u25                          2048 NO GOOD DUMP KNOWN\n"));
}

#[test]
fn test_write_long_name_uses_gap() {
    let name = "a_really_long_rom_name_that_fills_the_column.bin";
    let entry = CatalogEntry::rom(
        name,
        Machine::new("m"),
        Rom {
            size: 1,
            hashes: Hashes::new().with(HashType::Crc32, "00000001"),
            ..Rom::default()
        },
    );
    let text = write(&[entry]);
    assert!(text.contains(&format!("{name}{NAME_GAP}1 CRC(00000001)\n")));
}

#[test]
fn test_write_then_parse_matches() {
    let disk = CatalogEntry::disk(
        "cdrom",
        Machine::new("005"),
        Disk {
            hashes: Hashes::new().with(HashType::Sha1, SHA1_HDD),
            merge: None,
        },
    );
    let original = vec![u25(), disk];
    let text = write(&original);
    let (parsed, logger) = parse(&text.lines().collect::<Vec<_>>());

    assert_eq!(parsed, original);
    assert!(logger.messages(LogLevel::Warning).is_empty());
}

#[test]
fn test_write_sized_nodump_keeps_size() {
    let entry = CatalogEntry::rom(
        "16v8h-blue.u24",
        Machine::new("005"),
        Rom {
            size: 279,
            ..Rom::default()
        },
    )
    .with_status(ItemStatus::Nodump);
    let text = write(&[entry]);
    assert!(text.contains("16v8h-blue.u24                          279 NO GOOD DUMP KNOWN\n"));

    let (parsed, logger) = parse(&text.lines().collect::<Vec<_>>());
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].item_type(), ItemType::Rom);
    assert_eq!(parsed[0].status, ItemStatus::Nodump);
    assert!(logger.messages(LogLevel::Warning).is_empty());
}

#[test]
fn test_incomplete_bad_dump_rows_do_not_read_back() {
    let unsized_bad = CatalogEntry::rom(
        "unsized.bin",
        Machine::new("005"),
        Rom {
            hashes: Hashes::new()
                .with(HashType::Crc32, "1d298cb0")
                .with(HashType::Sha1, SHA1_U8),
            ..Rom::default()
        },
    )
    .with_status(ItemStatus::BadDump);
    let crc_only_bad = CatalogEntry::rom(
        "crc_only.bin",
        Machine::new("005"),
        Rom {
            size: 32,
            hashes: Hashes::new().with(HashType::Crc32, "1d298cb0"),
            ..Rom::default()
        },
    )
    .with_status(ItemStatus::BadDump);

    let text = write(&[unsized_bad, crc_only_bad]);
    assert!(text.contains(&format!(" BAD CRC(1d298cb0) SHA1({SHA1_U8}) BAD_DUMP\n")));
    assert!(text.contains("32 BAD CRC(1d298cb0) BAD_DUMP\n"));

    let (parsed, logger) = parse(&text.lines().collect::<Vec<_>>());
    assert!(parsed.is_empty());
    assert_eq!(logger.messages(LogLevel::Warning).len(), 2);
}

use romdat_core::MemoryLogger;

use super::*;

#[test]
fn test_short_names_round_trip() {
    for format in DatFormat::ALL {
        assert_eq!(format.short_name().parse::<DatFormat>().unwrap(), format);
        assert_eq!(format.to_string(), format.short_name());
    }
}

#[test]
fn test_aliases() {
    assert_eq!(
        "CRC32".parse::<DatFormat>().unwrap(),
        DatFormat::Hashfile(HashType::Crc32)
    );
    assert_eq!(" rc ".parse::<DatFormat>().unwrap(), DatFormat::RomCenter);
    assert_eq!(
        "everdrive".parse::<DatFormat>().unwrap(),
        DatFormat::EverdriveSmdb
    );
}

#[test]
fn test_unknown_format() {
    let err = "logiqx".parse::<DatFormat>().unwrap_err();
    assert!(matches!(err, DatError::UnknownFormat(ref name) if name == "logiqx"));
    assert_eq!(err.to_string(), "Unknown DAT format: logiqx");
}

#[test]
fn test_extensions() {
    assert_eq!(DatFormat::Hashfile(HashType::Crc32).extension(), "sfv");
    assert_eq!(DatFormat::Hashfile(HashType::Sha256).extension(), "sha256");
    assert_eq!(DatFormat::RomCenter.extension(), "dat");
    assert_eq!(DatFormat::Listrom.extension(), "txt");
}

#[test]
fn test_codecs_start_fresh() {
    let logger = MemoryLogger::new();
    let options = ParseOptions::new("listroms.txt");
    let mut header = DatHeader::default();

    let mut first = DatFormat::Listrom.codec();
    let mut cx = ParseContext {
        options: &options,
        header: &mut header,
        logger: &logger,
        line_number: 1,
    };
    assert!(first.parse_line("ROMs required for driver \"005\".", &mut cx).is_none());

    // A second codec has not seen the machine line.
    let mut second = DatFormat::Listrom.codec();
    cx.line_number = 2;
    let line = "a.bin                                     4 CRC(00000001) SHA1(0000000000000000000000000000000000000001)";
    assert!(first.parse_line(line, &mut cx).is_some());
    assert!(second.parse_line(line, &mut cx).is_none());
    assert_eq!(
        logger.messages(romdat_core::LogLevel::Warning),
        [format!("listroms.txt:2: Entry before any machine line: {line}")]
    );
}

#[test]
fn test_header_fill_keeps_first_value() {
    let mut slot = None;
    crate::header::fill(&mut slot, "   ");
    assert_eq!(slot, None);
    crate::header::fill(&mut slot, " first ");
    crate::header::fill(&mut slot, "second");
    assert_eq!(slot.as_deref(), Some("first"));
}

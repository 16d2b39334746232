//! Line-driven parse driver shared by every format.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use romdat_core::{
    CatalogEntry, CatalogLogger, EntryKind, ItemStatus, SIZE_UNKNOWN, SIZE_ZERO, Source,
};

use crate::error::DatError;
use crate::format::{DatCodec, DatFormat, ParseContext};
use crate::header::DatHeader;

const BOM: char = '\u{feff}';

/// Options that shape how entries are produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Stamped on every entry's [`Source`].
    pub system_id: usize,
    pub source_id: usize,
    /// Name used in log messages and, for hash lists, as the machine name.
    pub source_name: String,
    /// Keep the extension when a machine is named after the source file.
    pub keep_extension: bool,
    /// Trim names and turn `\` separators into `/`.
    pub clean_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            system_id: 0,
            source_id: 0,
            source_name: String::new(),
            keep_extension: false,
            clean_names: true,
        }
    }
}

impl ParseOptions {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Self::default()
        }
    }
}

/// A parsed catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatFile {
    pub header: DatHeader,
    pub entries: Vec<CatalogEntry>,
}

/// Incremental parser: feed lines in order, then [`finish`](Self::finish).
pub struct DatReader {
    format: DatFormat,
    codec: Box<dyn DatCodec>,
    options: ParseOptions,
    logger: Arc<dyn CatalogLogger>,
    dat: DatFile,
    line_number: usize,
}

impl DatReader {
    pub fn new(format: DatFormat, options: ParseOptions, logger: Arc<dyn CatalogLogger>) -> Self {
        Self {
            format,
            codec: format.codec(),
            options,
            logger,
            dat: DatFile::default(),
            line_number: 0,
        }
    }

    pub fn format(&self) -> DatFormat {
        self.format
    }

    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;
        let mut line = line.trim_end_matches(['\r', '\n']);
        if self.line_number == 1 {
            line = line.trim_start_matches(BOM);
        }

        let mut cx = ParseContext {
            options: &self.options,
            header: &mut self.dat.header,
            logger: self.logger.as_ref(),
            line_number: self.line_number,
        };
        if let Some(entry) = self.codec.parse_line(line, &mut cx) {
            self.add(entry);
        }
    }

    pub fn finish(self) -> DatFile {
        self.dat
    }

    fn add(&mut self, mut entry: CatalogEntry) {
        if self.options.clean_names {
            entry.name = clean_name(&entry.name);
            entry.machine.name = clean_name(&entry.machine.name);
        }
        if entry.name.is_empty() || entry.machine.name.is_empty() {
            self.logger.warning(&format!(
                "{}:{}: Dropping entry with an empty name or machine name",
                self.options.source_name, self.line_number
            ));
            return;
        }

        entry.source = Source {
            system_id: self.options.system_id,
            source_id: self.options.source_id,
        };
        complete_entry(&mut entry, self.logger.as_ref());
        self.dat.entries.push(entry);
    }
}

fn clean_name(name: &str) -> String {
    name.trim().replace('\\', "/")
}

/// Fill in what a format leaves implicit about empty and unhashed files.
fn complete_entry(entry: &mut CatalogEntry, logger: &dyn CatalogLogger) {
    let nodump = entry.status == ItemStatus::Nodump;
    let missing = match &mut entry.kind {
        EntryKind::Rom(rom) => {
            let has_hashes = rom.hashes.has_any();
            let empty_size = rom.size == SIZE_ZERO || rom.size == SIZE_UNKNOWN;
            if (rom.size == SIZE_ZERO && !has_hashes) || (empty_size && rom.hashes.has_zero_hash())
            {
                rom.size = SIZE_ZERO;
                rom.hashes.set_zero();
                false
            } else {
                !nodump && rom.size > 0 && !has_hashes
            }
        }
        EntryKind::Disk(disk) => !nodump && !disk.hashes.has_any(),
        _ => false,
    };

    if missing {
        logger.verbose(&format!(
            "Incomplete entry for '{}' in '{}' will be output as nodump",
            entry.name, entry.machine.name
        ));
        entry.status = ItemStatus::Nodump;
    }
}

/// Parse already-decoded lines.
pub fn parse_lines<I, S>(
    format: DatFormat,
    lines: I,
    options: ParseOptions,
    logger: Arc<dyn CatalogLogger>,
) -> DatFile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reader = DatReader::new(format, options, logger);
    for line in lines {
        reader.feed_line(line.as_ref());
    }
    reader.finish()
}

/// Parse from any buffered source. Invalid UTF-8 is replaced, not rejected.
pub fn parse_reader<R: BufRead>(
    format: DatFormat,
    mut source: R,
    options: ParseOptions,
    logger: Arc<dyn CatalogLogger>,
) -> Result<DatFile, DatError> {
    let mut reader = DatReader::new(format, options, logger.clone());
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = source.read_until(b'\n', &mut buf).map_err(|e| {
            logger.error(&format!("Failed to read {format} DAT: {e}"));
            e
        })?;
        if read == 0 {
            break;
        }
        reader.feed_line(&String::from_utf8_lossy(&buf));
    }
    Ok(reader.finish())
}

/// Parse a file. An empty `source_name` is replaced by the path.
pub fn parse_file(
    format: DatFormat,
    path: impl AsRef<Path>,
    mut options: ParseOptions,
    logger: Arc<dyn CatalogLogger>,
) -> Result<DatFile, DatError> {
    let path = path.as_ref();
    if options.source_name.is_empty() {
        options.source_name = path.to_string_lossy().into_owned();
    }

    let file = std::fs::File::open(path).map_err(|e| {
        logger.error(&format!("Failed to open '{}': {e}", path.display()));
        e
    })?;
    parse_reader(format, BufReader::new(file), options, logger)
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;

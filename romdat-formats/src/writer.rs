//! Write driver: groups entries by machine and drives a codec over them.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use romdat_core::{CatalogEntry, CatalogLogger, SIZE_UNKNOWN, SIZE_ZERO, natural_cmp};

use crate::error::DatError;
use crate::format::{DatCodec, DatFormat, WriteContext};
use crate::header::DatHeader;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Suppress Roms of zero or unknown size.
    pub ignore_blanks: bool,
    /// Prefix hash-list names with their machine name.
    pub game_name: bool,
}

pub struct DatWriter {
    format: DatFormat,
    codec: Box<dyn DatCodec>,
    options: WriteOptions,
    logger: Arc<dyn CatalogLogger>,
}

impl DatWriter {
    pub fn new(format: DatFormat, options: WriteOptions, logger: Arc<dyn CatalogLogger>) -> Self {
        Self {
            format,
            codec: format.codec(),
            options,
            logger,
        }
    }

    pub fn format(&self) -> DatFormat {
        self.format
    }

    /// Render a whole catalog into `out`.
    pub fn write<W: Write>(
        &self,
        header: &DatHeader,
        entries: &[CatalogEntry],
        out: &mut W,
    ) -> Result<(), DatError> {
        self.render(header, entries, out).map_err(|e| {
            self.logger
                .error(&format!("Failed to write {} DAT: {e}", self.format));
            DatError::from(e)
        })
    }

    /// Create (or truncate) `path` and write the catalog to it.
    pub fn write_file(
        &self,
        header: &DatHeader,
        entries: &[CatalogEntry],
        path: impl AsRef<Path>,
    ) -> Result<(), DatError> {
        let path = path.as_ref();
        self.logger
            .user(&format!("Writing {} DAT to '{}'", self.format, path.display()));

        let file = File::create(path).map_err(|e| {
            self.logger
                .error(&format!("Failed to create '{}': {e}", path.display()));
            e
        })?;
        let mut out = BufWriter::new(file);
        self.write(header, entries, &mut out)
    }

    fn render(
        &self,
        header: &DatHeader,
        entries: &[CatalogEntry],
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let cx = WriteContext {
            header,
            options: &self.options,
            logger: self.logger.as_ref(),
        };

        self.codec.write_header(out, &cx)?;
        out.flush()?;

        let mut last_machine: Option<String> = None;
        for entry in group_by_machine(entries) {
            if entry.name.is_empty() || entry.machine.name.is_empty() {
                self.logger.warning(&format!(
                    "Skipping entry with an empty name or machine name ('{}' in '{}')",
                    entry.name, entry.machine.name
                ));
                continue;
            }

            let entry = if entry.is_placeholder() {
                self.logger
                    .verbose(&format!("Empty folder found: {}", entry.machine.name));
                let mut entry = entry.clone();
                entry.normalize_placeholder();
                Cow::Owned(entry)
            } else {
                Cow::Borrowed(entry)
            };

            if self.options.ignore_blanks
                && matches!(entry.size(), Some(SIZE_ZERO) | Some(SIZE_UNKNOWN))
            {
                continue;
            }

            let machine = entry.machine.name.to_lowercase();
            if last_machine.as_deref() != Some(machine.as_str()) {
                if last_machine.is_some() {
                    self.codec.write_game_end(out, &cx)?;
                }
                self.codec.write_game_start(out, &entry, &cx)?;
                last_machine = Some(machine);
            }

            self.codec.write_entry(out, &entry, &cx)?;
            out.flush()?;
        }

        if last_machine.is_some() {
            self.codec.write_game_end(out, &cx)?;
        }
        out.flush()
    }
}

/// Entries ordered by machine name in natural order, keeping input order
/// within each machine.
pub fn group_by_machine(entries: &[CatalogEntry]) -> Vec<&CatalogEntry> {
    let mut grouped: Vec<&CatalogEntry> = entries.iter().collect();
    grouped.sort_by(|a, b| natural_cmp(&a.machine.name, &b.machine.name));
    grouped
}

/// Render a catalog into `out` with a one-off writer.
pub fn write_dat<W: Write>(
    format: DatFormat,
    header: &DatHeader,
    entries: &[CatalogEntry],
    options: WriteOptions,
    logger: Arc<dyn CatalogLogger>,
    out: &mut W,
) -> Result<(), DatError> {
    DatWriter::new(format, options, logger).write(header, entries, out)
}

/// Write a catalog to `path` with a one-off writer.
pub fn write_dat_file(
    format: DatFormat,
    header: &DatHeader,
    entries: &[CatalogEntry],
    options: WriteOptions,
    logger: Arc<dyn CatalogLogger>,
    path: impl AsRef<Path>,
) -> Result<(), DatError> {
    DatWriter::new(format, options, logger).write_file(header, entries, path)
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;

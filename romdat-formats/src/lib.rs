pub mod attract_mode;
pub mod error;
pub mod everdrive_smdb;
pub mod format;
pub mod hashfile;
pub mod header;
pub mod listrom;
pub mod reader;
pub mod romcenter;
pub mod settings;
pub mod writer;

pub use error::DatError;
pub use format::{DatCodec, DatFormat, ParseContext, WriteContext};
pub use header::{DatHeader, MergingMode};
pub use reader::{DatFile, DatReader, ParseOptions, parse_file, parse_lines, parse_reader};
pub use settings::{DatSettings, ParseSettings, WriteSettings, settings_path};
pub use writer::{DatWriter, WriteOptions, group_by_machine, write_dat, write_dat_file};

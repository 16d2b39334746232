/// Errors that can occur while reading or writing catalog files.
///
/// Malformed lines are never errors; they are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Unknown DAT format: {0}")]
    UnknownFormat(String),
}

impl DatError {
    pub fn unknown_format(msg: impl Into<String>) -> Self {
        Self::UnknownFormat(msg.into())
    }
}

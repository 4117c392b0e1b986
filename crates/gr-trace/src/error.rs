use std::fmt;

use gr_core::ConfigError;

#[derive(Debug)]
pub enum TraceError {
    Io(std::io::Error),
    /// A trace line that is not a valid sample. `line` is 1-based.
    Json { line: usize, source: serde_json::Error },
    Toml(toml::de::Error),
    Config(ConfigError),
    InvalidData(String),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "I/O error: {e}"),
            TraceError::Json { line, source } => write!(f, "line {line}: {source}"),
            TraceError::Toml(e) => write!(f, "invalid config: {e}"),
            TraceError::Config(e) => write!(f, "invalid thresholds: {e}"),
            TraceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
            TraceError::Json { source, .. } => Some(source),
            TraceError::Toml(e) => Some(e),
            TraceError::Config(e) => Some(e),
            TraceError::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(e: std::io::Error) -> Self {
        TraceError::Io(e)
    }
}

impl From<toml::de::Error> for TraceError {
    fn from(e: toml::de::Error) -> Self {
        TraceError::Toml(e)
    }
}

impl From<ConfigError> for TraceError {
    fn from(e: ConfigError) -> Self {
        TraceError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;

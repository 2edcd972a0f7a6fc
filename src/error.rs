use std::io;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RelationError>;

/// Errors surfaced by relation construction and configuration.
///
/// Lookups and removals never fail: a missing pair is reported as `false`,
/// an empty set, or a zero count.
#[derive(Debug, Error)]
pub enum RelationError {
    /// Reading an options file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A caller supplied a value the table cannot operate with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An options document could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RelationError {
    fn from(err: toml::de::Error) -> Self {
        RelationError::Config(err.to_string())
    }
}

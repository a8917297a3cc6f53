//! Crate-level error types.

use std::fmt;

/// Errors produced by the driftwall crate.
#[derive(Debug)]
pub enum WallError {
    /// A manifest record is missing a required field.
    Manifest(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn the prefetch worker thread.
    ThreadSpawn(std::io::Error),
    /// The prefetch worker failed to fetch an image.
    Fetch(String),
}

impl fmt::Display for WallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(msg) => write!(f, "manifest error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Fetch(msg) => write!(f, "fetch error: {msg}"),
        }
    }
}

impl std::error::Error for WallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WallError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

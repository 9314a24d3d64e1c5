//! Error types for the session CLI.

use std::path::PathBuf;

use orderfsm::ParseEventError;

/// All errors that can occur while loading or running a session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        source: ParseEventError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

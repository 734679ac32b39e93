//! Error types for squadsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a local roster file or a remote payload into
/// member records.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The local roster file could not be opened or read.
    #[error("cannot read roster file {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The local roster has no non-blank lines.
    #[error("roster source contains no non-blank lines")]
    SourceEmpty,

    /// A line inside the roster section carries fewer than three quoted values.
    #[error("roster line {line} has {found} quoted value(s), expected name, id and rank: {content}")]
    MalformedLine {
        line: usize,
        found: usize,
        content: String,
    },

    /// The remote payload ends in the middle of a member record.
    #[error("member payload truncated: record at value {index} needs {needed} values, {available} left")]
    TruncatedPayload {
        index: usize,
        needed: usize,
        available: usize,
    },
}

/// Errors raised while loading the config file or resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the file path and serde_yaml's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None` and no `--config` was given.
    #[error("cannot determine home directory; pass --config explicitly")]
    HomeNotFound,

    /// A required setting was absent (or empty) in both the config file and
    /// the command line.
    #[error("missing required setting `{0}`; set it in the config file or pass it on the command line")]
    Missing(&'static str),

    /// An optional setting was given but left empty.
    #[error("setting `{0}` is present but empty")]
    Empty(&'static str),
}

//! Error definitions.
//!
//! Only whole-operation failures are errors here. Malformed lines and
//! unparseable integers inside a trace degrade to skipped lines or
//! [`Reading::Malformed`](crate::trace::Reading::Malformed) and never surface
//! as an `Err`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a program's listing or cycle trace.
///
/// A load reads two files; if either read fails, the whole load fails and
/// nothing is parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The program name is not listed in the catalog.
    #[error("unknown program '{0}'")]
    UnknownProgram(String),

    /// Adapter-reported failure (e.g. an HTTP fetch that returned an error).
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Failure to read or decode a configuration or catalog file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON did not match the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

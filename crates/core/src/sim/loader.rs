//! Program catalog and file loading.
//!
//! This module finds and reads the two files of a program. It performs:
//! 1. **Catalog lookup:** Checks the name against `programs.json`.
//! 2. **Path resolution:** `<root>/<name>/<listing_file>` and `<root>/<name>/<trace_file>`.
//! 3. **Join:** Both files must be read before anything is parsed; one failure fails the load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::program::Program;
use crate::common::{ConfigError, LoadError};
use crate::config::CatalogConfig;

/// Source of program text.
///
/// The CLI reads from disk; the browser adapter fetches over HTTP and hands
/// the text to the session directly.
pub trait TraceSource {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads program files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirSource;

impl TraceSource for DirSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// List of available programs (`programs.json`).
///
/// An empty catalog accepts any name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Program names, in display order.
    #[serde(default)]
    pub programs: Vec<String>,
}

impl Catalog {
    /// Decodes a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text does not decode.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Json`] if it cannot be decoded.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns `true` if `name` may be loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.programs.is_empty() || self.programs.iter().any(|p| p == name)
    }

    /// Resolves `name` to the paths of its two files.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownProgram`] for a name missing from a
    /// non-empty catalog.
    pub fn request(&self, config: &CatalogConfig, name: &str) -> Result<ProgramRequest, LoadError> {
        if !self.contains(name) {
            return Err(LoadError::UnknownProgram(name.to_owned()));
        }
        Ok(ProgramRequest::new(config, name))
    }
}

/// Paths of one program's listing and trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRequest {
    /// Catalog name.
    pub name: String,
    /// Listing file name, used for the title.
    pub listing_file: String,
    /// Full path of the listing.
    pub listing_path: PathBuf,
    /// Full path of the cycle trace.
    pub trace_path: PathBuf,
}

impl ProgramRequest {
    /// Builds the request for `name` under `config.root`.
    pub fn new(config: &CatalogConfig, name: &str) -> Self {
        let dir = config.root.join(name);
        Self {
            name: name.to_owned(),
            listing_file: config.listing_file.clone(),
            listing_path: dir.join(&config.listing_file),
            trace_path: dir.join(&config.trace_file),
        }
    }
}

/// Raw text of both program files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramText {
    /// Listing text.
    pub listing: String,
    /// Cycle trace text.
    pub trace: String,
}

impl ProgramText {
    /// Reads both files of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] naming the first file that failed.
    pub fn fetch(source: &dyn TraceSource, request: &ProgramRequest) -> Result<Self, LoadError> {
        let read = |path: &Path| {
            source.read_to_string(path).map_err(|err| LoadError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        };
        Ok(Self {
            listing: read(&request.listing_path)?,
            trace: read(&request.trace_path)?,
        })
    }
}

/// Reads and parses a program.
///
/// # Errors
///
/// Fails as a whole if either file cannot be read.
pub fn load_program(source: &dyn TraceSource, request: &ProgramRequest) -> Result<Program, LoadError> {
    let text = ProgramText::fetch(source, request)?;
    let program = Program::parse(&request.name, &request.listing_file, &text.listing, &text.trace);
    info!(
        program = %program.name,
        instructions = program.instructions.len(),
        cycles = program.total_cycles(),
        "loaded program"
    );
    Ok(program)
}

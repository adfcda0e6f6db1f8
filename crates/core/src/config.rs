//! Configuration for the replay engine.
//!
//! This module defines the configuration structures used to parameterize a
//! session. It provides:
//! 1. **Defaults:** Baseline playback rate and program directory layout.
//! 2. **Structures:** Playback and catalog settings.
//!
//! Configuration is supplied as JSON (browser adapter, `--config` on the CLI)
//! or taken from `Config::default()`. Every field is optional in the JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::common::ConfigError;
use crate::playback::PlaybackRate;

/// Default configuration constants.
mod defaults {
    /// Cycles advanced per second during automatic playback.
    pub const RATE_HZ: u32 = 5;

    /// Floor applied to non-positive or non-numeric rate input.
    pub const MIN_RATE_HZ: u32 = 1;

    /// Ceiling on the playback rate; keeps the tick interval at 1 ms or more.
    pub const MAX_RATE_HZ: u32 = 1000;

    /// Playback starts as soon as a trace finishes loading.
    pub const AUTOPLAY: bool = true;

    /// Directory holding one sub-directory per program.
    pub const ROOT: &str = "program";

    /// Program selected when the page (or CLI) first starts.
    pub const DEFAULT_PROGRAM: &str = "fib";

    /// Listing file name inside a program directory.
    pub const LISTING_FILE: &str = "assembly_code.txt";

    /// Cycle trace file name inside a program directory.
    pub const TRACE_FILE: &str = "pc_stages.txt";

    /// Catalog file listing the available programs.
    pub const CATALOG_FILE: &str = "programs.json";
}

pub use defaults::{MAX_RATE_HZ, MIN_RATE_HZ};

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipeviz_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.playback.rate_hz, 5);
/// assert_eq!(config.catalog.default_program, "fib");
/// ```
///
/// Partial JSON falls back to defaults field by field:
///
/// ```
/// use pipeviz_core::config::Config;
///
/// let config = Config::from_json(r#"{ "playback": { "rate_hz": 12 } }"#).unwrap();
/// assert_eq!(config.playback.rate_hz, 12);
/// assert!(config.playback.autoplay);
/// assert_eq!(config.catalog.trace_file, "pc_stages.txt");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Playback clock settings
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Program directory layout
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Decodes a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the text is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and decodes a JSON configuration file.
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
}

/// Playback clock settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// Initial cycles per second.
    ///
    /// Accepts a number or a string. Non-positive or non-numeric values are
    /// raised to 1, like the rate typed into the control.
    #[serde(
        default = "PlaybackConfig::default_rate_hz",
        deserialize_with = "lenient_rate_hz"
    )]
    pub rate_hz: u32,

    /// Enter the running state right after a trace loads.
    #[serde(default = "PlaybackConfig::default_autoplay")]
    pub autoplay: bool,
}

impl PlaybackConfig {
    /// Returns the default playback rate.
    fn default_rate_hz() -> u32 {
        defaults::RATE_HZ
    }

    /// Returns the default autoplay flag.
    fn default_autoplay() -> bool {
        defaults::AUTOPLAY
    }
}

fn lenient_rate_hz<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let rate = match Value::deserialize(deserializer)? {
        Value::String(text) => PlaybackRate::parse(&text),
        Value::Number(n) => PlaybackRate::parse(&n.to_string()),
        _ => PlaybackRate::from_hz(MIN_RATE_HZ),
    };
    Ok(rate.hz())
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate_hz: defaults::RATE_HZ,
            autoplay: defaults::AUTOPLAY,
        }
    }
}

/// Layout of the program directories.
///
/// A program named `fib` lives at `<root>/fib/<listing_file>` and
/// `<root>/fib/<trace_file>`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding one sub-directory per program
    #[serde(default = "CatalogConfig::default_root")]
    pub root: PathBuf,

    /// Program selected at startup
    #[serde(default = "CatalogConfig::default_program")]
    pub default_program: String,

    /// Listing file name
    #[serde(default = "CatalogConfig::default_listing_file")]
    pub listing_file: String,

    /// Cycle trace file name
    #[serde(default = "CatalogConfig::default_trace_file")]
    pub trace_file: String,

    /// Catalog file, relative to the working directory
    #[serde(default = "CatalogConfig::default_catalog_file")]
    pub catalog_file: PathBuf,
}

impl CatalogConfig {
    fn default_root() -> PathBuf {
        PathBuf::from(defaults::ROOT)
    }

    fn default_program() -> String {
        defaults::DEFAULT_PROGRAM.to_owned()
    }

    fn default_listing_file() -> String {
        defaults::LISTING_FILE.to_owned()
    }

    fn default_trace_file() -> String {
        defaults::TRACE_FILE.to_owned()
    }

    fn default_catalog_file() -> PathBuf {
        PathBuf::from(defaults::CATALOG_FILE)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            default_program: Self::default_program(),
            listing_file: Self::default_listing_file(),
            trace_file: Self::default_trace_file(),
            catalog_file: Self::default_catalog_file(),
        }
    }
}

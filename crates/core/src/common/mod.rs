//! Common types used throughout the replay engine.
//!
//! This module provides the shared building blocks:
//! 1. **Errors:** Load and configuration failures.
//! 2. **Program counters:** The join key between the listing and the cycle trace.

/// Error types for loading programs and configuration.
pub mod error;

/// Program counter alias.
pub type Pc = i64;

pub use error::{ConfigError, LoadError};

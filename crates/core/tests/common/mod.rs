//! Shared test infrastructure.

/// Listing and trace texts.
pub mod fixtures;

//! Program loading and the playback session.
//!
//! This module ties the parsers, projector, clock and hit statistics together:
//! 1. **Loader:** Catalog lookup and the two-file read with join semantics.
//! 2. **Program:** Parsed listing and trace plus the PC-to-row index.
//! 3. **Session:** Event dispatch returning effects for the adapter.
//! 4. **Snapshot:** Read-only view handed to the presentation layer.

/// Catalog, program requests and file sources.
pub mod loader;
/// Parsed program and listing index.
pub mod program;
/// Event dispatch.
pub mod session;
/// Read-only presentation snapshot.
pub mod snapshot;

pub use loader::{Catalog, DirSource, ProgramRequest, ProgramText, TraceSource, load_program};
pub use program::{ListingIndex, Program};
pub use session::{Effect, Event, LoadTicket, PlaybackSession};
pub use snapshot::{RowView, Snapshot};

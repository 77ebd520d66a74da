//! Score events — the records the propagation engine produces for a writer.
//!
//! Each [`ScoreEvent`] is one note's ordered parameter list. A
//! [`RenderedSection`] holds a section's events together with its tempo map,
//! and a [`Score`] holds every section of a song. The [`Timeline`] gives a
//! stable start-time ordering across tracks.

pub mod timeline;
pub mod types;

pub use timeline::Timeline;
pub use types::{RenderedSection, Score, ScoreEvent};

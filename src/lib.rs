//! Dynarc — dynamics envelopes and score-event rendering for composition trees.
//!
//! A song is a tree of sections, groups, tracks and musical elements. Each
//! node may carry a dynamics [`Envelope`](dynamics::Envelope); the
//! [`Renderer`](engine::Renderer) pushes start times and dynamics down the
//! tree and asks the track's [`Instrument`](instrument::Instrument) to turn
//! each note into an ordered parameter list.

pub mod composition;
pub mod config;
pub mod demo;
pub mod dynamics;
pub mod engine;
pub mod error;
pub mod event;
pub mod instrument;

pub use error::{Error, Result};

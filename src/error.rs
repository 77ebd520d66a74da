//! Error types for dynarc.

use thiserror::Error;

use crate::composition::InstrumentId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),
    #[error("invalid slice range: start {start}, duration {duration}")]
    InvalidSliceRange { start: f64, duration: f64 },
    #[error("cannot add two absolute dynamics envelopes")]
    IncompatibleAbsoluteCombination,
    #[error("malformed tree: {0}")]
    MalformedTree(String),
    #[error("no instrument registered for {0}")]
    UnknownInstrument(InstrumentId),
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

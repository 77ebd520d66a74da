//! Instrument adapters — turn a resolved note into an ordered parameter list.
//!
//! The propagation engine hands every note to the [`Instrument`] bound to its
//! track. The adapter decides how start, duration, dynamics and pitch become
//! score parameters, and what carry value (portamento) the next note in the
//! same gesture receives.

pub mod arc;
pub mod basic;
pub mod glide;
pub mod router;

pub use arc::ArcInstrument;
pub use basic::BasicInstrument;
pub use glide::GlideInstrument;
pub use router::InstrumentRouter;

use crate::composition::{Articulation, InstrumentId};
use crate::dynamics::Envelope;

/// State carried from one note to the next inside a gesture.
///
/// `None` means no carry; the stock adapters carry the previous pitch.
pub type Portamento = Option<f64>;

/// Everything the engine knows about a note when it reaches the instrument.
#[derive(Debug, Clone, Copy)]
pub struct NoteContext<'a> {
    /// Absolute start time in the section's clock.
    pub start: f64,
    pub duration: f64,
    /// The note's dynamics after slicing and combining with every ancestor.
    pub dynamics: &'a Envelope,
    /// Resolved articulation; `None` when nothing in the tree set one.
    pub articulation: Option<Articulation>,
    pub pitch: Option<f64>,
    pub portamento: Portamento,
}

/// Identity and articulation settings every adapter carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub id: InstrumentId,
    pub name: String,
    /// Fraction of the written duration a staccato note sounds for.
    pub staccato_factor: f64,
}

impl Voice {
    pub fn new(id: InstrumentId) -> Self {
        Self {
            id,
            name: format!("instrument #{}", id.0),
            staccato_factor: 0.5,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_staccato_factor(mut self, factor: f64) -> Self {
        self.staccato_factor = factor;
        self
    }
}

/// The parameters produced for one note and the carry for the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub params: Vec<f64>,
    pub portamento: Portamento,
}

/// Common interface for score instruments.
///
/// Implementors usually override one of the `*_params` hooks and keep the
/// provided [`emit`](Instrument::emit), which fixes the parameter order as
/// `[id, time.., dynamics.., pitch..]`.
pub trait Instrument: Send {
    fn voice(&self) -> &Voice;

    fn id(&self) -> InstrumentId {
        self.voice().id
    }

    /// Human-readable name for this instrument.
    fn name(&self) -> &str {
        &self.voice().name
    }

    fn staccato_factor(&self) -> f64 {
        self.voice().staccato_factor
    }

    fn time_params(
        &self,
        start: f64,
        duration: f64,
        articulation: Option<Articulation>,
    ) -> Vec<f64> {
        let duration = if articulation == Some(Articulation::Staccato) {
            duration * self.staccato_factor()
        } else {
            duration
        };
        vec![start, duration]
    }

    fn dynamic_params(
        &self,
        dynamics: &Envelope,
        _articulation: Option<Articulation>,
        _portamento: Portamento,
    ) -> Vec<f64> {
        vec![dynamics.average_level()]
    }

    fn pitch_params(
        &self,
        pitch: Option<f64>,
        _articulation: Option<Articulation>,
        _portamento: Portamento,
    ) -> Vec<f64> {
        pitch.into_iter().collect()
    }

    /// Carry for the next note: the pitch just played while legato, otherwise none.
    fn update_portamento(
        &self,
        pitch: Option<f64>,
        articulation: Option<Articulation>,
        _portamento: Portamento,
    ) -> Portamento {
        if articulation == Some(Articulation::Legato) {
            pitch
        } else {
            None
        }
    }

    fn emit(&self, note: &NoteContext<'_>) -> Emission {
        let mut params = vec![f64::from(self.id().0)];
        params.extend(self.time_params(note.start, note.duration, note.articulation));
        params.extend(self.dynamic_params(note.dynamics, note.articulation, note.portamento));
        params.extend(self.pitch_params(note.pitch, note.articulation, note.portamento));
        Emission {
            params,
            portamento: self.update_portamento(note.pitch, note.articulation, note.portamento),
        }
    }
}

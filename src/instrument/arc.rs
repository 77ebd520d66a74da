//! An instrument that shapes its own amplitude from the envelope's arc.

use super::{Instrument, Portamento, Voice};
use crate::composition::{Articulation, InstrumentId};
use crate::dynamics::Envelope;

/// Emits the initial, average and final level as dynamics parameters, so the
/// synthesizer can draw its own ramp across the note.
#[derive(Debug, Clone)]
pub struct ArcInstrument {
    voice: Voice,
}

impl ArcInstrument {
    pub fn new(id: InstrumentId) -> Self {
        Self::from_voice(Voice::new(id).with_name(format!("arc #{}", id.0)))
    }

    pub fn from_voice(voice: Voice) -> Self {
        Self { voice }
    }
}

impl Instrument for ArcInstrument {
    fn voice(&self) -> &Voice {
        &self.voice
    }

    fn dynamic_params(
        &self,
        dynamics: &Envelope,
        _articulation: Option<Articulation>,
        _portamento: Portamento,
    ) -> Vec<f64> {
        vec![
            dynamics.initial_level(),
            dynamics.average_level(),
            dynamics.final_level(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::NoteContext;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn emits_initial_average_final() {
        let inst = ArcInstrument::new(InstrumentId(102));
        let env = Envelope::from_pairs(&[(0.2, 1.0), (0.6, 0.0)], true).unwrap();
        let out = inst.emit(&NoteContext {
            start: 1.0,
            duration: 4.0,
            dynamics: &env,
            articulation: None,
            pitch: Some(6.00),
            portamento: None,
        });
        assert_eq!(out.params.len(), 7);
        assert_eq!(out.params[0], 102.0);
        assert_approx_eq!(out.params[3], 0.2);
        assert_approx_eq!(out.params[4], 0.4);
        assert_approx_eq!(out.params[5], 0.6);
        assert_eq!(out.params[6], 6.00);
    }
}

//! An instrument that glides from the previous pitch of a legato phrase.

use super::{Instrument, Portamento, Voice};
use crate::composition::{Articulation, InstrumentId};

/// Emits `[pitch, from_pitch]`, where `from_pitch` is the carried pitch of the
/// preceding legato note, or the note's own pitch when nothing is carried.
#[derive(Debug, Clone)]
pub struct GlideInstrument {
    voice: Voice,
}

impl GlideInstrument {
    pub fn new(id: InstrumentId) -> Self {
        Self::from_voice(Voice::new(id).with_name(format!("glide #{}", id.0)))
    }

    pub fn from_voice(voice: Voice) -> Self {
        Self { voice }
    }
}

impl Instrument for GlideInstrument {
    fn voice(&self) -> &Voice {
        &self.voice
    }

    fn pitch_params(
        &self,
        pitch: Option<f64>,
        _articulation: Option<Articulation>,
        portamento: Portamento,
    ) -> Vec<f64> {
        match pitch {
            Some(p) => vec![p, portamento.unwrap_or(p)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Envelope;
    use crate::instrument::NoteContext;

    fn play(inst: &GlideInstrument, pitch: f64, portamento: Portamento) -> (Vec<f64>, Portamento) {
        let env = Envelope::constant(0.5, true);
        let out = inst.emit(&NoteContext {
            start: 0.0,
            duration: 1.0,
            dynamics: &env,
            articulation: Some(Articulation::Legato),
            pitch: Some(pitch),
            portamento,
        });
        (out.params, out.portamento)
    }

    #[test]
    fn glides_from_carried_pitch() {
        let inst = GlideInstrument::new(InstrumentId(3));
        let (first, carry) = play(&inst, 8.00, None);
        assert_eq!(&first[4..], &[8.00, 8.00]);
        assert_eq!(carry, Some(8.00));

        let (second, carry) = play(&inst, 8.07, carry);
        assert_eq!(&second[4..], &[8.07, 8.00]);
        assert_eq!(carry, Some(8.07));
    }
}

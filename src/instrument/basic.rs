//! The default instrument: one dynamics parameter, one pitch parameter.

use super::{Instrument, Voice};
use crate::composition::InstrumentId;

/// Plays notes with the stock parameter policy.
///
/// Staccato shortens by the voice's staccato factor, dynamics become the
/// envelope's average level, and legato carries the pitch.
#[derive(Debug, Clone)]
pub struct BasicInstrument {
    voice: Voice,
}

impl BasicInstrument {
    pub fn new(id: InstrumentId) -> Self {
        Self::from_voice(Voice::new(id).with_name(format!("basic #{}", id.0)))
    }

    pub fn from_voice(voice: Voice) -> Self {
        Self { voice }
    }
}

impl Instrument for BasicInstrument {
    fn voice(&self) -> &Voice {
        &self.voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Articulation;
    use crate::dynamics::Envelope;
    use crate::instrument::NoteContext;

    #[test]
    fn default_name() {
        assert_eq!(BasicInstrument::new(InstrumentId(101)).name(), "basic #101");
    }

    #[test]
    fn custom_staccato_factor() {
        let inst =
            BasicInstrument::from_voice(Voice::new(InstrumentId(1)).with_staccato_factor(0.25));
        let env = Envelope::constant(0.5, true);
        let out = inst.emit(&NoteContext {
            start: 0.0,
            duration: 2.0,
            dynamics: &env,
            articulation: Some(Articulation::Staccato),
            pitch: None,
            portamento: None,
        });
        assert_eq!(out.params, vec![1.0, 0.0, 0.5, 0.5]);
    }
}

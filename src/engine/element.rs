//! Element walk: notes, chords and gestures inside one track.

use crate::composition::{Articulation, Chord, Element, Gesture, InstrumentId, Note};
use crate::dynamics::Envelope;
use crate::error::{Error, Result};
use crate::event::ScoreEvent;
use crate::instrument::{InstrumentRouter, NoteContext, Portamento};

/// A node's effective dynamics given what its parent passed down.
///
/// Relative dynamics are layered onto an absolute ancestor; anything else
/// stands on its own.
pub(crate) fn compose(own: &Envelope, ancestor: &Envelope) -> Result<Envelope> {
    if own.is_absolute() || !ancestor.is_absolute() {
        Ok(own.clone())
    } else {
        own.add(ancestor)
    }
}

/// The part of a sequential container's dynamics spanned by one child.
pub(crate) fn slice_for(
    dynamics: &Envelope,
    elapsed: f64,
    child_duration: f64,
    total: f64,
) -> Result<Envelope> {
    let start = (elapsed / total).clamp(0.0, 1.0);
    let length = (child_duration / total).max(0.0);
    dynamics.slice(start, length)
}

/// A container's offset must be finite and any set duration finite and `>= 0`.
fn check_timing(kind: &str, start: f64, explicit_duration: Option<f64>) -> Result<()> {
    let duration_ok = explicit_duration.map_or(true, |d| d.is_finite() && d >= 0.0);
    if start.is_finite() && duration_ok {
        Ok(())
    } else {
        Err(Error::MalformedTree(format!(
            "{kind} with start {start} and duration {explicit_duration:?}"
        )))
    }
}

/// Emission target for the elements of one track.
pub(crate) struct TrackSink<'r, 'e> {
    pub router: &'r InstrumentRouter,
    pub instrument: InstrumentId,
    pub track: usize,
    pub events: &'e mut Vec<ScoreEvent>,
}

impl TrackSink<'_, '_> {
    /// Walk an element placed at `start`, returning the carry it leaves behind.
    pub fn walk(
        &mut self,
        element: &Element,
        start: f64,
        ancestor: &Envelope,
        articulation: Option<Articulation>,
        carry: Portamento,
    ) -> Result<Portamento> {
        match element {
            Element::Note(note) => self.note(note, start, ancestor, articulation, carry),
            Element::Chord(chord) => self.chord(chord, start, ancestor, articulation, carry),
            Element::Gesture(gesture) => self.gesture(gesture, start, ancestor, articulation),
        }
    }

    fn note(
        &mut self,
        note: &Note,
        start: f64,
        ancestor: &Envelope,
        articulation: Option<Articulation>,
        carry: Portamento,
    ) -> Result<Portamento> {
        if !note.duration.is_finite() || note.duration < 0.0 || !note.start.is_finite() {
            return Err(Error::MalformedTree(format!(
                "note with start {} and duration {}",
                note.start, note.duration
            )));
        }
        let dynamics = compose(&note.dynamics, ancestor)?;
        let ctx = NoteContext {
            start: start + note.start,
            duration: note.duration,
            dynamics: &dynamics,
            articulation: note.articulation.or(articulation),
            pitch: note.pitch,
            portamento: carry,
        };
        let emission = self.router.emit(self.instrument, &ctx)?;
        tracing::trace!(
            "{} note at {} for {}: {:?}",
            self.instrument,
            ctx.start,
            ctx.duration,
            emission.params
        );
        self.events.push(ScoreEvent::new(self.track, emission.params));
        Ok(emission.portamento)
    }

    /// Every child starts together, sees the whole chord envelope and the
    /// incoming carry. The last child's carry leaves the chord.
    fn chord(
        &mut self,
        chord: &Chord,
        start: f64,
        ancestor: &Envelope,
        articulation: Option<Articulation>,
        carry: Portamento,
    ) -> Result<Portamento> {
        check_timing("chord", chord.start, chord.explicit_duration)?;
        if chord.children.is_empty() && chord.explicit_duration.is_none() {
            return Err(Error::MalformedTree("chord has no children".to_string()));
        }
        let start = start + chord.start;
        let dynamics = compose(&chord.dynamics, ancestor)?;
        let articulation = chord.articulation.or(articulation);

        let mut out = carry;
        for child in &chord.children {
            out = self.walk(child, start, &dynamics, articulation, carry)?;
        }
        Ok(out)
    }

    /// Children follow one another; carry starts empty and threads through.
    fn gesture(
        &mut self,
        gesture: &Gesture,
        start: f64,
        ancestor: &Envelope,
        articulation: Option<Articulation>,
    ) -> Result<Portamento> {
        check_timing("gesture", gesture.start, gesture.explicit_duration)?;
        if gesture.children.is_empty() {
            return match gesture.explicit_duration {
                // A rest.
                Some(_) => Ok(None),
                None => Err(Error::MalformedTree("gesture has no children".to_string())),
            };
        }
        let total = gesture.duration();
        if !(total > 0.0) {
            return Err(Error::MalformedTree(
                "gesture has zero total duration".to_string(),
            ));
        }
        let start = start + gesture.start;
        let dynamics = compose(&gesture.dynamics, ancestor)?;
        let articulation = gesture.articulation.or(articulation);

        let mut carry = None;
        let mut elapsed = 0.0;
        for child in &gesture.children {
            let child_duration = child.duration();
            let passed = slice_for(&dynamics, elapsed, child_duration, total)?;
            carry = self.walk(child, start + elapsed, &passed, articulation, carry)?;
            elapsed += child_duration;
        }
        Ok(carry)
    }
}

//! Built-in sample song — one section with a melody track and its effects track.
//!
//! Used by `dynarc demo` and as a fixture for the rendering tests.

use crate::composition::{
    Articulation, Chord, Gesture, Group, InstrumentId, Note, Section, Song, Track,
};
use crate::dynamics::Envelope;
use crate::error::Result;

pub const MELODY: InstrumentId = InstrumentId(101);
pub const EFFECTS: InstrumentId = InstrumentId(102);

/// A swell that rises and holds before dropping away.
fn swell() -> Result<Envelope> {
    Envelope::from_pairs(&[(0.25, 1.0), (0.6, 1.0), (0.5, 1.0), (0.15, 0.0)], true)
}

/// A relative wobble layered onto [`swell`].
fn shaped_swell() -> Result<Envelope> {
    let wobble = Envelope::from_pairs(
        &[(-0.17, 1.0), (0.2, 1.0), (0.1, 1.0), (0.05, 1.0), (-0.1, 0.0)],
        false,
    )?;
    wobble.add(&swell()?)
}

fn phrase() -> Result<Gesture> {
    Ok(Gesture::new(vec![
        Note::new(1.5)
            .with_dynamics(Envelope::constant(0.6, true))
            .with_pitch(8.07)
            .into(),
        Note::new(0.5)
            .with_dynamics(Envelope::constant(0.45, true))
            .with_pitch(8.00)
            .into(),
        Note::new(0.5).with_dynamics(swell()?).with_pitch(7.07).into(),
        Note::new(1.25)
            .with_dynamics(shaped_swell()?)
            .with_pitch(8.00)
            .into(),
    ]))
}

/// The sample song: "Test Song" by "Com Poser".
pub fn demo_song() -> Result<Song> {
    let phrase = phrase()?;
    let pedal = Note::new(3.5)
        .with_dynamics(Envelope::from_pairs(&[(0.5, 1.0), (0.25, 0.0)], true)?)
        .with_articulation(Articulation::Full)
        .with_pitch(7.00);

    let melody = Track::new(MELODY)
        .with_name("Sample Track 1")
        .with_child(Chord::new(vec![phrase.clone().into(), pedal.into()]))
        .with_child(phrase);

    let effects = Track::new(EFFECTS)
        .with_name("Effects for Sample Track 1")
        .with_child(Note::new(15.0).with_dynamics(Envelope::from_pairs(
            &[(0.4, 0.2), (0.25, 0.8), (0.7, 0.0)],
            false,
        )?));

    let group = Group::new("Sample Instrument + Effects")
        .with_track(melody)
        .with_track(effects);

    let section = Section::new("A Section")
        .with_group(group)
        .with_tempo([(0.0, 100.0), (10.0, 80.0)])
        .with_start(4.0);

    Ok(Song::new("Test Song", "Com Poser").with_section(section))
}

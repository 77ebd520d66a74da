//! Tracks, groups, sections and the song.

use serde::{Deserialize, Serialize};

use super::{Element, InstrumentId};
use crate::dynamics::Envelope;

/// A sequence of elements played through one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub instrument: InstrumentId,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Track {
    /// Create an empty track named after its instrument.
    pub fn new(instrument: InstrumentId) -> Self {
        Self {
            name: format!("Instrument #{}", instrument.0),
            instrument,
            start: 0.0,
            dynamics: Envelope::neutral(),
            children: Vec::new(),
        }
    }

    /// Sum of the children's durations.
    pub fn duration(&self) -> f64 {
        self.children.iter().map(Element::duration).sum()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }
}

/// Related tracks that play together, e.g. a melody and its effects track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: 0.0,
            dynamics: Envelope::neutral(),
            tracks: Vec::new(),
        }
    }

    /// The longest track's duration.
    pub fn duration(&self) -> f64 {
        self.tracks.iter().map(Track::duration).fold(0.0, f64::max)
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }
}

/// A tempo mark: from `time` onwards the tempo is `bpm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoPoint {
    pub time: f64,
    pub bpm: f64,
}

impl TempoPoint {
    pub fn new(time: f64, bpm: f64) -> Self {
        Self { time, bpm }
    }
}

/// A thematically related run of groups with its own clock and tempo map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_tempo")]
    pub tempo: Vec<TempoPoint>,
    #[serde(default)]
    pub dynamics: Envelope,
    #[serde(default)]
    pub groups: Vec<Group>,
}

fn default_tempo() -> Vec<TempoPoint> {
    vec![TempoPoint::new(0.0, 60.0)]
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: 0.0,
            tempo: default_tempo(),
            dynamics: Envelope::neutral(),
            groups: Vec::new(),
        }
    }

    /// Sum of the groups' durations; groups follow one another.
    pub fn duration(&self) -> f64 {
        self.groups.iter().map(Group::duration).sum()
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Replace the tempo map.
    pub fn with_tempo(mut self, tempo: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.tempo = tempo
            .into_iter()
            .map(|(time, bpm)| TempoPoint::new(time, bpm))
            .collect();
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn with_dynamics(mut self, dynamics: Envelope) -> Self {
        self.dynamics = dynamics;
        self
    }
}

/// A whole piece: sections played in order, each on its own clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default)]
    pub composer: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Song {
    pub fn new(name: impl Into<String>, composer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            composer: composer.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Chord, Gesture, Note};

    fn melody() -> Track {
        Track::new(InstrumentId(101))
            .with_child(Note::new(1.0))
            .with_child(Gesture::new(vec![Note::new(0.5).into(), Note::new(0.5).into()]))
    }

    #[test]
    fn track_default_name() {
        assert_eq!(Track::new(InstrumentId(102)).name, "Instrument #102");
        assert_eq!(Track::new(InstrumentId(102)).with_name("fx").name, "fx");
    }

    #[test]
    fn track_duration_is_sum() {
        assert_eq!(melody().duration(), 2.0);
    }

    #[test]
    fn group_duration_is_longest_track() {
        let group = Group::new("pair")
            .with_track(melody())
            .with_track(Track::new(InstrumentId(102)).with_child(Note::new(15.0)));
        assert_eq!(group.duration(), 15.0);
    }

    #[test]
    fn section_duration_is_sum_of_groups() {
        let section = Section::new("A")
            .with_group(Group::new("one").with_track(melody()))
            .with_group(
                Group::new("two").with_track(
                    Track::new(InstrumentId(101))
                        .with_child(Chord::new(vec![Note::new(3.0).into()])),
                ),
            );
        assert_eq!(section.duration(), 5.0);
    }

    #[test]
    fn section_default_tempo() {
        let section = Section::new("A");
        assert_eq!(section.tempo, vec![TempoPoint::new(0.0, 60.0)]);
        let section = section.with_tempo([(0.0, 100.0), (10.0, 80.0)]);
        assert_eq!(section.tempo.len(), 2);
        assert_eq!(section.tempo[1], TempoPoint::new(10.0, 80.0));
    }

    #[test]
    fn song_collects_sections() {
        let song = Song::new("Test Song", "Com Poser")
            .with_section(Section::new("A"))
            .with_section(Section::new("B"));
        assert_eq!(song.sections.len(), 2);
        assert_eq!(song.composer, "Com Poser");
    }
}

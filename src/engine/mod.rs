//! Propagation engine — walks the composition tree and emits score events.
//!
//! Start times compose top-down (each node adds its own offset to its
//! parent's position) and durations aggregate bottom-up. Dynamics flow down
//! as well: a relative envelope is layered onto the nearest absolute ancestor
//! with [`Envelope::add`], and sequential containers hand each child the
//! slice of their envelope that the child spans.
//!
//! The walk is a single depth-first, left-to-right pass. It is pure: the only
//! state threaded between siblings is the portamento carry inside a gesture.

mod element;

use crate::composition::{Group, Section, Song, Track};
use crate::dynamics::Envelope;
use crate::error::{Error, Result};
use crate::event::{RenderedSection, Score, ScoreEvent};
use crate::instrument::InstrumentRouter;

use element::{compose, slice_for, TrackSink};

/// Renders songs, sections and tracks through a set of instruments.
pub struct Renderer<'a> {
    router: &'a InstrumentRouter,
}

impl<'a> Renderer<'a> {
    pub fn new(router: &'a InstrumentRouter) -> Self {
        Self { router }
    }

    /// Render every section. Sections do not share a clock.
    pub fn render_song(&self, song: &Song) -> Result<Score> {
        if song.sections.is_empty() {
            return Err(Error::MalformedTree(format!(
                "song '{}' has no sections",
                song.name
            )));
        }
        tracing::debug!("rendering song '{}' ({} sections)", song.name, song.sections.len());

        let sections = song
            .sections
            .iter()
            .map(|section| self.render_section(section))
            .collect::<Result<Vec<_>>>()?;

        Ok(Score {
            name: song.name.clone(),
            composer: song.composer.clone(),
            sections,
        })
    }

    /// Render one section on its own clock, starting at the section's offset.
    ///
    /// Groups follow one another; each receives its slice of the section's
    /// dynamics.
    pub fn render_section(&self, section: &Section) -> Result<RenderedSection> {
        if section.groups.is_empty() {
            return Err(Error::MalformedTree(format!(
                "section '{}' has no groups",
                section.name
            )));
        }
        let total = section.duration();
        if !(total > 0.0) {
            return Err(Error::MalformedTree(format!(
                "section '{}' has zero total duration",
                section.name
            )));
        }
        tracing::debug!(
            "rendering section '{}' ({} groups, duration {})",
            section.name,
            section.groups.len(),
            total
        );

        let dynamics = compose(&section.dynamics, &Envelope::neutral())?;
        let mut events = Vec::new();
        let mut next_track = 0;
        let mut elapsed = 0.0;
        for group in &section.groups {
            let group_duration = group.duration();
            let passed = slice_for(&dynamics, elapsed, group_duration, total)?;
            self.render_group(
                group,
                section.start + elapsed,
                &passed,
                &mut next_track,
                &mut events,
            )?;
            elapsed += group_duration;
        }

        Ok(RenderedSection {
            name: section.name.clone(),
            tempo: section.tempo.clone(),
            duration: total,
            events,
        })
    }

    /// Render a track placed at `start` under `ancestor` dynamics.
    ///
    /// Returned events carry track index 0.
    pub fn render_track(
        &self,
        track: &Track,
        start: f64,
        ancestor: &Envelope,
    ) -> Result<Vec<ScoreEvent>> {
        let mut events = Vec::new();
        self.walk_track(track, start, ancestor, 0, &mut events)?;
        Ok(events)
    }

    fn render_group(
        &self,
        group: &Group,
        start: f64,
        ancestor: &Envelope,
        next_track: &mut usize,
        events: &mut Vec<ScoreEvent>,
    ) -> Result<()> {
        if group.tracks.is_empty() {
            return Err(Error::MalformedTree(format!(
                "group '{}' has no tracks",
                group.name
            )));
        }
        let start = start + group.start;
        let dynamics = compose(&group.dynamics, ancestor)?;
        tracing::debug!("group '{}' at {}", group.name, start);

        for track in &group.tracks {
            self.walk_track(track, start, &dynamics, *next_track, events)?;
            *next_track += 1;
        }
        Ok(())
    }

    fn walk_track(
        &self,
        track: &Track,
        start: f64,
        ancestor: &Envelope,
        index: usize,
        events: &mut Vec<ScoreEvent>,
    ) -> Result<()> {
        if !self.router.contains(track.instrument) {
            return Err(Error::UnknownInstrument(track.instrument));
        }
        if track.children.is_empty() {
            return Err(Error::MalformedTree(format!(
                "track '{}' has no elements",
                track.name
            )));
        }
        let total = track.duration();
        if !(total > 0.0) {
            return Err(Error::MalformedTree(format!(
                "track '{}' has zero total duration",
                track.name
            )));
        }
        let start = start + track.start;
        let dynamics = compose(&track.dynamics, ancestor)?;
        tracing::debug!(
            "track '{}' ({}) at {}, {} elements",
            track.name,
            track.instrument,
            start,
            track.children.len()
        );

        let mut sink = TrackSink {
            router: self.router,
            instrument: track.instrument,
            track: index,
            events,
        };
        let mut elapsed = 0.0;
        for child in &track.children {
            let child_duration = child.duration();
            let passed = slice_for(&dynamics, elapsed, child_duration, total)?;
            // Carry does not cross between a track's top-level elements.
            sink.walk(child, start + elapsed, &passed, None, None)?;
            elapsed += child_duration;
        }
        Ok(())
    }
}

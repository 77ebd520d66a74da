//! Rendering the built-in demo song end to end.

use assert_approx_eq::assert_approx_eq;
use dynarc::config::RenderConfig;
use dynarc::demo::{demo_song, EFFECTS, MELODY};
use dynarc::engine::Renderer;
use dynarc::event::{Score, ScoreEvent};
use dynarc::instrument::InstrumentRouter;

fn render() -> Score {
    let router = InstrumentRouter::from_configs(&RenderConfig::default().instruments);
    Renderer::new(&router).render_song(&demo_song().unwrap()).unwrap()
}

#[test]
fn header_and_tempo_pass_through() {
    let score = render();
    assert_eq!(score.name, "Test Song");
    assert_eq!(score.composer, "Com Poser");
    let section = &score.sections[0];
    assert_eq!(section.name, "A Section");
    let tempo: Vec<(f64, f64)> = section.tempo.iter().map(|t| (t.time, t.bpm)).collect();
    assert_eq!(tempo, vec![(0.0, 100.0), (10.0, 80.0)]);
}

#[test]
fn event_counts_per_track() {
    let score = render();
    let section = &score.sections[0];
    assert_eq!(score.event_count(), 10);
    assert_eq!(section.track_events(0).count(), 9);
    assert_eq!(section.track_events(1).count(), 1);
}

#[test]
fn melody_starts_follow_the_tree() {
    let score = render();
    let starts: Vec<f64> = score.sections[0]
        .track_events(0)
        .map(ScoreEvent::start)
        .collect();
    assert_eq!(
        starts,
        vec![4.0, 5.5, 6.0, 6.5, 4.0, 7.75, 9.25, 9.75, 10.25]
    );
}

#[test]
fn first_events_format() {
    let score = render();
    let events = &score.sections[0].events;
    assert_eq!(events[0].to_string(), "101 4 1.5 0.6 8.07");
    assert_eq!(events[1].to_string(), "101 5.5 0.5 0.45 8");
    assert_eq!(events[4].instrument(), MELODY);
    assert_eq!(events[4].duration(), 3.5);
}

#[test]
fn effects_track_spans_the_section() {
    let score = render();
    let fx = score.sections[0].events.last().unwrap();
    assert_eq!(fx.instrument(), EFFECTS);
    assert_eq!(fx.start(), 4.0);
    assert_eq!(fx.duration(), 15.0);
    assert_approx_eq!(fx.tail()[0], 0.445);
}

#[test]
fn time_order_interleaves_tracks() {
    let score = render();
    let sorted = score.sections[0].sorted_events();
    let starts: Vec<f64> = sorted.iter().map(ScoreEvent::start).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    // Everything at 4.0 keeps emission order: two melody notes, then effects.
    let at_four: Vec<_> = sorted
        .iter()
        .take_while(|e| e.start() == 4.0)
        .map(ScoreEvent::instrument)
        .collect();
    assert_eq!(at_four, vec![MELODY, MELODY, EFFECTS]);
}

#[test]
fn score_serializes_to_yaml() {
    let yaml = serde_yaml::to_string(&render()).unwrap();
    assert!(yaml.contains("Test Song"));
    assert!(yaml.contains("A Section"));
}

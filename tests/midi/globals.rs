use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::{TrackBuilder, notes_of, smf_bytes, tempo_track};

#[test]
fn tempo_map_from_every_track() {
    let tempo = TrackBuilder::new("tempo")
        .tempo(0, 500_000)
        .time_signature(0, 4, 2)
        .time_signature(1920, 6, 3)
        .build();
    let guitar = TrackBuilder::new("PART GUITAR")
        .note(0, 96, 100, 0)
        .tempo(3840, 250_000)
        .build();
    let output = parse_midi(&smf_bytes(vec![tempo, guitar]), &ParseSettings::default())
        .expect("MIDI must be parsed");
    let sync = &output.song.sync;

    assert_eq!(sync.resolution, 480);
    assert_eq!(
        sync.tempos,
        vec![TempoChange::new(0, 120000), TempoChange::new(3840, 240000)]
    );
    assert_eq!(
        sync.time_signatures,
        vec![
            TimeSignatureChange::new(0, 4, 2),
            TimeSignatureChange::new(1920, 6, 3),
        ]
    );
    assert!((sync.tick_to_seconds(4320) - 4.25).abs() < 1e-9);
}

#[test]
fn zero_tempo_is_skipped() {
    let tempo = TrackBuilder::new("tempo").tempo(0, 500_000).tempo(960, 0).build();
    let output = parse_midi(&smf_bytes(vec![tempo]), &ParseSettings::default())
        .expect("MIDI must be parsed");

    assert_eq!(output.song.sync.tempos, vec![TempoChange::new(0, 120000)]);
    assert_eq!(
        output.warnings,
        vec![MidiWarning::Sync(SyncWarning::ZeroTempo { tick: 960 })]
    );
}

#[test]
fn sections_and_events() {
    let events = TrackBuilder::new("EVENTS")
        .text(0, "[section Intro]")
        .text(960, "[prc_chorus_1]")
        .text(1440, "[crowd_clap]")
        .text(1920, "[end]")
        .build();
    let output = parse_midi(
        &smf_bytes(vec![tempo_track(), events]),
        &ParseSettings::default(),
    )
    .expect("MIDI must be parsed");
    let song = &output.song;

    assert_eq!(
        song.sections,
        vec![TextEvent::new(0, "Intro"), TextEvent::new(960, "chorus_1")]
    );
    assert_eq!(
        song.events,
        vec![TextEvent::new(1440, "crowd_clap"), TextEvent::new(1920, "end")]
    );
    assert!(song.charts.is_empty());
}

#[test]
fn later_part_guitar_overrides_t1_gems() {
    let gems = TrackBuilder::new("T1 GEMS").note(0, 96, 100, 0).build();
    let guitar = TrackBuilder::new("PART GUITAR").note(0, 97, 100, 0).build();
    let song = parse_midi(
        &smf_bytes(vec![tempo_track(), gems, guitar]),
        &ParseSettings::default(),
    )
    .expect("MIDI must be parsed")
    .song;

    assert_eq!(
        notes_of(&song, Instrument::Guitar, Difficulty::Expert),
        vec![Note::new(0, GuitarFret::Red.raw(), 0)]
    );
}

#[test]
fn later_t1_gems_is_skipped() {
    let guitar = TrackBuilder::new("PART GUITAR").note(0, 97, 100, 0).build();
    let gems = TrackBuilder::new("T1 GEMS").note(0, 96, 100, 0).build();
    let bass = TrackBuilder::new("PART BASS").note(0, 98, 100, 0).build();
    let second_bass = TrackBuilder::new("part bass").note(0, 99, 100, 0).build();
    let song = parse_midi(
        &smf_bytes(vec![tempo_track(), guitar, gems, bass, second_bass]),
        &ParseSettings::default(),
    )
    .expect("MIDI must be parsed")
    .song;

    assert_eq!(
        notes_of(&song, Instrument::Guitar, Difficulty::Expert),
        vec![Note::new(0, GuitarFret::Red.raw(), 0)]
    );
    assert_eq!(
        notes_of(&song, Instrument::Bass, Difficulty::Expert),
        vec![Note::new(0, GuitarFret::Yellow.raw(), 0)]
    );
}

#[test]
fn unknown_and_excluded_tracks_are_skipped() {
    let venue = TrackBuilder::new("VENUE").note(0, 96, 100, 0).build();
    let beat = TrackBuilder::new("BEAT").note(0, 12, 100, 0).build();
    let other = TrackBuilder::new("PART KAZOO").note(0, 96, 100, 0).build();
    let output = parse_midi(
        &smf_bytes(vec![tempo_track(), venue, beat, other]),
        &ParseSettings::default(),
    )
    .expect("MIDI must be parsed");

    assert!(output.song.charts.is_empty());
    assert_eq!(output.warnings, vec![]);
}

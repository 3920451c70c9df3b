use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::{TrackBuilder, notes_of, parse_with};

const DOUBLE_KICK: u8 = 95;
const KICK: u8 = 96;
const RED: u8 = 97;
const YELLOW: u8 = 98;
const BLUE: u8 = 99;
const ORANGE: u8 = 100;
const GREEN: u8 = 101;
const YELLOW_TOM: u8 = 110;
const DRUM_FILL: u8 = 120;

#[test]
fn cymbals_toms_and_double_kicks() {
    let track = TrackBuilder::new("PART DRUMS")
        .note(0, KICK, 100, 0)
        .note(0, YELLOW, 100, 0)
        .note(480, YELLOW, 100, 0)
        .note(480, YELLOW_TOM, 100, 10)
        .note(960, DOUBLE_KICK, 100, 0)
        .note(960, BLUE, 100, 0)
        .note(960, DRUM_FILL, 100, 480);
    let output = parse_with(track, &ParseSettings::default());
    let song = &output.song;

    assert_eq!(output.warnings, vec![]);
    assert_eq!(
        notes_of(song, Instrument::Drums, Difficulty::Expert),
        vec![
            Note::new(0, DrumPad::Yellow.raw(), 0).with_flags(NoteFlags::CYMBAL),
            Note::new(0, DrumPad::Kick.raw(), 0),
            Note::new(480, DrumPad::Yellow.raw(), 0),
            Note::new(960, DrumPad::Blue.raw(), 0).with_flags(NoteFlags::CYMBAL),
            Note::new(960, DrumPad::Kick.raw(), 0).with_flags(NoteFlags::DOUBLE_KICK),
        ]
    );
    assert_eq!(
        song.chart(Instrument::Drums, Difficulty::Expert)
            .map(|chart| chart.phrases.clone())
            .unwrap_or_default(),
        vec![Phrase::new(960, PhraseKind::DrumFill, 480)]
    );
    assert_eq!(song.drums_type, DrumsType::FourLane);
}

#[test]
fn dynamics_need_the_switch() {
    let notes = |track: TrackBuilder<'static>| {
        let track = track
            .note(0, KICK, 127, 0)
            .note(0, RED, 127, 0)
            .note(480, BLUE, 1, 0)
            .note(960, RED, 64, 0);
        notes_of(
            &parse_with(track, &ParseSettings::default()).song,
            Instrument::Drums,
            Difficulty::Expert,
        )
    };

    assert!(
        notes(TrackBuilder::new("PART DRUMS"))
            .iter()
            .all(|note| !note.flags.intersects(NoteFlags::ACCENT | NoteFlags::GHOST))
    );
    assert_eq!(
        notes(TrackBuilder::new("PART DRUMS").text(0, "[ENABLE_CHART_DYNAMICS]")),
        vec![
            Note::new(0, DrumPad::Red.raw(), 0).with_flags(NoteFlags::ACCENT),
            Note::new(0, DrumPad::Kick.raw(), 0),
            Note::new(480, DrumPad::Blue.raw(), 0)
                .with_flags(NoteFlags::CYMBAL | NoteFlags::GHOST),
            Note::new(960, DrumPad::Red.raw(), 0),
        ]
    );
}

#[test]
fn each_difficulty_has_its_range() {
    let track = TrackBuilder::new("PART DRUMS")
        .note(0, 60, 100, 0)
        .note(0, 73, 100, 0)
        .note(0, 85, 100, 0)
        .note(0, 101, 100, 0);
    let song = parse_with(track, &ParseSettings::default()).song;

    assert_eq!(
        notes_of(&song, Instrument::Drums, Difficulty::Easy),
        vec![Note::new(0, DrumPad::Kick.raw(), 0)]
    );
    assert_eq!(
        notes_of(&song, Instrument::Drums, Difficulty::Medium),
        vec![Note::new(0, DrumPad::Red.raw(), 0)]
    );
    assert_eq!(
        notes_of(&song, Instrument::Drums, Difficulty::Hard),
        vec![Note::new(0, DrumPad::Red.raw(), 0)]
    );
    assert_eq!(
        notes_of(&song, Instrument::Drums, Difficulty::Expert),
        vec![Note::new(0, DrumPad::Green.raw(), 0)]
    );
    assert_eq!(song.drums_type, DrumsType::FiveLane);
}

#[test]
fn default_cymbals_before_green_are_five_lanes() {
    let track = TrackBuilder::new("PART DRUMS")
        .note(0, ORANGE, 100, 0)
        .note(0, YELLOW, 100, 0)
        .note(240, BLUE, 100, 0)
        .note(480, GREEN, 100, 0);
    let song = parse_with(track, &ParseSettings::default()).song;

    assert_eq!(song.drums_type, DrumsType::FiveLane);
}

#[test]
fn cymbals_without_green_are_four_lanes() {
    let track = TrackBuilder::new("PART DRUMS")
        .note(0, ORANGE, 100, 0)
        .note(240, RED, 100, 0);
    let song = parse_with(track, &ParseSettings::default()).song;

    assert_eq!(song.drums_type, DrumsType::FourLane);
}

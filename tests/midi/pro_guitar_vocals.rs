use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::{TrackBuilder, notes_of, parse_with};

#[test]
fn pro_guitar_frets_from_velocity() {
    let track = TrackBuilder::new("PART REAL_GUITAR")
        .note(0, 96, 103, 0)
        .note(0, 101, 100, 0)
        .note_on_channel(3, 480, 97, 105, 0)
        .note(960, 98, 50, 0);
    let output = parse_with(track, &ParseSettings::default());

    assert_eq!(
        notes_of(&output.song, Instrument::ProGuitar17, Difficulty::Expert),
        vec![
            Note::new(0, ProGuitarString::Purple.raw_note(0), 0),
            Note::new(0, ProGuitarString::Red.raw_note(3), 0),
            Note::new(480, ProGuitarString::Green.raw_note(5), 0).with_flags(NoteFlags::MUTED),
        ]
    );
    assert_eq!(
        output.warnings,
        vec![MidiWarning::InvalidProGuitarVelocity {
            tick: 960,
            velocity: 50
        }]
    );
}

#[test]
fn pro_bass_22_track() {
    let track = TrackBuilder::new("PART REAL_BASS_22").note(0, 24, 112, 0);
    let song = parse_with(track, &ParseSettings::default()).song;

    assert_eq!(
        notes_of(&song, Instrument::ProBass22, Difficulty::Easy),
        vec![Note::new(0, ProGuitarString::Red.raw_note(12), 0)]
    );
}

#[test]
fn vocals_notes_phrases_and_lyrics() {
    let track = TrackBuilder::new("PART VOCALS")
        .note(0, 105, 100, 960)
        .note(0, 60, 100, 240)
        .lyric(0, "Hel-")
        .note(480, 62, 100, 240)
        .lyric(480, "lo")
        .note(720, 96, 100, 0)
        .text(720, "[tambourine_start]");
    let output = parse_with(track, &ParseSettings::default());
    let song = &output.song;

    let expected_notes = vec![
        Note::new(0, 60, 240),
        Note::new(480, 62, 240),
        Note::new(720, 0, 0).with_flags(NoteFlags::PERCUSSION),
    ];
    for difficulty in Difficulty::ALL {
        assert_eq!(notes_of(song, Instrument::Vocals, difficulty), expected_notes);
    }
    let phrases = song
        .chart(Instrument::Vocals, Difficulty::Expert)
        .map(|chart| chart.phrases.clone())
        .unwrap_or_default();
    assert_eq!(
        phrases,
        vec![
            Phrase::new(0, PhraseKind::VersusPlayer1, 960),
            Phrase::new(0, PhraseKind::LyricPhrase, 960),
        ]
    );
    assert_eq!(
        song.events,
        vec![
            TextEvent::new(0, "lyric Hel-"),
            TextEvent::new(0, "phrase_start"),
            TextEvent::new(480, "lyric lo"),
            TextEvent::new(960, "phrase_end"),
        ]
    );
}

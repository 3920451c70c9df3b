use chart_rs::prelude::*;
use midly::{Format, Fps, Header, Smf, Timing};
use pretty_assertions::assert_eq;

use super::{TrackBuilder, parse_with};

#[test]
fn garbage_is_malformed() {
    let result = parse_midi(b"MThd garbage", &ParseSettings::default());

    assert!(matches!(result, Err(MidiError::Malformed(_))));
}

#[test]
fn no_tracks() {
    // The header chunk alone, declaring zero tracks at 480 ticks per quarter note.
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 0, 0x01, 0xE0,
    ];

    assert_eq!(
        parse_midi(&bytes, &ParseSettings::default()),
        Err(MidiError::NoTracks)
    );
}

#[test]
fn timecode_is_unsupported() {
    let smf = Smf {
        header: Header::new(Format::Parallel, Timing::Timecode(Fps::Fps30, 80)),
        tracks: vec![TrackBuilder::new("PART GUITAR").note(0, 96, 100, 0).build()],
    };
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).expect("SMF must be written");

    assert_eq!(
        parse_midi(&bytes, &ParseSettings::default()),
        Err(MidiError::UnsupportedTiming)
    );
}

#[test]
fn unmatched_and_duplicate_notes() {
    let track = TrackBuilder::new("PART GUITAR")
        .note_off(0, 97)
        .note(480, 96, 100, 480)
        .note(600, 96, 100, 0);
    let output = parse_with(track, &ParseSettings::default());

    assert_eq!(
        output.warnings,
        vec![
            MidiWarning::UnmatchedNoteOff {
                tick: 0,
                key: 97,
                channel: 0
            },
            MidiWarning::DuplicateNoteOn {
                tick: 600,
                key: 96,
                channel: 0
            },
            MidiWarning::UnmatchedNoteOff {
                tick: 960,
                key: 96,
                channel: 0
            },
        ]
    );
}

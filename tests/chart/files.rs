use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::parse_clean;

#[test]
fn basic_file_metadata_and_globals() {
    let song = parse_clean(include_str!("files/basic.chart"));

    assert_eq!(song.metadata.name.as_deref(), Some("Sample Song"));
    assert_eq!(song.metadata.artist.as_deref(), Some("Sample Band"));
    assert_eq!(song.metadata.year.as_deref(), Some("2008"));
    assert_eq!(song.metadata.genre.as_deref(), Some("rock"));
    assert_eq!(song.metadata.difficulty, Some(4));
    assert_eq!(song.sync.resolution, 192);
    assert_eq!(
        song.sync.tempos,
        vec![TempoChange::new(0, 120000), TempoChange::new(768, 90000)]
    );
    assert_eq!(
        song.sync.time_signatures,
        vec![
            TimeSignatureChange::new(0, 4, 2),
            TimeSignatureChange::new(768, 3, 2),
        ]
    );
    assert_eq!(
        song.sections,
        vec![TextEvent::new(0, "Intro"), TextEvent::new(768, "Verse 1")]
    );
    assert_eq!(song.events, vec![TextEvent::new(1536, "end")]);
}

#[test]
fn basic_file_guitar() {
    let song = parse_clean(include_str!("files/basic.chart"));
    let chart = song
        .chart(Instrument::Guitar, Difficulty::Expert)
        .expect("guitar chart must exist");

    assert_eq!(
        chart.notes,
        vec![
            Note::new(0, GuitarFret::Green.raw(), 0),
            Note::new(0, GuitarFret::Red.raw(), 0),
            Note::new(192, GuitarFret::Yellow.raw(), 96).with_flags(NoteFlags::FORCED),
            Note::new(384, GuitarFret::Open.raw(), 0),
            Note::new(576, GuitarFret::Blue.raw(), 0).with_flags(NoteFlags::TAP),
            Note::new(768, GuitarFret::Orange.raw(), 192),
        ]
    );
    assert_eq!(
        chart.phrases,
        vec![
            Phrase::new(384, PhraseKind::Solo, 576),
            Phrase::new(768, PhraseKind::Starpower, 384),
        ]
    );
    assert!(chart.events.is_empty());
}

#[test]
fn basic_file_drums() {
    let song = parse_clean(include_str!("files/basic.chart"));
    let chart = song
        .chart(Instrument::Drums, Difficulty::Expert)
        .expect("drums chart must exist");

    assert_eq!(
        chart.notes,
        vec![
            Note::new(0, DrumPad::Yellow.raw(), 0).with_flags(NoteFlags::CYMBAL),
            Note::new(0, DrumPad::Kick.raw(), 0),
            Note::new(192, DrumPad::Red.raw(), 0).with_flags(NoteFlags::ACCENT),
            Note::new(384, DrumPad::Blue.raw(), 0).with_flags(NoteFlags::GHOST),
            Note::new(384, DrumPad::Kick.raw(), 0).with_flags(NoteFlags::DOUBLE_KICK),
        ]
    );
    assert_eq!(chart.phrases, vec![Phrase::new(576, PhraseKind::DrumFill, 192)]);
    assert_eq!(song.drums_type, DrumsType::FourLane);
    assert_eq!(song.charts_of(Instrument::Drums).count(), 1);
}

#[test]
fn basic_file_length() {
    let song = parse_clean(include_str!("files/basic.chart"));

    assert_eq!(song.last_tick(), 1536);
    // 768 ticks at 120 BPM, then 768 ticks at 90 BPM.
    let expected = 2.0 + 4.0 * 60.0 / 90.0;
    assert!((song.length_seconds() - expected).abs() < 1e-9);
}

#[test]
fn bytes_with_utf8_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(include_bytes!("files/basic.chart"));
    let output = parse_chart_bytes(&bytes, &ParseSettings::default()).expect("bytes must be parsed");

    assert_eq!(output.warnings, vec![]);
    assert_eq!(output.song.metadata.name.as_deref(), Some("Sample Song"));
}

#[test]
fn invalid_resolution_is_fatal() {
    let source = "[Song]\n{\n  Resolution = 0\n}\n";

    assert_eq!(
        parse_chart(source, &ParseSettings::default()),
        Err(ChartError::InvalidResolution {
            value: "0".to_string()
        })
    );
}

use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::{expert_single, parse_clean, track_source};

const FIVE_FRETS_AND_OPEN: [u32; 6] = [0, 1, 2, 3, 4, 7];

fn guitar_notes(song: &Song) -> &[Note] {
    song.chart(Instrument::Guitar, Difficulty::Expert)
        .map(|chart| chart.notes.as_slice())
        .unwrap_or_default()
}

#[test]
fn forced_code_applies_to_its_tick_only() {
    let mut lines = Vec::new();
    for (i, code) in FIVE_FRETS_AND_OPEN.iter().enumerate() {
        lines.push(format!("{} = N {code} 0", i * 192));
    }
    for (i, code) in FIVE_FRETS_AND_OPEN.iter().enumerate() {
        let tick = (i + 6) * 192;
        lines.push(format!("{tick} = N {code} 0"));
        lines.push(format!("{tick} = N 5 0"));
    }
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    let song = parse_clean(&expert_single(&lines));
    let notes = guitar_notes(&song);

    assert_eq!(notes.len(), 12);
    let (plain, forced) = notes.split_at(6);
    assert!(plain.iter().all(|note| note.flags == NoteFlags::NONE));
    assert!(forced.iter().all(|note| note.flags == NoteFlags::FORCED));
    assert!(notes.iter().all(|note| note.length == 0));
    assert_eq!(
        notes.iter().map(|note| note.raw).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]
    );
}

#[test]
fn flag_before_note_still_applies() {
    let song = parse_clean(&expert_single(&["0 = N 5 0", "0 = N 0 0", "0 = N 1 0"]));

    assert_eq!(
        guitar_notes(&song),
        &[
            Note::new(0, GuitarFret::Green.raw(), 0).with_flags(NoteFlags::FORCED),
            Note::new(0, GuitarFret::Red.raw(), 0).with_flags(NoteFlags::FORCED),
        ]
    );
}

#[test]
fn tap_wins_over_forced_in_any_order() {
    let tap_first = ["0 = N 0 0", "0 = N 6 0", "0 = N 5 0"];
    let forced_first = ["0 = N 0 0", "0 = N 5 0", "0 = N 6 0"];

    let output = parse_chart(&expert_single(&tap_first), &ParseSettings::default())
        .expect("source must be parsed");
    assert_eq!(
        guitar_notes(&output.song),
        &[Note::new(0, 0, 0).with_flags(NoteFlags::TAP)]
    );
    assert_eq!(
        output.warnings,
        vec![ChartWarning::Resolve(ResolveWarning::FlagBlocked {
            tick: 0,
            raw: 0,
            flag: NoteFlags::FORCED,
            blocker: NoteFlags::TAP,
        })]
    );

    let song = parse_clean(&expert_single(&forced_first));
    assert_eq!(
        guitar_notes(&song),
        &[Note::new(0, 0, 0).with_flags(NoteFlags::TAP)]
    );
}

#[test]
fn accent_wins_over_ghost_in_any_order() {
    for lines in [
        ["0 = N 1 0", "0 = N 34 0", "0 = N 40 0"],
        ["0 = N 1 0", "0 = N 40 0", "0 = N 34 0"],
    ] {
        let output = parse_chart(
            &track_source("ExpertDrums", &lines),
            &ParseSettings::default(),
        )
        .expect("source must be parsed");
        let notes = output
            .song
            .chart(Instrument::Drums, Difficulty::Expert)
            .map(|chart| chart.notes.clone())
            .unwrap_or_default();
        assert_eq!(
            notes,
            vec![Note::new(0, DrumPad::Red.raw(), 0).with_flags(NoteFlags::ACCENT)]
        );
    }
}

#[test]
fn drum_toggles_target_their_pad() {
    let song = parse_clean(&track_source(
        "ExpertDrums",
        &["0 = N 2 0", "0 = N 3 0", "0 = N 67 0", "0 = N 68 0"],
    ));
    let notes = song
        .chart(Instrument::Drums, Difficulty::Expert)
        .map(|chart| chart.notes.clone())
        .unwrap_or_default();

    assert_eq!(
        notes,
        vec![
            Note::new(0, DrumPad::Yellow.raw(), 0),
            Note::new(0, DrumPad::Blue.raw(), 0).with_flags(NoteFlags::CYMBAL),
        ]
    );
}

#[test]
fn ghl_codes_and_flags() {
    let song = parse_clean(&track_source(
        "ExpertGHLGuitar",
        &["0 = N 3 0", "0 = N 8 0", "0 = N 5 0", "192 = N 7 48"],
    ));
    let notes = song
        .chart(Instrument::GhlGuitar, Difficulty::Expert)
        .map(|chart| chart.notes.clone())
        .unwrap_or_default();

    assert_eq!(
        notes,
        vec![
            Note::new(0, GhlFret::Black1.raw(), 0).with_flags(NoteFlags::FORCED),
            Note::new(0, GhlFret::Black3.raw(), 0).with_flags(NoteFlags::FORCED),
            Note::new(192, GhlFret::Open.raw(), 48),
        ]
    );
}

#[test]
fn flag_without_note_changes_nothing() {
    let song = parse_clean(&expert_single(&["0 = N 0 0", "96 = N 5 0"]));

    assert_eq!(guitar_notes(&song), &[Note::new(0, 0, 0)]);
}

#[test]
fn malformed_lines_are_skipped() {
    let source = expert_single(&["0 = N 0 0", "x = N 1 0", "96 = N", "192 = Q 1 0", "288 = N 2 0"]);
    let output = parse_chart(&source, &ParseSettings::default()).expect("source must be parsed");

    assert_eq!(
        guitar_notes(&output.song),
        &[Note::new(0, 0, 0), Note::new(288, 2, 0)]
    );
    assert_eq!(output.warnings.len(), 3);
    assert!(
        output
            .warnings
            .iter()
            .all(|warning| matches!(warning, ChartWarning::Lex(_)))
    );
}

use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

fn base_song() -> Song {
    let mut song = Song {
        offset: 0.25,
        metadata: Metadata {
            name: Some("Roundtrip".to_string()),
            artist: Some("Nobody".to_string()),
            charter: Some("Somebody".to_string()),
            album: Some("Tests".to_string()),
            genre: Some("metal".to_string()),
            year: Some("2011".to_string()),
            difficulty: Some(3),
            preview_start: 12.5,
            preview_end: 30.0,
            manual_length: Some(200.5),
        },
        sync: SyncTrack::new(480),
        ..Song::default()
    };
    song.sync.tempos = vec![
        TempoChange::new(0, 120000),
        TempoChange {
            tick: 1920,
            milli_bpm: 150000,
            anchor: Some(2_100_000),
        },
    ];
    song.sync.time_signatures = vec![
        TimeSignatureChange::new(0, 4, 2),
        TimeSignatureChange::new(1920, 7, 3),
    ];
    song.sync.finalize();
    song.sections = vec![TextEvent::new(0, "Intro"), TextEvent::new(1920, "Chorus")];
    song.events = vec![TextEvent::new(960, "crowd_clap"), TextEvent::new(3840, "end")];
    song
}

fn assert_roundtrip(mut song: Song) {
    for chart in song.charts.values_mut() {
        chart.sort_canonical();
    }
    let text = write_chart(&song);
    let ChartOutput {
        song: reparsed,
        warnings,
    } = parse_chart(&text, &ParseSettings::default()).expect("written chart must be parsed");

    assert_eq!(warnings, vec![]);
    assert_eq!(reparsed, song);
}

#[test]
fn guitar_song() {
    let mut song = base_song();
    let chart = song.chart_mut(Instrument::Guitar, Difficulty::Expert);
    chart.notes = vec![
        Note::new(0, GuitarFret::Green.raw(), 240),
        Note::new(480, GuitarFret::Red.raw(), 0).with_flags(NoteFlags::FORCED),
        Note::new(480, GuitarFret::Blue.raw(), 0).with_flags(NoteFlags::FORCED),
        Note::new(960, GuitarFret::Open.raw(), 0).with_flags(NoteFlags::TAP),
        Note::new(1440, GuitarFret::Orange.raw(), 960),
    ];
    chart.phrases = vec![
        Phrase::new(0, PhraseKind::Starpower, 960),
        Phrase::new(480, PhraseKind::Solo, 1440),
        Phrase::new(1920, PhraseKind::VersusPlayer2, 480),
    ];
    chart.events = vec![TextEvent::new(1440, "practice marker")];
    song.chart_mut(Instrument::Bass, Difficulty::Easy).notes =
        vec![Note::new(0, GuitarFret::Yellow.raw(), 0)];

    assert_roundtrip(song);
}

#[test]
fn ghl_song() {
    let mut song = base_song();
    let chart = song.chart_mut(Instrument::GhlBass, Difficulty::Hard);
    chart.notes = vec![
        Note::new(0, GhlFret::Black1.raw(), 0),
        Note::new(0, GhlFret::White1.raw(), 0),
        Note::new(240, GhlFret::Black3.raw(), 0).with_flags(NoteFlags::FORCED),
        Note::new(480, GhlFret::White3.raw(), 120).with_flags(NoteFlags::TAP),
        Note::new(960, GhlFret::Open.raw(), 480),
    ];
    chart.phrases = vec![Phrase::new(0, PhraseKind::Starpower, 480)];

    assert_roundtrip(song);
}

#[test]
fn drums_song() {
    let mut song = base_song();
    song.drums_type = DrumsType::FourLane;
    let chart = song.chart_mut(Instrument::Drums, Difficulty::Expert);
    chart.notes = vec![
        Note::new(0, DrumPad::Yellow.raw(), 0).with_flags(NoteFlags::CYMBAL),
        Note::new(0, DrumPad::Kick.raw(), 0).with_flags(NoteFlags::DOUBLE_KICK),
        Note::new(240, DrumPad::Red.raw(), 0).with_flags(NoteFlags::ACCENT),
        Note::new(240, DrumPad::Blue.raw(), 0)
            .with_flags(NoteFlags::GHOST | NoteFlags::CYMBAL),
        Note::new(480, DrumPad::Orange.raw(), 0).with_flags(NoteFlags::CYMBAL),
        Note::new(480, DrumPad::Kick.raw(), 0),
        Note::new(720, DrumPad::Green.raw(), 0),
    ];
    chart.phrases = vec![
        Phrase::new(0, PhraseKind::Starpower, 960),
        Phrase::new(0, PhraseKind::VersusPlayer1, 480),
        Phrase::new(480, PhraseKind::DrumFill, 240),
        Phrase::new(960, PhraseKind::TremoloLane, 240),
        Phrase::new(1440, PhraseKind::TrillLane, 240),
    ];

    assert_roundtrip(song);
}

#[test]
fn unrecognized_sections_are_kept() {
    let mut song = base_song();
    song.unrecognized_charts = vec![UnrecognizedChart {
        name: "ExpertKazoo".to_string(),
        notes: vec![Note::new(0, 12, 5), Note::new(96, 3, 0)],
        events: vec![TextEvent::new(96, "hello there")],
    }];

    assert_roundtrip(song);
}

#[test]
fn pro_guitar_is_not_written() {
    let mut song = base_song();
    song.chart_mut(Instrument::ProGuitar17, Difficulty::Expert).notes =
        vec![Note::new(0, ProGuitarString::Red.raw_note(3), 0)];

    let text = write_chart(&song);
    let reparsed = parse_chart(&text, &ParseSettings::default())
        .expect("written chart must be parsed")
        .song;

    assert!(reparsed.charts.is_empty());
    assert_eq!(reparsed.sections, song.sections);
}

//! Writing a [`Song`] back into the text chart format.
//!
//! The output reads back into an equal song for the instruments having a text format. Pro guitar
//! and vocals charts are not written, nor are phrases without a code in the game mode.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display, Formatter},
};

use super::{
    EVENTS_SECTION, SONG_SECTION, SYNC_TRACK_SECTION,
    sync_section::SECTION_PREFIX,
    table::{
        ACCENT_OFFSET, CYMBAL_OFFSET, DOUBLE_KICK_CODE, FORCED_CODE, GHOST_OFFSET, TAP_CODE,
        note_code, phrase_code, section_name,
    },
};
use crate::{
    model::{Chart, DrumPad, GameMode, NoteFlags, PhraseKind, Song, Tick, UnrecognizedChart},
    resolve::solo::{SOLO_END, SOLO_START},
};

/// Writes a song as a chart file.
#[must_use]
pub fn write_chart(song: &Song) -> String {
    ChartWriter::new(song).to_string()
}

/// A [`Display`] adapter writing a song as a chart file.
#[derive(Debug, Clone, Copy)]
pub struct ChartWriter<'a> {
    song: &'a Song,
}

impl<'a> ChartWriter<'a> {
    /// Creates a writer for the song.
    #[must_use]
    pub const fn new(song: &'a Song) -> Self {
        Self { song }
    }

    fn write_song_section(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let song = self.song;
        let meta = &song.metadata;
        writeln!(f, "[{SONG_SECTION}]\n{{")?;
        let quoted = [
            ("Name", &meta.name),
            ("Artist", &meta.artist),
            ("Charter", &meta.charter),
            ("Album", &meta.album),
            ("Year", &meta.year),
        ];
        for (key, value) in quoted {
            if let Some(value) = value {
                writeln!(f, "  {key} = \"{value}\"")?;
            }
        }
        writeln!(f, "  Offset = {}", song.offset)?;
        writeln!(f, "  Resolution = {}", song.sync.resolution)?;
        if let Some(difficulty) = meta.difficulty {
            writeln!(f, "  Difficulty = {difficulty}")?;
        }
        writeln!(f, "  PreviewStart = {}", meta.preview_start)?;
        writeln!(f, "  PreviewEnd = {}", meta.preview_end)?;
        if let Some(genre) = &meta.genre {
            writeln!(f, "  Genre = \"{genre}\"")?;
        }
        if let Some(length) = meta.manual_length {
            writeln!(f, "  Length = {length}")?;
        }
        writeln!(f, "}}")
    }

    fn write_sync_section(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sync = &self.song.sync;
        let mut lines = TickLines::default();
        for sig in &sync.time_signatures {
            if sig.denominator_exp == 2 {
                lines.push(sig.tick, format!("TS {}", sig.numerator));
            } else {
                lines.push(
                    sig.tick,
                    format!("TS {} {}", sig.numerator, sig.denominator_exp),
                );
            }
        }
        for tempo in &sync.tempos {
            if let Some(anchor) = tempo.anchor {
                lines.push(tempo.tick, format!("A {anchor}"));
            }
            lines.push(tempo.tick, format!("B {}", tempo.milli_bpm));
        }
        lines.write_section(f, SYNC_TRACK_SECTION)
    }

    fn write_events_section(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = TickLines::default();
        for section in &self.song.sections {
            lines.push(
                section.tick,
                format!("E \"{SECTION_PREFIX}{}\"", section.text),
            );
        }
        for event in &self.song.events {
            lines.push(event.tick, format!("E \"{}\"", event.text));
        }
        lines.write_section(f, EVENTS_SECTION)
    }
}

impl Display for ChartWriter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_song_section(f)?;
        self.write_sync_section(f)?;
        self.write_events_section(f)?;
        for chart in self.song.charts.values() {
            let Some(name) = section_name(chart.instrument, chart.difficulty) else {
                log::debug!(
                    "skipping {} {} chart without a text format",
                    chart.difficulty,
                    chart.instrument
                );
                continue;
            };
            if chart.is_empty() {
                continue;
            }
            track_lines(chart).write_section(f, &name)?;
        }
        for chart in &self.song.unrecognized_charts {
            unrecognized_lines(chart).write_section(f, &chart.name)?;
        }
        Ok(())
    }
}

/// Lines of a section body, grouped by tick.
#[derive(Debug, Default)]
struct TickLines {
    lines: BTreeMap<Tick, Vec<String>>,
}

impl TickLines {
    fn push(&mut self, tick: Tick, line: String) {
        self.lines.entry(tick).or_default().push(line);
    }

    fn write_section(&self, f: &mut Formatter<'_>, name: &str) -> fmt::Result {
        writeln!(f, "[{name}]\n{{")?;
        for (tick, lines) in &self.lines {
            for line in lines {
                writeln!(f, "  {tick} = {line}")?;
            }
        }
        writeln!(f, "}}")
    }
}

fn track_lines(chart: &Chart) -> TickLines {
    let mode = chart.game_mode();
    let mut lines = TickLines::default();
    let mut chord_flags: BTreeSet<(Tick, u32)> = BTreeSet::new();
    for note in &chart.notes {
        let Some(code) = note_code(mode, note.raw) else {
            log::debug!("skipping note {} without a code in {mode}", note.raw);
            continue;
        };
        let code = if mode == GameMode::Drums && note.flags.contains(NoteFlags::DOUBLE_KICK) {
            DOUBLE_KICK_CODE
        } else {
            code
        };
        lines.push(note.tick, format!("N {code} {}", note.length));

        match mode {
            GameMode::Guitar | GameMode::GhlGuitar => {
                for (flag, flag_code) in [(NoteFlags::FORCED, FORCED_CODE), (NoteFlags::TAP, TAP_CODE)] {
                    if note.flags.contains(flag) && chord_flags.insert((note.tick, flag_code)) {
                        lines.push(note.tick, format!("N {flag_code} 0"));
                    }
                }
            }
            GameMode::Drums if note.raw != DrumPad::Kick.raw() => {
                let toggles = [
                    (NoteFlags::CYMBAL, CYMBAL_OFFSET),
                    (NoteFlags::ACCENT, ACCENT_OFFSET),
                    (NoteFlags::GHOST, GHOST_OFFSET),
                ];
                for (flag, offset) in toggles {
                    if note.flags.contains(flag) {
                        lines.push(note.tick, format!("N {} 0", offset + code));
                    }
                }
            }
            _ => {}
        }
    }
    for phrase in &chart.phrases {
        if phrase.kind == PhraseKind::Solo {
            lines.push(phrase.tick, format!("E {SOLO_START}"));
            lines.push(phrase.end_tick(), format!("E {SOLO_END}"));
            continue;
        }
        match phrase_code(mode, phrase.kind) {
            Some(code) => lines.push(phrase.tick, format!("S {code} {}", phrase.length)),
            None => log::debug!("skipping {} phrase without a code in {mode}", phrase.kind),
        }
    }
    for event in &chart.events {
        lines.push(event.tick, format!("E {}", event.text));
    }
    lines
}

fn unrecognized_lines(chart: &UnrecognizedChart) -> TickLines {
    let mut lines = TickLines::default();
    for note in &chart.notes {
        lines.push(note.tick, format!("N {} {}", note.raw, note.length));
    }
    for event in &chart.events {
        lines.push(event.tick, format!("E {}", event.text));
    }
    lines
}

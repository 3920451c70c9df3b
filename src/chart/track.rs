//! Reading the lines of a chart section into notes, phrases, events and queued flags.

use super::{
    LexWarningWithRange,
    line::{LineBody, parse_line},
    section::RawSection,
    table::{NoteAction, note_action, phrase_kind},
};
use crate::{
    model::{Chart, Note, Phrase, TextEvent, UnrecognizedChart},
    resolve::DeferredFlag,
};

/// Reads a chart section, appending to `chart` and `queue`.
///
/// Notes are added unsorted and flag codes are queued, for [`crate::resolve::resolve_chart`] to
/// apply once every section of the chart is read.
pub fn parse_track(
    section: &RawSection<'_>,
    chart: &mut Chart,
    queue: &mut Vec<DeferredFlag>,
    warnings: &mut Vec<LexWarningWithRange>,
) {
    let mode = chart.game_mode();
    for line in &section.lines {
        let parsed = match parse_line(line) {
            Ok(parsed) => parsed,
            Err(warning) => {
                log::warn!("{warning}");
                warnings.push(warning);
                continue;
            }
        };
        let tick = parsed.tick;
        match parsed.body {
            LineBody::Note { code, length } => match note_action(mode, code) {
                Some(NoteAction::Note { raw, flags }) => {
                    chart
                        .notes
                        .push(Note::new(tick, raw, length).with_flags(flags));
                }
                Some(NoteAction::ChordFlag { flag }) => queue.push(DeferredFlag::chord(tick, flag)),
                Some(NoteAction::ToggleFlag { raw, flag }) => {
                    queue.push(DeferredFlag::raw(tick, raw, flag));
                }
                None => log::debug!("dropping note code {code} in {}", section.name),
            },
            LineBody::Special { code, length } => match phrase_kind(mode, code) {
                Some(kind) => chart.phrases.push(Phrase::new(tick, kind, length)),
                None => log::debug!("dropping phrase code {code} in {}", section.name),
            },
            LineBody::Event(text) => chart.events.push(TextEvent::new(tick, text)),
            LineBody::Tempo(_) | LineBody::TimeSignature { .. } | LineBody::Anchor(_) => {
                log::debug!("dropping sync line at tick {tick} in {}", section.name);
            }
        }
    }
}

/// Reads a chart section with an unknown name, keeping the note codes as raw indices.
#[must_use]
pub fn parse_unrecognized(
    section: &RawSection<'_>,
    warnings: &mut Vec<LexWarningWithRange>,
) -> UnrecognizedChart {
    let mut chart = UnrecognizedChart {
        name: section.name.to_string(),
        notes: Vec::new(),
        events: Vec::new(),
    };
    for line in &section.lines {
        match parse_line(line) {
            Ok(parsed) => match parsed.body {
                LineBody::Note { code, length } => {
                    chart.notes.push(Note::new(parsed.tick, code, length));
                }
                LineBody::Event(text) => chart.events.push(TextEvent::new(parsed.tick, text)),
                _ => {}
            },
            Err(warning) => {
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }
    chart
}

//! Reading the `[SyncTrack]` and `[Events]` sections, the song-wide timed lines.

use super::{
    LexWarningWithRange,
    line::{LineBody, parse_line},
    section::RawSection,
};
use crate::model::{
    Song, SyncWarning, TempoChange, TextEvent, Tick, TimeSignatureChange, sync::DEFAULT_MILLI_BPM,
};

/// The prefix of the global events naming a section of the song.
pub const SECTION_PREFIX: &str = "section ";

/// Reads a global section into `song`. Both sections accept every global line type.
///
/// Anchors are collected into `anchors`, to be attached by [`finalize_sync`] once every tempo is
/// known.
pub fn parse_global_section(
    section: &RawSection<'_>,
    song: &mut Song,
    anchors: &mut Vec<(Tick, u64)>,
    warnings: &mut Vec<LexWarningWithRange>,
    sync_warnings: &mut Vec<SyncWarning>,
) {
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
            LineBody::Tempo(0) => {
                let warning = SyncWarning::ZeroTempo { tick };
                log::warn!("{warning}");
                sync_warnings.push(warning);
            }
            LineBody::Tempo(milli_bpm) => song.sync.tempos.push(TempoChange::new(tick, milli_bpm)),
            LineBody::TimeSignature {
                numerator,
                denominator_exp,
            } => song
                .sync
                .time_signatures
                .push(TimeSignatureChange::new(tick, numerator, denominator_exp)),
            LineBody::Anchor(micros) => anchors.push((tick, micros)),
            LineBody::Event(text) => match text.strip_prefix(SECTION_PREFIX) {
                Some(name) => song.sections.push(TextEvent::new(tick, name.trim())),
                None => song.events.push(TextEvent::new(tick, text)),
            },
            LineBody::Note { .. } | LineBody::Special { .. } => {
                log::debug!("dropping chart line at tick {tick} in {}", section.name);
            }
        }
    }
}

/// Finalizes the sync track and attaches the anchors.
///
/// An anchor on a tick without a tempo change adds one carrying the tempo in effect there.
pub fn finalize_sync(song: &mut Song, anchors: Vec<(Tick, u64)>) {
    let sync = &mut song.sync;
    sync.finalize();
    for (tick, micros) in anchors {
        let index = sync.tempos.partition_point(|tempo| tempo.tick < tick);
        if sync.tempos.get(index).is_some_and(|tempo| tempo.tick == tick) {
            if let Some(tempo) = sync.tempos.get_mut(index) {
                tempo.anchor = Some(micros);
            }
            continue;
        }
        let milli_bpm = sync
            .tempo_at(tick)
            .map_or(DEFAULT_MILLI_BPM, |tempo| tempo.milli_bpm);
        sync.tempos.insert(
            index,
            TempoChange {
                tick,
                milli_bpm,
                anchor: Some(micros),
            },
        );
    }
}

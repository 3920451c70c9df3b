//! The reader of Standard MIDI Files (`.mid`) authored for rhythm games.
//!
//! Every instrument has a track named after it, such as `PART GUITAR`, holding the notes of all
//! difficulties on separate note ranges. The tempo map is read from every track, and the `EVENTS`
//! track holds the global events and sections.
//!
//! ```
//! use chart_rs::{midi::{MidiError, parse_midi}, settings::ParseSettings};
//!
//! assert!(matches!(
//!     parse_midi(b"not a midi file", &ParseSettings::default()),
//!     Err(MidiError::Malformed(_))
//! ));
//! ```

pub mod table;
pub mod track;

use std::{borrow::Cow, collections::BTreeMap};

use midly::{MetaMessage, MidiMessage, Smf, Timing, Track, TrackEventKind};
use thiserror::Error;

use crate::{
    model::{
        Chart, Instrument, Song, SyncTrack, SyncWarning, TempoChange, TextEvent, Tick,
        TimeSignatureChange,
    },
    resolve::{self, Detection, ResolveWarning},
    settings::ParseSettings,
};

use self::{
    table::{TrackKind, TrackPriority, VOCALS_TRACK},
    track::TrackReader,
};

/// A problem which stops the parse of a MIDI file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MidiError {
    /// The bytes are not a Standard MIDI File.
    #[error("malformed MIDI file: {0}")]
    Malformed(String),
    /// The file has no track.
    #[error("the MIDI file has no track")]
    NoTracks,
    /// The file counts time in SMPTE frames instead of ticks per quarter note.
    #[error("the MIDI file has no beat resolution")]
    UnsupportedTiming,
}

/// A recoverable problem found while reading a MIDI file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MidiWarning {
    /// A note-off had no note-on to close.
    #[error("note off {key} on channel {channel} at tick {tick} has no note on")]
    UnmatchedNoteOff {
        /// Where the note-off is.
        tick: Tick,
        /// The note number.
        key: u8,
        /// The channel.
        channel: u8,
    },
    /// A note-on came while the same note was held, and was ignored.
    #[error("note on {key} on channel {channel} at tick {tick} while the note is held")]
    DuplicateNoteOn {
        /// Where the ignored note-on is.
        tick: Tick,
        /// The note number.
        key: u8,
        /// The channel.
        channel: u8,
    },
    /// A pro guitar note had a velocity below the fret range, and was dropped.
    #[error("pro guitar note at tick {tick} has invalid fret velocity {velocity}")]
    InvalidProGuitarVelocity {
        /// Where the note is.
        tick: Tick,
        /// The velocity as written.
        velocity: u8,
    },
    /// A problem in the tempo map.
    #[error(transparent)]
    Sync(#[from] SyncWarning),
    /// A problem while resolving the flags or the solos of a chart.
    #[error(transparent)]
    Resolve(#[from] ResolveWarning),
}

/// The result of reading a MIDI file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct MidiOutput {
    /// The song read.
    pub song: Song,
    /// The problems found.
    pub warnings: Vec<MidiWarning>,
}

const MICROS_PER_MINUTE_MILLI: u64 = 60_000_000_000;
const LYRIC_PREFIX: &str = "lyric ";
const PHRASE_START: &str = "phrase_start";
const PHRASE_END: &str = "phrase_end";
const SECTION_PREFIXES: [&str; 2] = ["section ", "prc_"];

/// Parses a MIDI file.
///
/// # Errors
///
/// Fails when the bytes are not a Standard MIDI File, when the file has no track, or when it
/// does not count time in ticks per quarter note.
pub fn parse_midi(bytes: &[u8], settings: &ParseSettings) -> Result<MidiOutput, MidiError> {
    let smf = Smf::parse(bytes).map_err(|err| MidiError::Malformed(err.to_string()))?;
    let resolution = match smf.header.timing {
        Timing::Metrical(ticks) => u32::from(ticks.as_int()),
        Timing::Timecode(..) => return Err(MidiError::UnsupportedTiming),
    };
    if resolution == 0 {
        return Err(MidiError::Malformed("zero ticks per quarter note".to_string()));
    }
    if smf.tracks.is_empty() {
        return Err(MidiError::NoTracks);
    }

    let mut song = Song {
        sync: SyncTrack::new(resolution),
        ..Song::default()
    };
    let mut warnings = Vec::new();
    read_tempo_map(&smf.tracks, &mut song.sync, &mut warnings);

    let mut pending: BTreeMap<Instrument, Vec<Chart>> = BTreeMap::new();
    for track in &smf.tracks {
        let Some(name) = track_name(track) else {
            log::debug!("skipping a track without a name");
            continue;
        };
        match table::track_kind(&name) {
            Some(TrackKind::Events) => read_global_events(track, &mut song),
            Some(TrackKind::Excluded) => log::debug!("skipping track {name}"),
            Some(TrackKind::Instrument {
                instrument,
                priority,
            }) => {
                if pending.contains_key(&instrument) && priority == TrackPriority::KeepExisting {
                    log::debug!("skipping track {name}, {instrument} is already read");
                    continue;
                }
                if name.eq_ignore_ascii_case(VOCALS_TRACK) {
                    read_lyrics(track, &mut song);
                }
                let mut reader = TrackReader::new(instrument, settings, resolution);
                reader.read(track, &mut warnings);
                pending.insert(instrument, reader.finish());
            }
            None => log::debug!("skipping unknown track {name}"),
        }
    }
    song.sort_globals();

    let mut resolve_warnings = Vec::new();
    song.drums_type = settings.drums_type;
    for mut chart in pending.into_values().flatten() {
        resolve::resolve_chart(
            &mut chart,
            Vec::new(),
            Detection::GreenPad,
            &mut song.drums_type,
            &mut resolve_warnings,
        );
        if chart.is_empty() {
            continue;
        }
        song.charts
            .insert((chart.instrument, chart.difficulty), chart);
    }
    resolve::drums::settle(&mut song);
    warnings.extend(resolve_warnings.into_iter().map(MidiWarning::from));
    Ok(MidiOutput { song, warnings })
}

/// Decodes a text event, as UTF-8 when valid and as Windows-1252 otherwise.
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    encoding_rs::UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .unwrap_or_else(|| encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0)
}

/// Takes the text inside the first pair of brackets, or the whole text without brackets.
pub(crate) fn strip_brackets(text: &str) -> &str {
    let inner = text
        .split_once('[')
        .and_then(|(_, rest)| rest.split_once(']'))
        .map(|(inner, _)| inner);
    inner.unwrap_or(text).trim()
}

fn track_name(track: &Track<'_>) -> Option<String> {
    match track.first()?.kind {
        TrackEventKind::Meta(MetaMessage::TrackName(name)) => Some(decode_text(name).into_owned()),
        _ => None,
    }
}

fn read_tempo_map(tracks: &[Track<'_>], sync: &mut SyncTrack, warnings: &mut Vec<MidiWarning>) {
    for track in tracks {
        let mut tick: Tick = 0;
        for event in track {
            tick = tick.saturating_add(event.delta.as_int());
            match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(micros)) => {
                    let micros = u64::from(micros.as_int());
                    if micros == 0 {
                        let warning = SyncWarning::ZeroTempo { tick };
                        log::warn!("{warning}");
                        warnings.push(warning.into());
                        continue;
                    }
                    let milli_bpm =
                        u32::try_from(MICROS_PER_MINUTE_MILLI / micros).unwrap_or(u32::MAX);
                    sync.tempos.push(TempoChange::new(tick, milli_bpm));
                }
                TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, exp, _, _)) => {
                    sync.time_signatures.push(TimeSignatureChange::new(
                        tick,
                        u32::from(numerator),
                        u32::from(exp),
                    ));
                }
                _ => {}
            }
        }
    }
    sync.finalize();
}

fn text_events<'t>(track: &'t Track<'_>) -> impl Iterator<Item = (Tick, Cow<'t, str>)> {
    track
        .iter()
        .scan(Tick::default(), |tick, event| {
            *tick = tick.saturating_add(event.delta.as_int());
            Some((*tick, event.kind))
        })
        .filter_map(|(tick, kind)| match kind {
            TrackEventKind::Meta(
                MetaMessage::Text(text)
                | MetaMessage::Lyric(text)
                | MetaMessage::Marker(text)
                | MetaMessage::CuePoint(text),
            ) => Some((tick, decode_text(text))),
            _ => None,
        })
}

fn read_global_events(track: &Track<'_>, song: &mut Song) {
    for (tick, text) in text_events(track) {
        let text = strip_brackets(&text);
        let section = SECTION_PREFIXES
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix));
        match section {
            Some(name) => song.sections.push(TextEvent::new(tick, name.trim())),
            None => song.events.push(TextEvent::new(tick, text)),
        }
    }
}

/// Copies the lyrics and the lyric phrase markers of a vocals track into the global events.
fn read_lyrics(track: &Track<'_>, song: &mut Song) {
    for (tick, text) in text_events(track) {
        if !text.contains('[') {
            song.events
                .push(TextEvent::new(tick, format!("{LYRIC_PREFIX}{text}")));
        }
    }
    let mut tick: Tick = 0;
    for event in track {
        tick = tick.saturating_add(event.delta.as_int());
        let TrackEventKind::Midi { message, .. } = event.kind else {
            continue;
        };
        let marker = match message {
            MidiMessage::NoteOn { key, vel } if table::is_lyric_phrase(key.as_int()) => {
                if vel.as_int() > 0 { PHRASE_START } else { PHRASE_END }
            }
            MidiMessage::NoteOff { key, .. } if table::is_lyric_phrase(key.as_int()) => PHRASE_END,
            _ => continue,
        };
        song.events.push(TextEvent::new(tick, marker));
    }
}

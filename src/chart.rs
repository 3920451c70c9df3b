//! The reader and the writer of the line-oriented text chart format (`.chart`).
//!
//! A chart file is a list of bracketed sections, each followed by a brace-delimited body:
//!
//! ```text
//! [Song]
//! {
//!   Resolution = 192
//! }
//! [SyncTrack]
//! {
//!   0 = TS 4
//!   0 = B 120000
//! }
//! [ExpertSingle]
//! {
//!   0 = N 0 96
//!   192 = S 2 384
//! }
//! ```
//!
//! Reading is split in phases. [`section`] gathers the section bodies, [`song_section`] reads the
//! song properties, [`sync_section`] reads the tempo map and the global events, and [`track`]
//! classifies the lines of every chart section through the code tables of [`table`]. Flags are
//! queued and applied by [`crate::resolve`] once a section is complete.
//!
//! Malformed lines are skipped and reported as [`ChartWarning`]s. Only an invalid resolution or
//! undecodable bytes abort the parse.

pub mod cursor;
pub mod line;
pub mod section;
pub mod song_section;
pub mod sync_section;
pub mod table;
pub mod track;
pub mod unparse;

use thiserror::Error;

use crate::{
    mixin::SourceRangeMixin,
    model::{Chart, Song, SyncWarning},
    resolve::{self, DeferredFlag, Detection, ResolveWarning},
    settings::ParseSettings,
};

use self::section::RawSection;

pub use self::unparse::write_chart;

/// A recoverable problem found on a line of a chart file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum LexWarning {
    /// A token was missing from the line.
    #[error("expected {expected}")]
    ExpectedToken {
        /// What was expected.
        expected: String,
    },
    /// A token could not be read as a number.
    #[error("invalid number for {field}: {text:?}")]
    InvalidNumber {
        /// The field being read.
        field: String,
        /// The token as written.
        text: String,
    },
    /// The event type of the line is unknown.
    #[error("unknown event type {kind:?}")]
    UnknownEventType {
        /// The type as written.
        kind: String,
    },
    /// A section body was not closed before the end of the file.
    #[error("section {section:?} is not closed")]
    MissingCloseBrace {
        /// The name of the section.
        section: String,
    },
    /// A song property could not be read.
    #[error("invalid value {value:?} for song property {key}")]
    InvalidMetadata {
        /// The property name.
        key: String,
        /// The value as written.
        value: String,
    },
}

/// A [`LexWarning`] with the byte range of the offending text.
pub type LexWarningWithRange = SourceRangeMixin<LexWarning>;

/// A problem which stops the parse of a chart file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ChartError {
    /// The resolution is not a positive integer.
    #[error("invalid resolution {value:?}")]
    InvalidResolution {
        /// The value as written.
        value: String,
    },
    /// The bytes are not valid in the detected encoding.
    #[error("the source is not valid UTF-8 or UTF-16")]
    InvalidEncoding,
}

/// A recoverable problem found while reading a chart file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ChartWarning {
    /// A malformed line.
    #[error(transparent)]
    Lex(#[from] LexWarningWithRange),
    /// A problem while resolving the flags or the solos of a chart.
    #[error(transparent)]
    Resolve(#[from] ResolveWarning),
    /// A problem in the tempo map.
    #[error(transparent)]
    Sync(#[from] SyncWarning),
}

/// The result of reading a chart file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct ChartOutput {
    /// The song read.
    pub song: Song,
    /// The problems found, in source order for the lines.
    pub warnings: Vec<ChartWarning>,
}

/// The name of the section holding the song properties.
pub const SONG_SECTION: &str = "Song";
/// The name of the section holding the tempo map.
pub const SYNC_TRACK_SECTION: &str = "SyncTrack";
/// The name of the section holding the global events.
pub const EVENTS_SECTION: &str = "Events";

/// Parses a chart file.
///
/// # Errors
///
/// Fails when the resolution of the song is not a positive integer.
pub fn parse_chart(source: &str, settings: &ParseSettings) -> Result<ChartOutput, ChartError> {
    let (sections, mut lex_warnings) = section::split_sections(source);
    let mut song = Song::default();
    let mut sync_warnings = Vec::new();

    if let Some(section) = sections.iter().find(|section| section.name == SONG_SECTION) {
        song_section::parse_song_section(section, &mut song, &mut lex_warnings)?;
    }

    let mut anchors = Vec::new();
    for section in sections
        .iter()
        .filter(|section| section.name == SYNC_TRACK_SECTION || section.name == EVENTS_SECTION)
    {
        sync_section::parse_global_section(
            section,
            &mut song,
            &mut anchors,
            &mut lex_warnings,
            &mut sync_warnings,
        );
    }
    sync_section::finalize_sync(&mut song, anchors);
    song.sort_globals();

    let mut pending: Vec<(Chart, Vec<DeferredFlag>)> = Vec::new();
    for section in sections.iter().filter(|section| !is_global_section(section)) {
        match table::chart_key(section.name) {
            Some((instrument, difficulty)) => {
                let position = pending.iter().position(|(chart, _)| {
                    chart.instrument == instrument && chart.difficulty == difficulty
                });
                let entry = match position {
                    Some(index) => pending.get_mut(index),
                    None => {
                        pending.push((Chart::new(instrument, difficulty), Vec::new()));
                        pending.last_mut()
                    }
                };
                let Some((chart, queue)) = entry else {
                    continue;
                };
                track::parse_track(section, chart, queue, &mut lex_warnings);
            }
            None => {
                log::debug!("keeping unrecognized chart section {:?}", section.name);
                song.unrecognized_charts
                    .push(track::parse_unrecognized(section, &mut lex_warnings));
            }
        }
    }

    // Charts are resolved in the order of their first section, so the first drums chart
    // decides the kit layout.
    let mut resolve_warnings = Vec::new();
    song.drums_type = settings.drums_type;
    for (mut chart, queue) in pending {
        resolve::resolve_chart(
            &mut chart,
            queue,
            Detection::FirstChart,
            &mut song.drums_type,
            &mut resolve_warnings,
        );
        let key = (chart.instrument, chart.difficulty);
        if chart.is_empty() {
            log::debug!("dropping empty chart {key:?}");
            continue;
        }
        song.charts.insert(key, chart);
    }

    let warnings = lex_warnings
        .into_iter()
        .map(ChartWarning::from)
        .chain(sync_warnings.into_iter().map(ChartWarning::from))
        .chain(resolve_warnings.into_iter().map(ChartWarning::from))
        .collect();
    Ok(ChartOutput { song, warnings })
}

/// Parses a chart file from bytes, decoding UTF-8 or UTF-16 by the byte order mark, and UTF-8
/// without one.
///
/// # Errors
///
/// Fails when the bytes are invalid in their encoding, or as [`parse_chart`] does.
pub fn parse_chart_bytes(bytes: &[u8], settings: &ParseSettings) -> Result<ChartOutput, ChartError> {
    let (encoding, bom_len) =
        encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));
    let body = bytes.get(bom_len..).unwrap_or_default();
    let source = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(ChartError::InvalidEncoding)?;
    parse_chart(&source, settings)
}

fn is_global_section(section: &RawSection<'_>) -> bool {
    matches!(
        section.name,
        SONG_SECTION | SYNC_TRACK_SECTION | EVENTS_SECTION
    )
}

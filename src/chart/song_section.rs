//! Reading the `[Song]` section, `Key = Value` lines holding the song properties.

use std::str::FromStr;

use super::{
    ChartError, LexWarning, LexWarningWithRange, cursor::Cursor, line::unquote,
    section::{RawSection, SourceLine},
};
use crate::{
    mixin::SourceRangeMixinExt,
    model::{Metadata, Song},
};

/// Reads the song properties into `song`. Unknown keys are ignored, and malformed values keep the
/// defaults.
///
/// # Errors
///
/// Fails when the resolution is not a positive integer.
pub fn parse_song_section(
    section: &RawSection<'_>,
    song: &mut Song,
    warnings: &mut Vec<LexWarningWithRange>,
) -> Result<(), ChartError> {
    for line in &section.lines {
        let mut cursor = Cursor::new(line.text, line.range.start);
        let Some(key) = cursor.next_token() else {
            continue;
        };
        if cursor.next_token() != Some("=") {
            let warning = cursor.make_err_expected_token("`=`");
            log::warn!("{warning}");
            warnings.push(warning);
            continue;
        }
        let (_, raw_value) = cursor.next_line_remaining();
        let value = unquote(raw_value);
        let meta = &mut song.metadata;
        match key {
            "Name" => meta.name = Some(value.to_string()),
            "Artist" => meta.artist = Some(value.to_string()),
            "Charter" => meta.charter = Some(value.to_string()),
            "Album" => meta.album = Some(value.to_string()),
            "Genre" => meta.genre = Some(value.to_string()),
            "Year" => meta.year = Some(Metadata::normalize_year(value)),
            "Offset" => {
                if let Some(offset) = parse_value(key, value, line, warnings) {
                    song.offset = offset;
                }
            }
            "PreviewStart" => {
                if let Some(start) = parse_value(key, value, line, warnings) {
                    meta.preview_start = start;
                }
            }
            "PreviewEnd" => {
                if let Some(end) = parse_value(key, value, line, warnings) {
                    meta.preview_end = end;
                }
            }
            "Length" => {
                if let Some(length) = parse_value(key, value, line, warnings) {
                    meta.manual_length = Some(length);
                }
            }
            "Difficulty" => {
                if let Some(difficulty) = parse_value(key, value, line, warnings) {
                    meta.difficulty = Some(difficulty);
                }
            }
            "Resolution" => match value.parse::<u32>() {
                Ok(resolution) if resolution >= 1 => song.sync.resolution = resolution,
                _ => {
                    return Err(ChartError::InvalidResolution {
                        value: value.to_string(),
                    });
                }
            },
            _ => log::debug!("ignoring song property {key}"),
        }
    }
    Ok(())
}

fn parse_value<T: FromStr>(
    key: &str,
    value: &str,
    line: &SourceLine<'_>,
    warnings: &mut Vec<LexWarningWithRange>,
) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            let warning = LexWarning::InvalidMetadata {
                key: key.to_string(),
                value: value.to_string(),
            }
            .into_wrapper_range(line.range.clone());
            log::warn!("{warning}");
            warnings.push(warning);
            None
        }
    }
}

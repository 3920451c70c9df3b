//! The grammar of the timed lines, `<tick> = <type> <args...>`.

use std::{ops::Range, str::FromStr};

use super::{LexWarning, LexWarningWithRange, cursor::Cursor, section::SourceLine};
use crate::{mixin::SourceRangeMixinExt, model::Tick};

/// The typed contents of a timed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBody<'a> {
    /// `N <code> <length>`, a note or a flag code.
    Note {
        /// The note code of the track.
        code: u32,
        /// The sustain length.
        length: Tick,
    },
    /// `S <code> <length>`, a phrase.
    Special {
        /// The phrase code of the track.
        code: u32,
        /// The phrase length.
        length: Tick,
    },
    /// `E <text>`, a text event, with surrounding quotes removed.
    Event(&'a str),
    /// `B <milli-bpm>`, a tempo change.
    Tempo(u32),
    /// `TS <numerator> [<exponent>]`, a time signature change.
    TimeSignature {
        /// Beats per measure.
        numerator: u32,
        /// The beat unit as a power of two, 2 when omitted.
        denominator_exp: u32,
    },
    /// `A <microseconds>`, an anchor pinning the time of the tick.
    Anchor(u64),
}

/// A timed line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimedLine<'a> {
    /// Where the line applies.
    pub tick: Tick,
    /// What the line declares.
    pub body: LineBody<'a>,
    /// The absolute byte range of the line.
    pub range: Range<usize>,
}

/// Parses a timed line.
///
/// # Errors
///
/// Fails on a missing token, an invalid number or an unknown type, with the range of the line.
pub fn parse_line<'a>(line: &SourceLine<'a>) -> Result<TimedLine<'a>, LexWarningWithRange> {
    let mut cursor = Cursor::new(line.text, line.range.start);
    let tick = next_number(&mut cursor, "tick")?;
    if cursor.next_token() != Some("=") {
        return Err(cursor.make_err_expected_token("`=`"));
    }
    let kind = cursor
        .next_token()
        .ok_or_else(|| cursor.make_err_expected_token("event type"))?;

    let body = if kind.eq_ignore_ascii_case("N") {
        LineBody::Note {
            code: next_number(&mut cursor, "note code")?,
            length: next_number(&mut cursor, "note length")?,
        }
    } else if kind.eq_ignore_ascii_case("S") {
        LineBody::Special {
            code: next_number(&mut cursor, "phrase code")?,
            length: next_number(&mut cursor, "phrase length")?,
        }
    } else if kind.eq_ignore_ascii_case("E") {
        let (_, text) = cursor.next_line_remaining();
        LineBody::Event(unquote(text))
    } else if kind.eq_ignore_ascii_case("B") {
        LineBody::Tempo(next_number(&mut cursor, "tempo")?)
    } else if kind.eq_ignore_ascii_case("TS") {
        let numerator = next_number(&mut cursor, "time signature numerator")?;
        let denominator_exp = if cursor.is_end() {
            2
        } else {
            next_number(&mut cursor, "time signature exponent")?
        };
        LineBody::TimeSignature {
            numerator,
            denominator_exp,
        }
    } else if kind.eq_ignore_ascii_case("A") {
        LineBody::Anchor(next_number(&mut cursor, "anchor")?)
    } else {
        return Err(LexWarning::UnknownEventType {
            kind: kind.to_string(),
        }
        .into_wrapper_range(line.range.clone()));
    };
    Ok(TimedLine {
        tick,
        body,
        range: line.range.clone(),
    })
}

/// Reads the next token as a number.
///
/// # Errors
///
/// Fails when the token is missing or is not a number.
pub fn next_number<T: FromStr>(
    cursor: &mut Cursor<'_>,
    field: &'static str,
) -> Result<T, LexWarningWithRange> {
    let (range, token) = cursor
        .next_token_with_range()
        .ok_or_else(|| cursor.make_err_expected_token(field))?;
    token.parse().map_err(|_| {
        LexWarning::InvalidNumber {
            field: field.to_string(),
            text: token.to_string(),
        }
        .into_wrapper_range(range)
    })
}

/// Removes one pair of surrounding double quotes, if any.
#[must_use]
pub fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

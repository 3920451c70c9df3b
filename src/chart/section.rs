//! Splitting a chart file into named sections.

use std::ops::Range;

use super::{LexWarning, LexWarningWithRange, cursor::Cursor};
use crate::mixin::SourceRangeMixinExt;

/// A non-empty trimmed line of a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// The line text, trimmed.
    pub text: &'a str,
    /// The absolute byte range of `text`.
    pub range: Range<usize>,
}

/// A section of a chart file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection<'a> {
    /// The section name, without brackets.
    pub name: &'a str,
    /// The byte range of the bracketed header.
    pub header: Range<usize>,
    /// The lines of the body.
    pub lines: Vec<SourceLine<'a>>,
}

/// Splits a chart file into sections.
///
/// A `[Name]` line names the next body, `{` opens it and `}` submits it. Lines outside a body are
/// skipped. A body missing its `}` is submitted when the next header or the end of the file comes,
/// and reported.
#[must_use]
pub fn split_sections(source: &str) -> (Vec<RawSection<'_>>, Vec<LexWarningWithRange>) {
    let mut sections = Vec::new();
    let mut warnings = Vec::new();
    let mut cursor = Cursor::new(source, 0);
    let mut name: Option<(&str, Range<usize>)> = None;
    let mut lines: Vec<SourceLine<'_>> = Vec::new();
    let mut open = false;

    while let Some((range, text)) = cursor.next_line() {
        if text.is_empty() {
            continue;
        }
        if let Some(inner) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            if open {
                unclosed(&name, &mut warnings);
                submit(&mut name, &mut lines, &mut sections);
                open = false;
            }
            name = Some((inner.trim(), range));
        } else if text == "{" {
            open = true;
        } else if text == "}" {
            open = false;
            submit(&mut name, &mut lines, &mut sections);
        } else if open {
            lines.push(SourceLine { text, range });
        }
    }
    if open {
        unclosed(&name, &mut warnings);
        submit(&mut name, &mut lines, &mut sections);
    }
    (sections, warnings)
}

fn submit<'a>(
    name: &mut Option<(&'a str, Range<usize>)>,
    lines: &mut Vec<SourceLine<'a>>,
    sections: &mut Vec<RawSection<'a>>,
) {
    if let Some((name, header)) = name.take() {
        sections.push(RawSection {
            name,
            header,
            lines: std::mem::take(lines),
        });
    }
    lines.clear();
}

fn unclosed(name: &Option<(&str, Range<usize>)>, warnings: &mut Vec<LexWarningWithRange>) {
    let Some((name, header)) = name else {
        return;
    };
    let warning = LexWarning::MissingCloseBrace {
        section: (*name).to_string(),
    }
    .into_wrapper_range(header.clone());
    log::warn!("{warning}");
    warnings.push(warning);
}

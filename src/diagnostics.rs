//! Rendering of chart warnings using `ariadne`.
//!
//! Lex warnings carry the byte range of the offending text in their [`SourceRangeMixin`], so
//! ariadne can compute the rows and columns to show. Warnings found after the lines are read,
//! such as unmatched solo markers, have no range and are reported at the start of the file.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use chart_rs::{chart::parse_chart, diagnostics::emit_chart_warnings, settings::ParseSettings};
//!
//! let source = "[ExpertSingle]\n{\n  0 = N zero 0\n}\n";
//! let output = parse_chart(source, &ParseSettings::default()).unwrap();
//!
//! emit_chart_warnings("song.chart", source, &output.warnings);
//! # }
//! ```
//!
//! [`SourceRangeMixin`]: crate::mixin::SourceRangeMixin

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind, Source};

#[cfg(feature = "diagnostics")]
use crate::chart::{ChartWarning, LexWarningWithRange};

/// A source file name and its text.
///
/// ```rust
/// use chart_rs::diagnostics::SimpleSource;
///
/// let source = SimpleSource::new("song.chart", "[Song]\n{\n}\n");
/// assert_eq!(source.name(), "song.chart");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleSource<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Creates a source container.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// The whole text of the source.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The name of the source file.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Conversion of a warning into an `ariadne::Report`.
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Builds the report, labelled with the file name of `src`.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Builds a warning report with one colored label over `range`.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for LexWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Warning,
            self.as_range(),
            "lex",
            self.content(),
            Color::Yellow,
        )
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ChartWarning {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let title = match self {
            Self::Lex(warning) => return warning.to_report(src),
            Self::Resolve(_) => "resolve",
            Self::Sync(_) => "sync",
        };
        let filename = src.name().to_string();
        Report::build(ReportKind::Warning, (filename, 0..0))
            .with_message(format!("{title}: {self}"))
            .finish()
    }
}

/// Prints the reports of chart warnings to the standard error.
#[cfg(feature = "diagnostics")]
pub fn emit_chart_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ChartWarning>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for warning in warnings {
        let report = warning.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Builds the reports of chart warnings without printing them.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_chart_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ChartWarning>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings
        .into_iter()
        .map(|warning| warning.to_report(&simple))
        .collect()
}

//! Song metadata.

/// Descriptive properties of a song.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// The song title.
    pub name: Option<String>,
    /// The song artist.
    pub artist: Option<String>,
    /// The chart author.
    pub charter: Option<String>,
    /// The album title.
    pub album: Option<String>,
    /// The genre.
    pub genre: Option<String>,
    /// The release year, digits only.
    pub year: Option<String>,
    /// The overall difficulty rating.
    pub difficulty: Option<i32>,
    /// Where the preview starts, in seconds.
    pub preview_start: f64,
    /// Where the preview ends, in seconds.
    pub preview_end: f64,
    /// The song length in seconds, if set by the author.
    pub manual_length: Option<f64>,
}

impl Metadata {
    /// Keeps only the ASCII digits of a year string, such as `", 2008"` into `"2008"`.
    #[must_use]
    pub fn normalize_year(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }
}

//! Settings controlling how a chart is read.

use crate::model::DrumsType;

/// The settings of a parse.
///
/// Every value scaled by the resolution is given in ticks at the song resolution. Unset values are
/// derived from the resolution of the song being read.
///
/// ```
/// use chart_rs::settings::ParseSettings;
///
/// let settings = ParseSettings::default().with_eighth_note_hopo(true);
/// assert_eq!(settings.hopo_threshold(480), 241);
/// assert_eq!(settings.sustain_cutoff(480), 160);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseSettings {
    /// The greatest distance in ticks between two notes for the second to be a natural HOPO.
    pub hopo_threshold: Option<u32>,
    /// Derives the HOPO threshold from an eighth note instead of the usual 65/192 of a quarter.
    pub eighth_note_hopo: bool,
    /// Sustains of MIDI notes of this length or shorter are cut to 0.
    pub sustain_cutoff: Option<u32>,
    /// The drum kit layout. [`DrumsType::Unknown`] infers it from the notes.
    pub drums_type: DrumsType,
    /// Converts the solo phrases of guitar and bass charts into star power phrases when the chart
    /// has none.
    pub star_power_fixup: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            hopo_threshold: None,
            eighth_note_hopo: false,
            sustain_cutoff: None,
            drums_type: DrumsType::Unknown,
            star_power_fixup: true,
        }
    }
}

impl ParseSettings {
    /// Sets an explicit HOPO threshold.
    #[must_use]
    pub const fn with_hopo_threshold(mut self, ticks: u32) -> Self {
        self.hopo_threshold = Some(ticks);
        self
    }

    /// Sets whether the HOPO threshold derives from an eighth note.
    #[must_use]
    pub const fn with_eighth_note_hopo(mut self, enabled: bool) -> Self {
        self.eighth_note_hopo = enabled;
        self
    }

    /// Sets an explicit sustain cutoff.
    #[must_use]
    pub const fn with_sustain_cutoff(mut self, ticks: u32) -> Self {
        self.sustain_cutoff = Some(ticks);
        self
    }

    /// Forces a drum kit layout.
    #[must_use]
    pub const fn with_drums_type(mut self, drums_type: DrumsType) -> Self {
        self.drums_type = drums_type;
        self
    }

    /// Sets whether solos stand in for missing star power.
    #[must_use]
    pub const fn with_star_power_fixup(mut self, enabled: bool) -> Self {
        self.star_power_fixup = enabled;
        self
    }

    /// The HOPO threshold in ticks at a resolution.
    #[must_use]
    pub const fn hopo_threshold(&self, resolution: u32) -> u32 {
        match self.hopo_threshold {
            Some(ticks) => ticks,
            None if self.eighth_note_hopo => resolution / 2 + 1,
            None => scale_by_192(65, resolution),
        }
    }

    /// The sustain cutoff in ticks at a resolution.
    #[must_use]
    pub const fn sustain_cutoff(&self, resolution: u32) -> u32 {
        match self.sustain_cutoff {
            Some(ticks) => ticks,
            None => scale_by_192(64, resolution),
        }
    }
}

/// Returns the default settings.
#[must_use]
pub fn default_settings() -> ParseSettings {
    ParseSettings::default()
}

const fn scale_by_192(ticks: u32, resolution: u32) -> u32 {
    let scaled = ticks as u64 * resolution as u64 / 192;
    if scaled > u32::MAX as u64 {
        u32::MAX
    } else {
        scaled as u32
    }
}

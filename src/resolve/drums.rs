//! Inference of the drum kit layout from the notes of a drums chart.

use crate::model::{Chart, DrumPad, DrumsType, GameMode, NoteFlags, Song};

/// How a reader tells the kit layout of a song from its drums charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detection {
    /// The first drums chart resolved decides with its earliest cymbal or green pad, and has four
    /// lanes without either. Text charts mark cymbals explicitly.
    FirstChart,
    /// Any green pad in any drums chart means five lanes, and four lanes otherwise. Cymbals are no
    /// evidence, since MIDI drums default their yellow, blue and orange pads to cymbals.
    GreenPad,
}

impl Detection {
    /// Updates the song-wide layout with a resolved drums chart. A layout already decided or
    /// forced by the settings is kept.
    pub fn observe(self, chart: &Chart, drums_type: &mut DrumsType) {
        if *drums_type != DrumsType::Unknown {
            return;
        }
        match self {
            Self::FirstChart => *drums_type = detect(chart),
            Self::GreenPad => {
                if has_green_pad(chart) {
                    *drums_type = DrumsType::FiveLane;
                }
            }
        }
    }
}

/// Finds the first note giving evidence of a kit layout.
///
/// A cymbal means four lanes and a green pad means five lanes. The notes must be sorted by tick.
#[must_use]
pub fn evidence(chart: &Chart) -> Option<DrumsType> {
    chart.notes.iter().find_map(|note| {
        if note.flags.contains(NoteFlags::CYMBAL) {
            Some(DrumsType::FourLane)
        } else if note.raw == DrumPad::Green.raw() {
            Some(DrumsType::FiveLane)
        } else {
            None
        }
    })
}

/// Infers the kit layout of one chart. Without any evidence the kit has four lanes.
#[must_use]
pub fn detect(chart: &Chart) -> DrumsType {
    evidence(chart).unwrap_or(DrumsType::FourLane)
}

/// Whether any note of the chart is on the green pad.
#[must_use]
pub fn has_green_pad(chart: &Chart) -> bool {
    chart
        .notes
        .iter()
        .any(|note| note.raw == DrumPad::Green.raw())
}

/// Gives a song with drums charts but no evidence in any of them the four lane layout.
pub fn settle(song: &mut Song) {
    let has_drums = song
        .charts
        .values()
        .any(|chart| chart.game_mode() == GameMode::Drums);
    if has_drums && song.drums_type == DrumsType::Unknown {
        song.drums_type = DrumsType::FourLane;
    }
}

//! The song, the root of the object model.

use std::collections::BTreeMap;

use super::{
    Tick,
    chart::{Chart, UnrecognizedChart},
    event::TextEvent,
    instrument::{Difficulty, DrumsType, Instrument},
    metadata::Metadata,
    sync::SyncTrack,
};

/// Everything parsed from one chart file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    /// The audio offset in seconds.
    pub offset: f64,
    /// Descriptive properties.
    pub metadata: Metadata,
    /// The tempo map and time signatures.
    pub sync: SyncTrack,
    /// Global text events, sorted by tick.
    pub events: Vec<TextEvent>,
    /// Named sections of the song, sorted by tick.
    pub sections: Vec<TextEvent>,
    /// The charts by instrument and difficulty.
    pub charts: BTreeMap<(Instrument, Difficulty), Chart>,
    /// Chart sections with an unknown name.
    pub unrecognized_charts: Vec<UnrecognizedChart>,
    /// The drum kit layout of the drums charts.
    pub drums_type: DrumsType,
}

impl Song {
    /// Returns the chart of an instrument at a difficulty.
    #[must_use]
    pub fn chart(&self, instrument: Instrument, difficulty: Difficulty) -> Option<&Chart> {
        self.charts.get(&(instrument, difficulty))
    }

    /// Returns the chart of an instrument at a difficulty, creating it when missing.
    pub fn chart_mut(&mut self, instrument: Instrument, difficulty: Difficulty) -> &mut Chart {
        self.charts
            .entry((instrument, difficulty))
            .or_insert_with(|| Chart::new(instrument, difficulty))
    }

    /// Iterates all charts of an instrument, from the easiest.
    pub fn charts_of(&self, instrument: Instrument) -> impl Iterator<Item = &Chart> {
        self.charts
            .range((instrument, Difficulty::Easy)..=(instrument, Difficulty::Expert))
            .map(|(_, chart)| chart)
    }

    /// The tick of the last note, phrase end or event in the song.
    #[must_use]
    pub fn last_tick(&self) -> Tick {
        let charts = self.charts.values().flat_map(|chart| {
            let notes = chart.notes.iter().map(|note| note.end_tick());
            let phrases = chart.phrases.iter().map(|phrase| phrase.end_tick());
            let events = chart.events.iter().map(|event| event.tick);
            notes.chain(phrases).chain(events)
        });
        let globals = self
            .events
            .iter()
            .chain(&self.sections)
            .map(|event| event.tick);
        charts.chain(globals).max().unwrap_or(0)
    }

    /// The song length in seconds: the manual length when set, else the time of [`Self::last_tick`].
    #[must_use]
    pub fn length_seconds(&self) -> f64 {
        self.metadata
            .manual_length
            .unwrap_or_else(|| self.sync.tick_to_seconds(self.last_tick()))
    }

    /// Sorts the global collections by tick, then by text.
    pub fn sort_globals(&mut self) {
        self.events.sort();
        self.sections.sort();
    }
}

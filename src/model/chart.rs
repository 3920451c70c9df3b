//! One playable chart, and the raw contents of charts nobody knows how to read.

use std::ops::Range;

use super::{
    Tick,
    event::TextEvent,
    instrument::{Difficulty, GameMode, Instrument},
    note::Note,
    phrase::Phrase,
};

/// The notes, phrases and local events of one instrument at one difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// The instrument, which also fixes the game mode.
    pub instrument: Instrument,
    /// The difficulty.
    pub difficulty: Difficulty,
    /// The notes, sorted by tick.
    pub notes: Vec<Note>,
    /// The phrases, sorted by tick.
    pub phrases: Vec<Phrase>,
    /// The local text events, sorted by tick.
    pub events: Vec<TextEvent>,
}

impl Chart {
    /// Creates an empty chart.
    #[must_use]
    pub const fn new(instrument: Instrument, difficulty: Difficulty) -> Self {
        Self {
            instrument,
            difficulty,
            notes: Vec::new(),
            phrases: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The game mode of the chart.
    #[must_use]
    pub const fn game_mode(&self) -> GameMode {
        self.instrument.game_mode()
    }

    /// Whether the chart has nothing in it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.phrases.is_empty() && self.events.is_empty()
    }

    /// Returns the index range of the notes starting at `tick`. The notes must be sorted by tick.
    #[must_use]
    pub fn notes_at(&self, tick: Tick) -> Range<usize> {
        self.notes_in(tick..tick.saturating_add(1))
    }

    /// Returns the index range of the notes starting in `ticks`. The notes must be sorted by tick.
    #[must_use]
    pub fn notes_in(&self, ticks: Range<Tick>) -> Range<usize> {
        let start = self.notes.partition_point(|note| note.tick < ticks.start);
        let end = self.notes.partition_point(|note| note.tick < ticks.end);
        start..end.max(start)
    }

    /// Stable-sorts the notes by tick and raw index, keeping the order of equal notes.
    pub fn sort_notes(&mut self) {
        self.notes.sort_by_key(|note| (note.tick, note.raw));
    }

    /// Sorts every collection into the canonical order.
    pub fn sort_canonical(&mut self) {
        self.notes.sort();
        self.phrases.sort();
        self.events.sort();
    }
}

/// A chart section whose name is not a known instrument and difficulty, kept as read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnrecognizedChart {
    /// The section name, without brackets.
    pub name: String,
    /// The note codes as written, with `raw` holding the code.
    pub notes: Vec<Note>,
    /// The text events as written.
    pub events: Vec<TextEvent>,
}

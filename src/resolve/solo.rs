//! Pairing of the `solo` / `soloend` text markers into solo phrases.

use itertools::Itertools;

use super::ResolveWarning;
use crate::model::{Chart, Phrase, PhraseKind, Tick};

/// The text opening a solo.
pub const SOLO_START: &str = "solo";
/// The text closing a solo.
pub const SOLO_END: &str = "soloend";

/// A solo marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoloMarker {
    /// Opens a solo.
    Start,
    /// Closes the open solo.
    End,
}

impl SoloMarker {
    /// Reads a marker from a text event.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            SOLO_START => Some(Self::Start),
            SOLO_END => Some(Self::End),
            _ => None,
        }
    }
}

/// The pairing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SoloState {
    /// No solo is open.
    #[default]
    Idle,
    /// A solo opened at `start`.
    Open {
        /// Where the solo started.
        start: Tick,
    },
}

/// What one marker produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SoloOutcome {
    /// The state changed with nothing else to report.
    Moved,
    /// A solo was closed into a phrase.
    Closed(Phrase),
    /// The marker was discarded.
    Discarded(ResolveWarning),
}

impl SoloState {
    /// Advances the state by one marker at `tick`.
    #[must_use]
    pub const fn step(self, marker: SoloMarker, tick: Tick) -> (Self, SoloOutcome) {
        match (self, marker) {
            (Self::Idle, SoloMarker::Start) => (Self::Open { start: tick }, SoloOutcome::Moved),
            (Self::Idle, SoloMarker::End) => (
                Self::Idle,
                SoloOutcome::Discarded(ResolveWarning::UnmatchedSoloEnd { tick }),
            ),
            (Self::Open { start }, SoloMarker::Start) => (
                self,
                SoloOutcome::Discarded(ResolveWarning::DuplicateSoloStart { tick, open: start }),
            ),
            (Self::Open { start }, SoloMarker::End) => (
                Self::Idle,
                SoloOutcome::Closed(Phrase::new(
                    start,
                    PhraseKind::Solo,
                    tick.saturating_sub(start),
                )),
            ),
        }
    }
}

/// Replaces the solo markers of a chart by solo phrases.
///
/// Markers sharing a tick are taken ends first while a solo is open, and starts first otherwise,
/// so a solo may close and the next one open on the same tick. Every marker is removed from the
/// events, matched or not.
pub fn pair_solos(chart: &mut Chart, warnings: &mut Vec<ResolveWarning>) {
    let mut markers: Vec<(Tick, SoloMarker)> = Vec::new();
    chart.events.retain(|event| match SoloMarker::from_text(&event.text) {
        Some(marker) => {
            markers.push((event.tick, marker));
            false
        }
        None => true,
    });
    markers.sort_by_key(|&(tick, _)| tick);

    let mut state = SoloState::Idle;
    for (tick, group) in &markers.iter().chunk_by(|&&(tick, _)| tick) {
        let group: Vec<SoloMarker> = group.map(|&(_, marker)| marker).collect();
        let first = match state {
            SoloState::Idle => SoloMarker::Start,
            SoloState::Open { .. } => SoloMarker::End,
        };
        let ordered = group
            .iter()
            .filter(|&&marker| marker == first)
            .chain(group.iter().filter(|&&marker| marker != first));
        for &marker in ordered {
            let (next, outcome) = state.step(marker, tick);
            state = next;
            match outcome {
                SoloOutcome::Moved => {}
                SoloOutcome::Closed(phrase) => chart.phrases.push(phrase),
                SoloOutcome::Discarded(warning) => {
                    log::warn!("{warning}");
                    warnings.push(warning);
                }
            }
        }
    }

    if let SoloState::Open { start } = state {
        let warning = ResolveWarning::UnterminatedSolo { start };
        log::warn!("{warning}");
        warnings.push(warning);
    }
}

//! The deferred resolution pipeline, run on each chart once its whole track has been read.
//!
//! Readers emit plain notes right away but queue every flag modifier as a [`DeferredFlag`], since
//! a modifier may be declared before the note it applies to. When the track ends,
//! [`resolve_chart`] runs these steps in order:
//!
//! 1. stable-sorts the notes by tick and raw index,
//! 2. drains the flag queue through the conflict rules of [`flag::FlagRule`],
//! 3. runs the post-process steps of the chart's game mode, see [`PostProcess::for_mode`],
//! 4. sorts every collection into the canonical order.

pub mod drums;
pub mod flag;
pub mod solo;

use thiserror::Error;

use crate::model::{Chart, DrumsType, GameMode, NoteFlags, Tick};

pub use self::{
    drums::Detection,
    flag::{DeferredFlag, FlagRule, FlagTarget},
};

/// A recoverable problem found while resolving a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ResolveWarning {
    /// A flag was not applied because the note already has a flag taking precedence over it.
    #[error("flag {flag} on note {raw} at tick {tick} is blocked by {blocker}")]
    FlagBlocked {
        /// Where the note is.
        tick: Tick,
        /// The raw index of the note.
        raw: u32,
        /// The flag which was not applied.
        flag: NoteFlags,
        /// The flag which blocked it.
        blocker: NoteFlags,
    },
    /// A flag was not applied because the game mode of the chart does not use it.
    #[error("flag {flag} at tick {tick} is not allowed in {mode} charts")]
    FlagNotAllowed {
        /// Where the flag was declared.
        tick: Tick,
        /// The rejected flag.
        flag: NoteFlags,
        /// The game mode of the chart.
        mode: GameMode,
    },
    /// A solo end marker had no solo to close and was discarded.
    #[error("solo end at tick {tick} has no matching start")]
    UnmatchedSoloEnd {
        /// Where the marker is.
        tick: Tick,
    },
    /// A solo start marker came while a solo was already open and was ignored.
    #[error("solo start at tick {tick} while the solo from tick {open} is open")]
    DuplicateSoloStart {
        /// Where the ignored marker is.
        tick: Tick,
        /// Where the open solo started.
        open: Tick,
    },
    /// A solo was still open when the track ended, and was dropped.
    #[error("solo from tick {start} is never closed")]
    UnterminatedSolo {
        /// Where the dropped solo started.
        start: Tick,
    },
}

/// A step run after the flags of a chart are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostProcess {
    /// Pairs the solo markers into solo phrases, see [`solo`].
    Solo,
    /// Infers the drum kit layout, see [`drums`].
    DrumsType,
}

impl PostProcess {
    /// Returns the steps run for a game mode, in order.
    #[must_use]
    pub const fn for_mode(mode: GameMode) -> &'static [Self] {
        match mode {
            GameMode::Guitar | GameMode::GhlGuitar => &[Self::Solo],
            GameMode::Drums => &[Self::Solo, Self::DrumsType],
            GameMode::ProGuitar | GameMode::Vocals => &[],
        }
    }
}

/// Runs the whole pipeline on a chart.
///
/// `drums_type` is the song-wide drum kit layout. It is only written while it is still
/// [`DrumsType::Unknown`], in the way `detection` tells, so charts must be resolved in the order
/// the reader met them.
pub fn resolve_chart(
    chart: &mut Chart,
    queue: Vec<DeferredFlag>,
    detection: Detection,
    drums_type: &mut DrumsType,
    warnings: &mut Vec<ResolveWarning>,
) {
    chart.sort_notes();
    apply_flags(chart, queue, warnings);
    for step in PostProcess::for_mode(chart.game_mode()) {
        match step {
            PostProcess::Solo => solo::pair_solos(chart, warnings),
            PostProcess::DrumsType => detection.observe(chart, drums_type),
        }
    }
    chart.sort_canonical();
}

/// Drains a flag queue into a chart whose notes are sorted by tick.
pub fn apply_flags(chart: &mut Chart, queue: Vec<DeferredFlag>, warnings: &mut Vec<ResolveWarning>) {
    let mode = chart.game_mode();
    for deferred in queue {
        if !mode.allowed_flags().contains(deferred.rule.flag) {
            let warning = ResolveWarning::FlagNotAllowed {
                tick: deferred.tick,
                flag: deferred.rule.flag,
                mode,
            };
            log::warn!("{warning}");
            warnings.push(warning);
            continue;
        }
        let range = chart.notes_at(deferred.tick);
        let Some(notes) = chart.notes.get_mut(range) else {
            continue;
        };
        for note in notes
            .iter_mut()
            .filter(|note| deferred.target.matches(note.raw))
        {
            if let Err(blocker) = deferred.rule.try_apply(note) {
                let warning = ResolveWarning::FlagBlocked {
                    tick: note.tick,
                    raw: note.raw,
                    flag: deferred.rule.flag,
                    blocker,
                };
                log::debug!("{warning}");
                warnings.push(warning);
            }
        }
    }
}

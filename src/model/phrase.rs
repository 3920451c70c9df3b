//! Ranged special phrases of a chart.

use super::Tick;

/// Kinds of [`Phrase`], in their canonical sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PhraseKind {
    /// Notes which fill the star power meter when all hit.
    Starpower,
    /// A solo section, scored separately.
    Solo,
    /// A phrase owned by the first player in versus modes.
    VersusPlayer1,
    /// A phrase owned by the second player in versus modes.
    VersusPlayer2,
    /// A lane of rapidly repeated single notes.
    TremoloLane,
    /// A lane of alternating two notes.
    TrillLane,
    /// A drum fill which activates star power.
    DrumFill,
    /// A vocals line.
    LyricPhrase,
    /// A vocals percussion section.
    PercussionPhrase,
    /// A pro keys range shift.
    RangeShift,
    /// A pro guitar glissando.
    Glissando,
}

impl std::fmt::Display for PhraseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Starpower => "star power",
            Self::Solo => "solo",
            Self::VersusPlayer1 => "versus player 1",
            Self::VersusPlayer2 => "versus player 2",
            Self::TremoloLane => "tremolo lane",
            Self::TrillLane => "trill lane",
            Self::DrumFill => "drum fill",
            Self::LyricPhrase => "lyric phrase",
            Self::PercussionPhrase => "percussion phrase",
            Self::RangeShift => "range shift",
            Self::Glissando => "glissando",
        };
        f.write_str(name)
    }
}

/// A phrase covering the half-open tick range `[tick, tick + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phrase {
    /// Where the phrase starts.
    pub tick: Tick,
    /// What the phrase means.
    pub kind: PhraseKind,
    /// How long the phrase lasts.
    pub length: Tick,
}

impl Phrase {
    /// Creates a new phrase.
    #[must_use]
    pub const fn new(tick: Tick, kind: PhraseKind, length: Tick) -> Self {
        Self { tick, kind, length }
    }

    /// The exclusive end tick.
    #[must_use]
    pub const fn end_tick(&self) -> Tick {
        self.tick.saturating_add(self.length)
    }

    /// Whether `tick` lies in the phrase.
    #[must_use]
    pub const fn covers(&self, tick: Tick) -> bool {
        self.tick <= tick && tick < self.end_tick()
    }
}

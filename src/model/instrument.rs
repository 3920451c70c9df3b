//! Instruments, difficulties and game modes.

use super::note::NoteFlags;

/// A playable part of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    /// Lead guitar.
    Guitar,
    /// Co-op guitar.
    GuitarCoop,
    /// Bass guitar.
    Bass,
    /// Rhythm guitar.
    Rhythm,
    /// Keys on a five-fret controller.
    Keys,
    /// Drums, four or five lanes.
    Drums,
    /// Six-fret lead guitar.
    GhlGuitar,
    /// Six-fret bass.
    GhlBass,
    /// Six-fret rhythm guitar.
    GhlRhythm,
    /// Six-fret co-op guitar.
    GhlCoop,
    /// Pro guitar on a 17-fret controller.
    ProGuitar17,
    /// Pro guitar on a 22-fret controller.
    ProGuitar22,
    /// Pro bass on a 17-fret controller.
    ProBass17,
    /// Pro bass on a 22-fret controller.
    ProBass22,
    /// Vocals.
    Vocals,
}

impl Instrument {
    /// All instruments in their canonical order.
    pub const ALL: [Self; 15] = [
        Self::Guitar,
        Self::GuitarCoop,
        Self::Bass,
        Self::Rhythm,
        Self::Keys,
        Self::Drums,
        Self::GhlGuitar,
        Self::GhlBass,
        Self::GhlRhythm,
        Self::GhlCoop,
        Self::ProGuitar17,
        Self::ProGuitar22,
        Self::ProBass17,
        Self::ProBass22,
        Self::Vocals,
    ];

    /// Returns the game mode the instrument is played in.
    #[must_use]
    pub const fn game_mode(self) -> GameMode {
        match self {
            Self::Guitar | Self::GuitarCoop | Self::Bass | Self::Rhythm | Self::Keys => {
                GameMode::Guitar
            }
            Self::Drums => GameMode::Drums,
            Self::GhlGuitar | Self::GhlBass | Self::GhlRhythm | Self::GhlCoop => {
                GameMode::GhlGuitar
            }
            Self::ProGuitar17 | Self::ProGuitar22 | Self::ProBass17 | Self::ProBass22 => {
                GameMode::ProGuitar
            }
            Self::Vocals => GameMode::Vocals,
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Guitar => "guitar",
            Self::GuitarCoop => "guitar co-op",
            Self::Bass => "bass",
            Self::Rhythm => "rhythm",
            Self::Keys => "keys",
            Self::Drums => "drums",
            Self::GhlGuitar => "guitar (6 fret)",
            Self::GhlBass => "bass (6 fret)",
            Self::GhlRhythm => "rhythm (6 fret)",
            Self::GhlCoop => "guitar co-op (6 fret)",
            Self::ProGuitar17 => "pro guitar (17 fret)",
            Self::ProGuitar22 => "pro guitar (22 fret)",
            Self::ProBass17 => "pro bass (17 fret)",
            Self::ProBass22 => "pro bass (22 fret)",
            Self::Vocals => "vocals",
        };
        f.write_str(name)
    }
}

/// A difficulty level of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// The easiest.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
    /// The hardest.
    Expert,
}

impl Difficulty {
    /// All difficulties, from the easiest.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// The rule set an instrument is played with. It decides how raw notes and flags are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// Five frets plus open notes.
    Guitar,
    /// Six frets in two rows plus open notes.
    GhlGuitar,
    /// Drum pads and the kick pedal.
    Drums,
    /// Six strings with frets.
    ProGuitar,
    /// Pitched vocals and percussion.
    Vocals,
}

impl GameMode {
    /// Returns the flags a note of this mode may carry.
    #[must_use]
    pub const fn allowed_flags(self) -> NoteFlags {
        match self {
            Self::Guitar | Self::GhlGuitar => NoteFlags::FORCED.union(NoteFlags::TAP),
            Self::Drums => NoteFlags::INSTRUMENT_PLUS
                .union(NoteFlags::CYMBAL)
                .union(NoteFlags::ACCENT)
                .union(NoteFlags::GHOST),
            Self::ProGuitar => NoteFlags::FORCED.union(NoteFlags::MUTED),
            Self::Vocals => NoteFlags::PERCUSSION,
        }
    }

    /// Returns the raw index of the open note, if the mode has one.
    #[must_use]
    pub const fn open_note(self) -> Option<u32> {
        match self {
            Self::Guitar => Some(super::GuitarFret::Open.raw()),
            Self::GhlGuitar => Some(super::GhlFret::Open.raw()),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Guitar => "guitar",
            Self::GhlGuitar => "guitar (6 fret)",
            Self::Drums => "drums",
            Self::ProGuitar => "pro guitar",
            Self::Vocals => "vocals",
        };
        f.write_str(name)
    }
}

/// The layout of a drum kit, which decides how the orange and green pads are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrumsType {
    /// Not decided yet. Readers infer it from the notes.
    #[default]
    Unknown,
    /// Four pads with optional cymbals.
    FourLane,
    /// Five pads without cymbal markers.
    FiveLane,
}

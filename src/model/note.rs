//! Notes, their flag set and the raw note indices of each game mode.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use super::Tick;

/// A set of per-note modifiers.
///
/// Which flags may be set depends on the game mode of the owning chart, see
/// [`GameMode::allowed_flags`](super::GameMode::allowed_flags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteFlags(u16);

impl NoteFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Guitar: inverts the natural strum/HOPO state of the note.
    pub const FORCED: Self = Self(1 << 0);
    /// Guitar: the note is a tap note.
    pub const TAP: Self = Self(1 << 1);
    /// Pro guitar: the string is muted.
    pub const MUTED: Self = Self(1 << 3);
    /// Vocals: the note is a percussion hit instead of a pitch.
    pub const PERCUSSION: Self = Self(1 << 4);
    /// Drums: the pad is a cymbal.
    pub const CYMBAL: Self = Self(1 << 6);
    /// Drums: an expert+ note, such as a double kick.
    pub const INSTRUMENT_PLUS: Self = Self(1 << 7);
    /// Drums: the double kick, an alias of [`Self::INSTRUMENT_PLUS`].
    pub const DOUBLE_KICK: Self = Self::INSTRUMENT_PLUS;
    /// Drums: the hit is accented.
    pub const ACCENT: Self = Self(1 << 12);
    /// Drums: the hit is a ghost note.
    pub const GHOST: Self = Self(1 << 13);

    const NAMES: [(Self, &'static str); 8] = [
        (Self::FORCED, "FORCED"),
        (Self::TAP, "TAP"),
        (Self::MUTED, "MUTED"),
        (Self::PERCUSSION, "PERCUSSION"),
        (Self::CYMBAL, "CYMBAL"),
        (Self::INSTRUMENT_PLUS, "INSTRUMENT_PLUS"),
        (Self::ACCENT, "ACCENT"),
        (Self::GHOST, "GHOST"),
    ];

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Creates a set from raw bits, dropping unknown bits.
    #[must_use]
    pub const fn from_bits_truncate(bits: u16) -> Self {
        const KNOWN: u16 = NoteFlags::FORCED.0
            | NoteFlags::TAP.0
            | NoteFlags::MUTED.0
            | NoteFlags::PERCUSSION.0
            | NoteFlags::CYMBAL.0
            | NoteFlags::INSTRUMENT_PLUS.0
            | NoteFlags::ACCENT.0
            | NoteFlags::GHOST.0;
        Self(bits & KNOWN)
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether all flags of `other` are set. An empty `other` is never contained.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Whether any flag of `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the flags of `self` not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Sets the flags of `other`.
    pub const fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the flags of `other`.
    pub const fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Flips the flags of `other`.
    pub const fn toggle(&mut self, other: Self) {
        self.0 ^= other.0;
    }

    /// Iterates the single flags set in `self`.
    pub fn iter(self) -> impl Iterator<Item = Self> {
        Self::NAMES
            .into_iter()
            .map(|(flag, _)| flag)
            .filter(move |&flag| self.contains(flag))
    }
}

impl BitOr for NoteFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for NoteFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl BitAnd for NoteFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for NoteFlags {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits_truncate(!self.0)
    }
}

impl std::fmt::Display for NoteFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if !self.contains(flag) {
                continue;
            }
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

/// A note of a chart.
///
/// The derived ordering is the canonical one: tick, then raw index, then flags, then length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Where the note starts.
    pub tick: Tick,
    /// The raw note index. Its meaning depends on the game mode, see [`GuitarFret`], [`GhlFret`],
    /// [`DrumPad`] and [`ProGuitarString::raw_note`]. Vocal notes carry their MIDI pitch.
    pub raw: u32,
    /// The modifiers of the note.
    pub flags: NoteFlags,
    /// The sustain length, may be 0.
    pub length: Tick,
}

impl Note {
    /// Creates a note without flags.
    #[must_use]
    pub const fn new(tick: Tick, raw: u32, length: Tick) -> Self {
        Self {
            tick,
            raw,
            flags: NoteFlags::NONE,
            length,
        }
    }

    /// Replaces the flags of the note.
    #[must_use]
    pub const fn with_flags(mut self, flags: NoteFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The tick where the sustain ends.
    #[must_use]
    pub const fn end_tick(&self) -> Tick {
        self.tick.saturating_add(self.length)
    }
}

macro_rules! raw_note_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value,)*
        }

        impl $name {
            /// All the variants in ascending raw order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Returns the raw note index.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self as u32
            }

            /// Converts from the raw note index.
            #[must_use]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $(x if x == $value => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

raw_note_enum! {
    /// Lanes of five-fret guitar charts.
    pub enum GuitarFret {
        /// The first lane.
        Green = 0,
        /// The second lane.
        Red = 1,
        /// The third lane.
        Yellow = 2,
        /// The fourth lane.
        Blue = 3,
        /// The fifth lane.
        Orange = 4,
        /// The strum without any fret.
        Open = 5,
    }
}

raw_note_enum! {
    /// Pads of drums charts.
    pub enum DrumPad {
        /// The first pad.
        Red = 0,
        /// The second pad, a hi-hat when a cymbal.
        Yellow = 1,
        /// The third pad, a ride when a cymbal.
        Blue = 2,
        /// The fourth pad, a crash when a cymbal.
        Orange = 3,
        /// The fifth lane of five-lane kits.
        Green = 4,
        /// The kick pedal.
        Kick = 5,
    }
}

raw_note_enum! {
    /// Frets of six-fret guitar charts.
    pub enum GhlFret {
        /// The first lower fret.
        Black1 = 0,
        /// The second lower fret.
        Black2 = 1,
        /// The third lower fret.
        Black3 = 2,
        /// The first upper fret.
        White1 = 3,
        /// The second upper fret.
        White2 = 4,
        /// The third upper fret.
        White3 = 5,
        /// The strum without any fret.
        Open = 6,
    }
}

raw_note_enum! {
    /// Strings of pro guitar charts, from the lowest.
    pub enum ProGuitarString {
        /// The 6th string.
        Red = 0,
        /// The 5th string.
        Green = 1,
        /// The 4th string.
        Orange = 2,
        /// The 3rd string.
        Blue = 3,
        /// The 2nd string.
        Yellow = 4,
        /// The 1st string.
        Purple = 5,
    }
}

impl ProGuitarString {
    const FRET_SHIFT: u32 = 3;
    const STRING_MASK: u32 = (1 << Self::FRET_SHIFT) - 1;

    /// Encodes the string and fret into a raw note index.
    #[must_use]
    pub const fn raw_note(self, fret: u8) -> u32 {
        ((fret as u32) << Self::FRET_SHIFT) | self.raw()
    }

    /// Decodes a raw note index made by [`Self::raw_note`] into the string and fret.
    #[must_use]
    pub const fn split_raw_note(raw: u32) -> Option<(Self, u8)> {
        match Self::from_raw(raw & Self::STRING_MASK) {
            Some(string) => Some((string, (raw >> Self::FRET_SHIFT) as u8)),
            None => None,
        }
    }
}

//! The note number tables of the MIDI format, per game mode, and the track names.

use crate::model::{
    Difficulty, DrumPad, GameMode, GhlFret, GuitarFret, Instrument, NoteFlags, PhraseKind,
    ProGuitarString,
};

/// The track holding the global events.
pub const EVENTS_TRACK: &str = "EVENTS";
/// The track holding the vocals, whose lyrics also become global events.
pub const VOCALS_TRACK: &str = "PART VOCALS";

const EXCLUDED_TRACKS: [&str; 2] = ["BEAT", "VENUE"];

/// How a track replaces an instrument read from an earlier track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackPriority {
    /// The track replaces the charts read before.
    Override,
    /// The track is skipped when the instrument is already read.
    KeepExisting,
}

const INSTRUMENT_TRACKS: [(&str, Instrument, TrackPriority); 17] = [
    ("PART GUITAR", Instrument::Guitar, TrackPriority::Override),
    ("T1 GEMS", Instrument::Guitar, TrackPriority::KeepExisting),
    ("PART GUITAR COOP", Instrument::GuitarCoop, TrackPriority::KeepExisting),
    ("PART BASS", Instrument::Bass, TrackPriority::KeepExisting),
    ("PART RHYTHM", Instrument::Rhythm, TrackPriority::KeepExisting),
    ("PART KEYS", Instrument::Keys, TrackPriority::KeepExisting),
    ("PART DRUMS", Instrument::Drums, TrackPriority::Override),
    ("PART REAL_DRUMS_PS", Instrument::Drums, TrackPriority::KeepExisting),
    ("PART GUITAR GHL", Instrument::GhlGuitar, TrackPriority::KeepExisting),
    ("PART BASS GHL", Instrument::GhlBass, TrackPriority::KeepExisting),
    ("PART RHYTHM GHL", Instrument::GhlRhythm, TrackPriority::KeepExisting),
    ("PART GUITAR COOP GHL", Instrument::GhlCoop, TrackPriority::KeepExisting),
    ("PART REAL_GUITAR", Instrument::ProGuitar17, TrackPriority::KeepExisting),
    ("PART REAL_GUITAR_22", Instrument::ProGuitar22, TrackPriority::KeepExisting),
    ("PART REAL_BASS", Instrument::ProBass17, TrackPriority::KeepExisting),
    ("PART REAL_BASS_22", Instrument::ProBass22, TrackPriority::KeepExisting),
    (VOCALS_TRACK, Instrument::Vocals, TrackPriority::KeepExisting),
];

/// What a named track holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// The global events and sections.
    Events,
    /// The charts of an instrument.
    Instrument {
        /// The instrument.
        instrument: Instrument,
        /// Whether the track replaces an earlier one of the same instrument.
        priority: TrackPriority,
    },
    /// A known track with nothing to read.
    Excluded,
}

/// Looks up a track by its name, compared in upper case.
#[must_use]
pub fn track_kind(name: &str) -> Option<TrackKind> {
    let name = name.to_uppercase();
    if name == EVENTS_TRACK {
        return Some(TrackKind::Events);
    }
    if EXCLUDED_TRACKS.contains(&name.as_str()) {
        return Some(TrackKind::Excluded);
    }
    INSTRUMENT_TRACKS
        .iter()
        .find(|&&(track, _, _)| track == name)
        .map(|&(_, instrument, priority)| TrackKind::Instrument {
            instrument,
            priority,
        })
}

/// The text event making the guitar tables read the note below green as an open note.
pub const ENHANCED_OPENS: &str = "ENHANCED_OPENS";
/// The text event making the drum tables read the velocity as accents and ghosts.
pub const CHART_DYNAMICS: &str = "ENABLE_CHART_DYNAMICS";

/// Note velocity of an accented drum hit, under [`CHART_DYNAMICS`].
pub const VELOCITY_ACCENT: u8 = 127;
/// Note velocity of a ghost drum hit, under [`CHART_DYNAMICS`].
pub const VELOCITY_GHOST: u8 = 1;
/// Pro guitar frets are written as this plus the fret number in the note velocity.
pub const PRO_GUITAR_FRET_VELOCITY: u8 = 100;
/// The channel of muted pro guitar notes.
pub const PRO_GUITAR_MUTED_CHANNEL: u8 = 3;

const SOLO: u8 = 103;
const PRO_GUITAR_SOLO: u8 = 115;
const TAP: u8 = 104;
const VERSUS_PLAYER_1: u8 = 105;
const VERSUS_PLAYER_2: u8 = 106;
const YELLOW_TOM: u8 = 110;
const BLUE_TOM: u8 = 111;
const ORANGE_TOM: u8 = 112;
const STARPOWER: u8 = 116;
const DRUM_FILLS: std::ops::RangeInclusive<u8> = 120..=124;
const TREMOLO_LANE: u8 = 126;
const TRILL_LANE: u8 = 127;
const VOCAL_PITCHES: std::ops::RangeInclusive<u8> = 36..=84;
const VOCAL_PERCUSSION: u8 = 96;

/// The note type a forcing marker asks for, resolved once the whole track is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForcedType {
    /// The notes must be strummed.
    Strum,
    /// The notes must be hammer-ons or pull-offs.
    Hopo,
    /// The notes must be tapped.
    Tap,
}

/// What a MIDI note number of a track means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MidiAction {
    /// Adds a note to one difficulty.
    Note {
        /// The difficulty of the note.
        difficulty: Difficulty,
        /// The raw index of the note.
        raw: u32,
        /// The flags the note starts with.
        flags: NoteFlags,
    },
    /// Adds a pro guitar note, its fret given by the velocity.
    ProGuitarNote {
        /// The difficulty of the note.
        difficulty: Difficulty,
        /// The string of the note.
        string: ProGuitarString,
    },
    /// Adds a note to every difficulty.
    SharedNote {
        /// The raw index of the note.
        raw: u32,
        /// The flags the note starts with.
        flags: NoteFlags,
    },
    /// Adds a phrase to every difficulty.
    Phrase(PhraseKind),
    /// Adds a versus phrase and a lyric phrase to every difficulty.
    VocalPhrase(PhraseKind),
    /// Forces the type of the notes under the marker.
    Forced {
        /// The difficulty affected, or every one.
        difficulty: Option<Difficulty>,
        /// The requested type.
        kind: ForcedType,
    },
    /// Toggles the cymbal flag of the notes with a raw index under the marker.
    CymbalToggle {
        /// The raw index of the pad.
        raw: u32,
    },
}

const GUITAR_BASES: [(Difficulty, u8); 4] = [
    (Difficulty::Easy, 60),
    (Difficulty::Medium, 72),
    (Difficulty::Hard, 84),
    (Difficulty::Expert, 96),
];

const GHL_BASES: [(Difficulty, u8); 4] = [
    (Difficulty::Easy, 58),
    (Difficulty::Medium, 70),
    (Difficulty::Hard, 82),
    (Difficulty::Expert, 94),
];

const PRO_GUITAR_BASES: [(Difficulty, u8); 4] = [
    (Difficulty::Easy, 24),
    (Difficulty::Medium, 48),
    (Difficulty::Hard, 72),
    (Difficulty::Expert, 96),
];

const DRUM_LANES: [DrumPad; 6] = [
    DrumPad::Kick,
    DrumPad::Red,
    DrumPad::Yellow,
    DrumPad::Blue,
    DrumPad::Orange,
    DrumPad::Green,
];

const GHL_LANES: [GhlFret; 7] = [
    GhlFret::Open,
    GhlFret::White1,
    GhlFret::White2,
    GhlFret::White3,
    GhlFret::Black1,
    GhlFret::Black2,
    GhlFret::Black3,
];

/// The switches a track turns on with text events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableMode {
    /// Whether [`ENHANCED_OPENS`] was seen.
    pub enhanced_opens: bool,
    /// Whether [`CHART_DYNAMICS`] was seen.
    pub dynamics: bool,
}

/// Splits a note number into a difficulty and an offset from its base. Offsets may be negative
/// down to -1, for the notes just below a base.
fn split_key(bases: &[(Difficulty, u8); 4], key: u8) -> Option<(Difficulty, i16)> {
    bases.iter().rev().find_map(|&(difficulty, base)| {
        let offset = i16::from(key) - i16::from(base);
        (offset >= -1).then_some((difficulty, offset))
    })
}

/// Looks up a note number in the table of a game mode.
#[must_use]
pub fn note_action(mode: GameMode, key: u8, table_mode: TableMode) -> Option<MidiAction> {
    match mode {
        GameMode::Guitar => guitar_action(key, table_mode.enhanced_opens),
        GameMode::GhlGuitar => ghl_action(key),
        GameMode::ProGuitar => pro_guitar_action(key),
        GameMode::Drums => drums_action(key),
        GameMode::Vocals => vocals_action(key),
    }
}

const fn note(difficulty: Difficulty, raw: u32, flags: NoteFlags) -> Option<MidiAction> {
    Some(MidiAction::Note {
        difficulty,
        raw,
        flags,
    })
}

const fn forced(difficulty: Difficulty, kind: ForcedType) -> Option<MidiAction> {
    Some(MidiAction::Forced {
        difficulty: Some(difficulty),
        kind,
    })
}

fn guitar_action(key: u8, enhanced_opens: bool) -> Option<MidiAction> {
    match key {
        STARPOWER => Some(MidiAction::Phrase(PhraseKind::Starpower)),
        SOLO => Some(MidiAction::Phrase(PhraseKind::Solo)),
        TAP => Some(MidiAction::Forced {
            difficulty: None,
            kind: ForcedType::Tap,
        }),
        VERSUS_PLAYER_1 => Some(MidiAction::Phrase(PhraseKind::VersusPlayer1)),
        VERSUS_PLAYER_2 => Some(MidiAction::Phrase(PhraseKind::VersusPlayer2)),
        TREMOLO_LANE => Some(MidiAction::Phrase(PhraseKind::TremoloLane)),
        TRILL_LANE => Some(MidiAction::Phrase(PhraseKind::TrillLane)),
        _ => {
            let (difficulty, offset) = split_key(&GUITAR_BASES, key)?;
            match offset {
                -1 if enhanced_opens => note(difficulty, GuitarFret::Open.raw(), NoteFlags::NONE),
                0..=4 => note(difficulty, offset as u32, NoteFlags::NONE),
                5 => forced(difficulty, ForcedType::Hopo),
                6 => forced(difficulty, ForcedType::Strum),
                _ => None,
            }
        }
    }
}

fn ghl_action(key: u8) -> Option<MidiAction> {
    match key {
        STARPOWER => Some(MidiAction::Phrase(PhraseKind::Starpower)),
        SOLO => Some(MidiAction::Phrase(PhraseKind::Solo)),
        TAP => Some(MidiAction::Forced {
            difficulty: None,
            kind: ForcedType::Tap,
        }),
        _ => {
            let (difficulty, offset) = split_key(&GHL_BASES, key)?;
            match offset {
                7 => forced(difficulty, ForcedType::Hopo),
                8 => forced(difficulty, ForcedType::Strum),
                _ => {
                    let fret = GHL_LANES.get(usize::try_from(offset).ok()?)?;
                    note(difficulty, fret.raw(), NoteFlags::NONE)
                }
            }
        }
    }
}

fn pro_guitar_action(key: u8) -> Option<MidiAction> {
    match key {
        STARPOWER => Some(MidiAction::Phrase(PhraseKind::Starpower)),
        PRO_GUITAR_SOLO => Some(MidiAction::Phrase(PhraseKind::Solo)),
        TREMOLO_LANE => Some(MidiAction::Phrase(PhraseKind::TremoloLane)),
        TRILL_LANE => Some(MidiAction::Phrase(PhraseKind::TrillLane)),
        _ => {
            let (difficulty, offset) = split_key(&PRO_GUITAR_BASES, key)?;
            match offset {
                6 => forced(difficulty, ForcedType::Hopo),
                _ => {
                    let string = ProGuitarString::from_raw(u32::try_from(offset).ok()?)?;
                    Some(MidiAction::ProGuitarNote { difficulty, string })
                }
            }
        }
    }
}

fn drums_action(key: u8) -> Option<MidiAction> {
    match key {
        STARPOWER => Some(MidiAction::Phrase(PhraseKind::Starpower)),
        SOLO => Some(MidiAction::Phrase(PhraseKind::Solo)),
        VERSUS_PLAYER_1 => Some(MidiAction::Phrase(PhraseKind::VersusPlayer1)),
        VERSUS_PLAYER_2 => Some(MidiAction::Phrase(PhraseKind::VersusPlayer2)),
        TREMOLO_LANE => Some(MidiAction::Phrase(PhraseKind::TremoloLane)),
        TRILL_LANE => Some(MidiAction::Phrase(PhraseKind::TrillLane)),
        YELLOW_TOM => Some(MidiAction::CymbalToggle {
            raw: DrumPad::Yellow.raw(),
        }),
        BLUE_TOM => Some(MidiAction::CymbalToggle {
            raw: DrumPad::Blue.raw(),
        }),
        ORANGE_TOM => Some(MidiAction::CymbalToggle {
            raw: DrumPad::Orange.raw(),
        }),
        key if DRUM_FILLS.contains(&key) => Some(MidiAction::Phrase(PhraseKind::DrumFill)),
        _ => {
            let (difficulty, offset) = split_key(&GUITAR_BASES, key)?;
            if offset == -1 {
                return note(difficulty, DrumPad::Kick.raw(), NoteFlags::DOUBLE_KICK);
            }
            let pad = *DRUM_LANES.get(usize::try_from(offset).ok()?)?;
            let flags = match pad {
                DrumPad::Yellow | DrumPad::Blue | DrumPad::Orange => NoteFlags::CYMBAL,
                _ => NoteFlags::NONE,
            };
            note(difficulty, pad.raw(), flags)
        }
    }
}

fn vocals_action(key: u8) -> Option<MidiAction> {
    match key {
        STARPOWER => Some(MidiAction::Phrase(PhraseKind::Starpower)),
        VERSUS_PLAYER_1 => Some(MidiAction::VocalPhrase(PhraseKind::VersusPlayer1)),
        VERSUS_PLAYER_2 => Some(MidiAction::VocalPhrase(PhraseKind::VersusPlayer2)),
        VOCAL_PERCUSSION => Some(MidiAction::SharedNote {
            raw: 0,
            flags: NoteFlags::PERCUSSION,
        }),
        key if VOCAL_PITCHES.contains(&key) => Some(MidiAction::SharedNote {
            raw: u32::from(key),
            flags: NoteFlags::NONE,
        }),
        _ => None,
    }
}

/// Whether a note number is one of the lyric phrase markers of vocals tracks.
#[must_use]
pub const fn is_lyric_phrase(key: u8) -> bool {
    matches!(key, VERSUS_PLAYER_1 | VERSUS_PLAYER_2)
}

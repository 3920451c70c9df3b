//! The code tables of the text chart format, per game mode, and the section names of the charts.

use crate::model::{
    Difficulty, DrumPad, GameMode, GhlFret, GuitarFret, Instrument, NoteFlags, PhraseKind,
};

/// What a note code of a track means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteAction {
    /// Adds a note.
    Note {
        /// The raw index of the note.
        raw: u32,
        /// The flags the note starts with.
        flags: NoteFlags,
    },
    /// Queues a flag for every note at the tick.
    ChordFlag {
        /// The flag.
        flag: NoteFlags,
    },
    /// Queues a flag for the notes with a raw index at the tick.
    ToggleFlag {
        /// The raw index of the targeted notes.
        raw: u32,
        /// The flag.
        flag: NoteFlags,
    },
}

const fn note(raw: u32) -> Option<NoteAction> {
    Some(NoteAction::Note {
        raw,
        flags: NoteFlags::NONE,
    })
}

const fn toggle(raw: u32, flag: NoteFlags) -> Option<NoteAction> {
    Some(NoteAction::ToggleFlag { raw, flag })
}

/// The note code forcing the strum state of a chord.
pub const FORCED_CODE: u32 = 5;
/// The note code making a chord tap notes.
pub const TAP_CODE: u32 = 6;
/// The note code of the double kick.
pub const DOUBLE_KICK_CODE: u32 = 32;
/// Accent codes are this plus the pad code, from red.
pub const ACCENT_OFFSET: u32 = 33;
/// Ghost codes are this plus the pad code, from red.
pub const GHOST_OFFSET: u32 = 39;
/// Cymbal codes are this plus the pad code, for yellow, blue and orange.
pub const CYMBAL_OFFSET: u32 = 64;

const GUITAR_FRETS: [(u32, GuitarFret); 6] = [
    (0, GuitarFret::Green),
    (1, GuitarFret::Red),
    (2, GuitarFret::Yellow),
    (3, GuitarFret::Blue),
    (4, GuitarFret::Orange),
    (7, GuitarFret::Open),
];

const GHL_FRETS: [(u32, GhlFret); 7] = [
    (0, GhlFret::White1),
    (1, GhlFret::White2),
    (2, GhlFret::White3),
    (3, GhlFret::Black1),
    (4, GhlFret::Black2),
    (8, GhlFret::Black3),
    (7, GhlFret::Open),
];

const DRUM_PADS: [(u32, DrumPad); 6] = [
    (0, DrumPad::Kick),
    (1, DrumPad::Red),
    (2, DrumPad::Yellow),
    (3, DrumPad::Blue),
    (4, DrumPad::Orange),
    (5, DrumPad::Green),
];

/// Looks up a note code. Modes without a text format have no codes.
#[must_use]
pub fn note_action(mode: GameMode, code: u32) -> Option<NoteAction> {
    match mode {
        GameMode::Guitar => match code {
            FORCED_CODE => Some(NoteAction::ChordFlag {
                flag: NoteFlags::FORCED,
            }),
            TAP_CODE => Some(NoteAction::ChordFlag {
                flag: NoteFlags::TAP,
            }),
            _ => lookup(&GUITAR_FRETS, code).and_then(|fret| note(fret.raw())),
        },
        GameMode::GhlGuitar => match code {
            FORCED_CODE => Some(NoteAction::ChordFlag {
                flag: NoteFlags::FORCED,
            }),
            TAP_CODE => Some(NoteAction::ChordFlag {
                flag: NoteFlags::TAP,
            }),
            _ => lookup(&GHL_FRETS, code).and_then(|fret| note(fret.raw())),
        },
        GameMode::Drums => drums_action(code),
        GameMode::ProGuitar | GameMode::Vocals => None,
    }
}

fn drums_action(code: u32) -> Option<NoteAction> {
    match code {
        DOUBLE_KICK_CODE => Some(NoteAction::Note {
            raw: DrumPad::Kick.raw(),
            flags: NoteFlags::INSTRUMENT_PLUS,
        }),
        66..=68 => lookup(&DRUM_PADS, code - CYMBAL_OFFSET)
            .and_then(|pad| toggle(pad.raw(), NoteFlags::CYMBAL)),
        34..=38 => lookup(&DRUM_PADS, code - ACCENT_OFFSET)
            .and_then(|pad| toggle(pad.raw(), NoteFlags::ACCENT)),
        40..=44 => lookup(&DRUM_PADS, code - GHOST_OFFSET)
            .and_then(|pad| toggle(pad.raw(), NoteFlags::GHOST)),
        _ => lookup(&DRUM_PADS, code).and_then(|pad| note(pad.raw())),
    }
}

fn lookup<T: Copy>(table: &[(u32, T)], code: u32) -> Option<T> {
    table
        .iter()
        .find(|&&(entry, _)| entry == code)
        .map(|&(_, value)| value)
}

fn reverse<T: Copy + PartialEq>(table: &[(u32, T)], value: T) -> Option<u32> {
    table
        .iter()
        .find(|&&(_, entry)| entry == value)
        .map(|&(code, _)| code)
}

/// Returns the code of a note by its raw index, the reverse of [`note_action`] for plain notes.
#[must_use]
pub fn note_code(mode: GameMode, raw: u32) -> Option<u32> {
    match mode {
        GameMode::Guitar => reverse(&GUITAR_FRETS, GuitarFret::from_raw(raw)?),
        GameMode::GhlGuitar => reverse(&GHL_FRETS, GhlFret::from_raw(raw)?),
        GameMode::Drums => reverse(&DRUM_PADS, DrumPad::from_raw(raw)?),
        GameMode::ProGuitar | GameMode::Vocals => None,
    }
}

/// Looks up a phrase code.
#[must_use]
pub const fn phrase_kind(mode: GameMode, code: u32) -> Option<PhraseKind> {
    match (mode, code) {
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, 0) => {
            Some(PhraseKind::VersusPlayer1)
        }
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, 1) => {
            Some(PhraseKind::VersusPlayer2)
        }
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, 2) => {
            Some(PhraseKind::Starpower)
        }
        (GameMode::Drums, 64) => Some(PhraseKind::DrumFill),
        (GameMode::Drums, 65) => Some(PhraseKind::TremoloLane),
        (GameMode::Drums, 66) => Some(PhraseKind::TrillLane),
        _ => None,
    }
}

/// Returns the code of a phrase, the reverse of [`phrase_kind`].
#[must_use]
pub const fn phrase_code(mode: GameMode, kind: PhraseKind) -> Option<u32> {
    match (mode, kind) {
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, PhraseKind::VersusPlayer1) => {
            Some(0)
        }
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, PhraseKind::VersusPlayer2) => {
            Some(1)
        }
        (GameMode::Guitar | GameMode::GhlGuitar | GameMode::Drums, PhraseKind::Starpower) => {
            Some(2)
        }
        (GameMode::Drums, PhraseKind::DrumFill) => Some(64),
        (GameMode::Drums, PhraseKind::TremoloLane) => Some(65),
        (GameMode::Drums, PhraseKind::TrillLane) => Some(66),
        _ => None,
    }
}

const INSTRUMENT_NAMES: [(&str, Instrument); 10] = [
    ("Single", Instrument::Guitar),
    ("DoubleGuitar", Instrument::GuitarCoop),
    ("DoubleBass", Instrument::Bass),
    ("DoubleRhythm", Instrument::Rhythm),
    ("Drums", Instrument::Drums),
    ("Keyboard", Instrument::Keys),
    ("GHLGuitar", Instrument::GhlGuitar),
    ("GHLBass", Instrument::GhlBass),
    ("GHLRhythm", Instrument::GhlRhythm),
    ("GHLCoop", Instrument::GhlCoop),
];

const DIFFICULTY_NAMES: [(&str, Difficulty); 4] = [
    ("Easy", Difficulty::Easy),
    ("Medium", Difficulty::Medium),
    ("Hard", Difficulty::Hard),
    ("Expert", Difficulty::Expert),
];

/// Reads a chart section name such as `ExpertSingle`.
#[must_use]
pub fn chart_key(section: &str) -> Option<(Instrument, Difficulty)> {
    DIFFICULTY_NAMES.iter().find_map(|&(prefix, difficulty)| {
        let rest = section.strip_prefix(prefix)?;
        INSTRUMENT_NAMES
            .iter()
            .find(|&&(name, _)| name == rest)
            .map(|&(_, instrument)| (instrument, difficulty))
    })
}

/// Returns the section name of a chart, if the instrument has a text format.
#[must_use]
pub fn section_name(instrument: Instrument, difficulty: Difficulty) -> Option<String> {
    let (name, _) = INSTRUMENT_NAMES
        .iter()
        .find(|&&(_, entry)| entry == instrument)?;
    let (prefix, _) = DIFFICULTY_NAMES
        .iter()
        .find(|&&(_, entry)| entry == difficulty)?;
    Some(format!("{prefix}{name}"))
}

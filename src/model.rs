//! The chart object model shared by the text and MIDI readers.
//!
//! A [`Song`] owns the song metadata, the [`SyncTrack`], the global text events and one [`Chart`]
//! per instrument and difficulty. Every collection is keyed by [`Tick`], and is sorted in the
//! canonical order once a reader has finished the deferred resolution of a track.

pub mod chart;
pub mod event;
pub mod instrument;
pub mod metadata;
pub mod note;
pub mod phrase;
pub mod song;
pub mod sync;

pub use self::{
    chart::{Chart, UnrecognizedChart},
    event::TextEvent,
    instrument::{Difficulty, DrumsType, GameMode, Instrument},
    metadata::Metadata,
    note::{DrumPad, GhlFret, GuitarFret, Note, NoteFlags, ProGuitarString},
    phrase::{Phrase, PhraseKind},
    song::Song,
    sync::{
        MeasurePosition, SyncTrack, SyncTrackError, SyncWarning, TempoChange, TimeSignatureChange,
    },
};

/// The pulse unit of every chart object. Its length in time depends on the song resolution and the tempo map.
pub type Tick = u32;

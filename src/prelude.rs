//! Prelude module for the crate.
//!
//! This module re-exports the public types of the readers and the model for convenient access.
//! You can use `use chart_rs::prelude::*;` to import them at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{ToAriadne, emit_chart_warnings};
pub use crate::diagnostics::SimpleSource;

pub use crate::{
    chart::{
        ChartError, ChartOutput, ChartWarning, LexWarning, LexWarningWithRange, parse_chart,
        parse_chart_bytes, write_chart,
    },
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{
        Chart, Difficulty, DrumPad, DrumsType, GameMode, GhlFret, GuitarFret, Instrument,
        MeasurePosition, Metadata, Note, NoteFlags, Phrase, PhraseKind, ProGuitarString, Song,
        SyncTrack, SyncTrackError, SyncWarning, TempoChange, TextEvent, Tick,
        TimeSignatureChange, UnrecognizedChart,
    },
    resolve::ResolveWarning,
    settings::{ParseSettings, default_settings},
};

#[cfg(feature = "midi")]
pub use crate::midi::{MidiError, MidiOutput, MidiWarning, parse_midi};

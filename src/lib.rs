//! The rhythm game chart parser.
//!
//! This crate reads the two legacy chart formats authored for five-fret, six-fret and drum rhythm
//! games, and normalizes both into one object model:
//!
//! - [`chart`] parses the line-oriented text format (`.chart`) and writes it back.
//! - [`midi`] parses the Standard MIDI File format (`.mid`), via the `midly` crate.
//!
//! Both readers classify raw numbered events per game mode, queue flag modifiers until a whole
//! track is read, and then run the [`resolve`] pipeline: flag application with conflict rules, solo
//! marker pairing and drum kit disambiguation. The result is a [`model::Song`].
//!
//! Malformed lines never abort a parse. They are reported as warnings next to the parsed song, and
//! only a few checks (resolution, byte encoding, MIDI timing) are fatal.
//!
//! # Example
//!
//! ```
//! use chart_rs::prelude::*;
//!
//! let source = "[Song]\n{\n  Resolution = 192\n}\n[ExpertSingle]\n{\n  0 = N 0 0\n  0 = N 5 0\n}\n";
//! let ChartOutput { song, warnings } = parse_chart(source, &ParseSettings::default()).unwrap();
//! assert!(warnings.is_empty());
//! let chart = song.chart(Instrument::Guitar, Difficulty::Expert).unwrap();
//! assert!(chart.notes[0].flags.contains(NoteFlags::FORCED));
//! ```
//!
//! # Features
//!
//! - `midi` (default): enables the [`midi`] reader.
//! - `diagnostics` (default): enables [`ariadne`](https://docs.rs/ariadne) rendering of warnings in [`diagnostics`].
//! - `serde`: derives `Serialize`/`Deserialize` on the model, warnings and settings.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chart;
pub mod diagnostics;
#[cfg(feature = "midi")]
pub mod midi;
pub mod mixin;
pub mod model;
pub mod prelude;
pub mod resolve;
pub mod settings;

//! Reading the events of an instrument track into one chart per difficulty.
//!
//! Notes come as note-on and note-off pairs matched by key and channel. Each pair is looked up in
//! the tables of [`super::table`] once it closes. Forcing and tom markers span ranges of notes, so
//! they are queued and applied after the whole track is read, like the flag queue of the text
//! reader.

use std::{collections::BTreeMap, ops::Range};

use midly::{MetaMessage, MidiMessage, TrackEvent, TrackEventKind};

use super::{
    MidiWarning, decode_text, strip_brackets,
    table::{
        CHART_DYNAMICS, ENHANCED_OPENS, ForcedType, MidiAction, PRO_GUITAR_FRET_VELOCITY,
        PRO_GUITAR_MUTED_CHANNEL, TableMode, VELOCITY_ACCENT, VELOCITY_GHOST, note_action,
    },
};
use crate::{
    model::{
        Chart, Difficulty, DrumPad, GameMode, Instrument, Note, NoteFlags, Phrase, PhraseKind,
        TextEvent, Tick,
    },
    settings::ParseSettings,
};

/// The instruments whose solo phrases are read as star power when a track has no star power.
const LEGACY_STAR_POWER_INSTRUMENTS: [Instrument; 4] = [
    Instrument::Guitar,
    Instrument::GuitarCoop,
    Instrument::Bass,
    Instrument::Rhythm,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNote {
    key: u8,
    channel: u8,
    velocity: u8,
    tick: Tick,
}

/// A marker applied to a range of notes after the track is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeRequest {
    Forced {
        difficulty: Option<Difficulty>,
        kind: ForcedType,
        ticks: (Tick, Tick),
    },
    CymbalToggle {
        raw: u32,
        ticks: (Tick, Tick),
    },
}

/// The state of one instrument track being read.
#[derive(Debug)]
pub struct TrackReader<'a> {
    instrument: Instrument,
    mode: GameMode,
    settings: &'a ParseSettings,
    resolution: u32,
    charts: BTreeMap<Difficulty, Chart>,
    open_notes: Vec<OpenNote>,
    requests: Vec<RangeRequest>,
    table_mode: TableMode,
}

impl<'a> TrackReader<'a> {
    /// Creates a reader for the track of an instrument.
    #[must_use]
    pub fn new(instrument: Instrument, settings: &'a ParseSettings, resolution: u32) -> Self {
        Self {
            instrument,
            mode: instrument.game_mode(),
            settings,
            resolution,
            charts: Difficulty::ALL
                .iter()
                .map(|&difficulty| (difficulty, Chart::new(instrument, difficulty)))
                .collect(),
            open_notes: Vec::new(),
            requests: Vec::new(),
            table_mode: TableMode::default(),
        }
    }

    /// Reads the events of the track, with absolute ticks accumulated from the deltas.
    pub fn read(&mut self, events: &[TrackEvent<'_>], warnings: &mut Vec<MidiWarning>) {
        let mut tick: Tick = 0;
        for event in events {
            tick = tick.saturating_add(event.delta.as_int());
            match event.kind {
                TrackEventKind::Midi { channel, message } => {
                    let channel = channel.as_int();
                    match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            self.note_on(key.as_int(), channel, vel.as_int(), tick, warnings);
                        }
                        MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                            self.note_off(key.as_int(), channel, tick, warnings);
                        }
                        _ => {}
                    }
                }
                TrackEventKind::Meta(
                    MetaMessage::Text(text)
                    | MetaMessage::Lyric(text)
                    | MetaMessage::Marker(text)
                    | MetaMessage::CuePoint(text),
                ) => self.text(&decode_text(text), tick),
                _ => {}
            }
        }
        for open in &self.open_notes {
            log::debug!(
                "note {} on channel {} at tick {} is never released",
                open.key,
                open.channel,
                open.tick
            );
        }
    }

    fn note_on(
        &mut self,
        key: u8,
        channel: u8,
        velocity: u8,
        tick: Tick,
        warnings: &mut Vec<MidiWarning>,
    ) {
        if self
            .open_notes
            .iter()
            .any(|open| open.key == key && open.channel == channel)
        {
            let warning = MidiWarning::DuplicateNoteOn { tick, key, channel };
            log::warn!("{warning}");
            warnings.push(warning);
            return;
        }
        self.open_notes.push(OpenNote {
            key,
            channel,
            velocity,
            tick,
        });
    }

    fn note_off(&mut self, key: u8, channel: u8, tick: Tick, warnings: &mut Vec<MidiWarning>) {
        let Some(index) = self
            .open_notes
            .iter()
            .position(|open| open.key == key && open.channel == channel)
        else {
            let warning = MidiWarning::UnmatchedNoteOff { tick, key, channel };
            log::warn!("{warning}");
            warnings.push(warning);
            return;
        };
        let open = self.open_notes.remove(index);
        self.close_note(open, tick, warnings);
    }

    fn sustain(&self, length: Tick) -> Tick {
        if length <= self.settings.sustain_cutoff(self.resolution) {
            0
        } else {
            length
        }
    }

    fn close_note(&mut self, open: OpenNote, end: Tick, warnings: &mut Vec<MidiWarning>) {
        let Some(action) = note_action(self.mode, open.key, self.table_mode) else {
            log::debug!("dropping note {} in {} track", open.key, self.instrument);
            return;
        };
        let tick = open.tick;
        let length = self.sustain(end.saturating_sub(tick));
        let ticks = (tick, end);
        match action {
            MidiAction::Note {
                difficulty,
                raw,
                mut flags,
            } => {
                if self.mode == GameMode::Drums
                    && self.table_mode.dynamics
                    && raw != DrumPad::Kick.raw()
                {
                    match open.velocity {
                        VELOCITY_ACCENT => flags.insert(NoteFlags::ACCENT),
                        VELOCITY_GHOST => flags.insert(NoteFlags::GHOST),
                        _ => {}
                    }
                }
                self.push_note(difficulty, Note::new(tick, raw, length).with_flags(flags));
            }
            MidiAction::ProGuitarNote { difficulty, string } => {
                let Some(fret) = open.velocity.checked_sub(PRO_GUITAR_FRET_VELOCITY) else {
                    let warning = MidiWarning::InvalidProGuitarVelocity {
                        tick,
                        velocity: open.velocity,
                    };
                    log::warn!("{warning}");
                    warnings.push(warning);
                    return;
                };
                let flags = if open.channel == PRO_GUITAR_MUTED_CHANNEL {
                    NoteFlags::MUTED
                } else {
                    NoteFlags::NONE
                };
                let note = Note::new(tick, string.raw_note(fret), length).with_flags(flags);
                self.push_note(difficulty, note);
            }
            MidiAction::SharedNote { raw, flags } => {
                for chart in self.charts.values_mut() {
                    chart
                        .notes
                        .push(Note::new(tick, raw, length).with_flags(flags));
                }
            }
            MidiAction::Phrase(kind) => self.push_phrase(Phrase::new(tick, kind, length)),
            MidiAction::VocalPhrase(kind) => {
                self.push_phrase(Phrase::new(tick, kind, length));
                self.push_phrase(Phrase::new(tick, PhraseKind::LyricPhrase, length));
            }
            MidiAction::Forced { difficulty, kind } => self.requests.push(RangeRequest::Forced {
                difficulty,
                kind,
                ticks,
            }),
            MidiAction::CymbalToggle { raw } => {
                self.requests.push(RangeRequest::CymbalToggle { raw, ticks });
            }
        }
    }

    fn push_note(&mut self, difficulty: Difficulty, note: Note) {
        if let Some(chart) = self.charts.get_mut(&difficulty) {
            chart.notes.push(note);
        }
    }

    fn push_phrase(&mut self, phrase: Phrase) {
        for chart in self.charts.values_mut() {
            chart.phrases.push(phrase);
        }
    }

    fn text(&mut self, raw: &str, tick: Tick) {
        let text = strip_brackets(raw);
        match (self.mode, text) {
            (GameMode::Guitar, ENHANCED_OPENS) => self.table_mode.enhanced_opens = true,
            (GameMode::Drums, CHART_DYNAMICS) => self.table_mode.dynamics = true,
            (_, ENHANCED_OPENS | CHART_DYNAMICS) => {
                log::debug!("ignoring {text} in {} track", self.instrument);
            }
            _ => {
                for chart in self.charts.values_mut() {
                    chart.events.push(TextEvent::new(tick, text));
                }
            }
        }
    }

    /// Applies the queued markers and returns the charts, one per difficulty.
    #[must_use]
    pub fn finish(mut self) -> Vec<Chart> {
        let threshold = self.settings.hopo_threshold(self.resolution);
        for chart in self.charts.values_mut() {
            chart.sort_notes();
        }
        for request in &self.requests {
            match *request {
                RangeRequest::Forced {
                    difficulty,
                    kind,
                    ticks,
                } => {
                    for chart in self
                        .charts
                        .values_mut()
                        .filter(|chart| difficulty.is_none_or(|only| only == chart.difficulty))
                    {
                        apply_forced_type(chart, marker_range(ticks), kind, threshold);
                    }
                }
                RangeRequest::CymbalToggle { raw, ticks } => {
                    for chart in self.charts.values_mut() {
                        let range = chart.notes_in(marker_range(ticks));
                        let Some(notes) = chart.notes.get_mut(range) else {
                            continue;
                        };
                        for note in notes.iter_mut().filter(|note| note.raw == raw) {
                            note.flags.toggle(NoteFlags::CYMBAL);
                        }
                    }
                }
            }
        }
        if self.settings.star_power_fixup
            && LEGACY_STAR_POWER_INSTRUMENTS.contains(&self.instrument)
        {
            for chart in self.charts.values_mut() {
                fix_legacy_star_power(chart);
            }
        }
        self.charts.into_values().collect()
    }
}

/// The ticks covered by a marker. A marker released on the tick it was pressed still covers it.
fn marker_range((start, end): (Tick, Tick)) -> Range<Tick> {
    start..end.max(start.saturating_add(1))
}

fn is_chord(notes: &[Note], index: usize) -> bool {
    let Some(note) = notes.get(index) else {
        return false;
    };
    let same_tick = |other: Option<&Note>| other.is_some_and(|other| other.tick == note.tick);
    same_tick(index.checked_sub(1).and_then(|prev| notes.get(prev)))
        || same_tick(notes.get(index + 1))
}

/// Whether a note is a hammer-on or pull-off without any forcing: a single note close enough to
/// the previous note, which is a chord or another fret.
fn is_natural_hopo(notes: &[Note], index: usize, threshold: Tick) -> bool {
    let Some(note) = notes.get(index) else {
        return false;
    };
    if is_chord(notes, index) {
        return false;
    }
    let Some(prev_index) = index.checked_sub(1) else {
        return false;
    };
    let Some(previous) = notes.get(prev_index) else {
        return false;
    };
    (is_chord(notes, prev_index) || previous.raw != note.raw)
        && note.tick - previous.tick <= threshold
}

/// Makes the notes in the range take the requested type, by setting the forced or tap flags.
///
/// A tapped note keeps its type. An open note cannot be tapped and becomes a hammer-on instead.
fn apply_forced_type(chart: &mut Chart, ticks: Range<Tick>, kind: ForcedType, threshold: Tick) {
    let open_raw = chart.game_mode().open_note();
    for index in chart.notes_in(ticks) {
        let chord = is_chord(&chart.notes, index);
        let natural = is_natural_hopo(&chart.notes, index, threshold);
        let Some(note) = chart.notes.get_mut(index) else {
            continue;
        };
        if note.flags.contains(NoteFlags::TAP) {
            continue;
        }
        let kind = match kind {
            ForcedType::Tap if Some(note.raw) == open_raw => ForcedType::Hopo,
            kind => kind,
        };
        match kind {
            ForcedType::Strum => {
                if !chord && natural {
                    note.flags.insert(NoteFlags::FORCED);
                }
            }
            ForcedType::Hopo => {
                if chord || !natural {
                    note.flags.insert(NoteFlags::FORCED);
                }
            }
            ForcedType::Tap => {
                note.flags.insert(NoteFlags::TAP);
                note.flags.remove(NoteFlags::FORCED);
            }
        }
    }
}

/// Old charts marked star power with the solo note. Such solos become star power phrases when the
/// chart has no star power phrase of its own.
fn fix_legacy_star_power(chart: &mut Chart) {
    let has_star_power = chart
        .phrases
        .iter()
        .any(|phrase| phrase.kind == PhraseKind::Starpower);
    if has_star_power {
        return;
    }
    for phrase in chart
        .phrases
        .iter_mut()
        .filter(|phrase| phrase.kind == PhraseKind::Solo)
    {
        phrase.kind = PhraseKind::Starpower;
    }
}

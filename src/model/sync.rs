//! Tempo and time signature changes, and conversions between ticks and elapsed time.

use std::time::Duration;

use gametime::TimeSpan;
use thiserror::Error;

use super::Tick;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// The tempo used when a song declares none at tick 0, in milli-BPM.
pub const DEFAULT_MILLI_BPM: u32 = 120_000;

/// A tempo change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoChange {
    /// Where the tempo takes effect.
    pub tick: Tick,
    /// Beats per minute multiplied by 1000.
    pub milli_bpm: u32,
    /// An absolute time in microseconds pinned to this tick, overriding the time computed from
    /// the previous tempos.
    pub anchor: Option<u64>,
}

impl TempoChange {
    /// Creates a tempo change without an anchor.
    #[must_use]
    pub const fn new(tick: Tick, milli_bpm: u32) -> Self {
        Self {
            tick,
            milli_bpm,
            anchor: None,
        }
    }

    /// Beats per minute.
    #[must_use]
    pub fn bpm(&self) -> f64 {
        f64::from(self.milli_bpm) / 1000.0
    }
}

/// A time signature change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignatureChange {
    /// Where the signature takes effect.
    pub tick: Tick,
    /// Beats per measure.
    pub numerator: u32,
    /// The beat unit as a power of two, so 2 means a quarter note.
    pub denominator_exp: u32,
    /// Whether the segment is cut short by the next change before completing a measure.
    pub interrupted: bool,
}

impl TimeSignatureChange {
    /// Creates a signature change which is not interrupted.
    #[must_use]
    pub const fn new(tick: Tick, numerator: u32, denominator_exp: u32) -> Self {
        Self {
            tick,
            numerator,
            denominator_exp,
            interrupted: false,
        }
    }

    /// The beat unit, such as 4 for a quarter note.
    #[must_use]
    pub fn denominator(&self) -> u64 {
        1u64.checked_shl(self.denominator_exp).unwrap_or(u64::MAX)
    }

    /// Ticks of one whole measure at `resolution` ticks per quarter note. Never 0.
    #[must_use]
    pub fn ticks_per_measure(&self, resolution: u32) -> u64 {
        let ticks =
            u64::from(self.numerator) * u64::from(resolution) * 4 / self.denominator().max(1);
        ticks.max(1)
    }

    /// Whether both signatures have the same numerator and denominator.
    #[must_use]
    pub const fn same_signature(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator_exp == other.denominator_exp
    }
}

/// Recoverable problems found in a sync track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SyncWarning {
    /// An interrupted segment does not carry the signature of the segment before it.
    #[error(
        "interrupted time signature at tick {tick} is {found_numerator}/2^{found_exp}, expected {expected_numerator}/2^{expected_exp}"
    )]
    InterruptedMismatch {
        /// Where the interrupted segment starts.
        tick: Tick,
        /// The numerator of the previous segment.
        expected_numerator: u32,
        /// The denominator exponent of the previous segment.
        expected_exp: u32,
        /// The numerator of the interrupted segment.
        found_numerator: u32,
        /// The denominator exponent of the interrupted segment.
        found_exp: u32,
    },
    /// A tempo of 0 was declared and skipped.
    #[error("tempo of zero at tick {tick} was skipped")]
    ZeroTempo {
        /// Where the tempo was declared.
        tick: Tick,
    },
}

/// Fatal problems found in a sync track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SyncTrackError {
    /// The first time signature is interrupted, so there is no signature to inherit from.
    #[error("the first time signature at tick {tick} is interrupted and has no predecessor")]
    InterruptedWithoutPredecessor {
        /// Where the interrupted signature starts.
        tick: Tick,
    },
}

/// A position in measures, as computed by [`SyncTrack::measure_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasurePosition {
    /// The 0-based measure index.
    pub measure: u32,
    /// Ticks elapsed since the start of the measure.
    pub tick_in_measure: Tick,
}

/// The tempo map and the time signatures of a song.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncTrack {
    /// Ticks per quarter note, at least 1.
    pub resolution: u32,
    /// Tempo changes, sorted by tick.
    pub tempos: Vec<TempoChange>,
    /// Time signature changes, sorted by tick.
    pub time_signatures: Vec<TimeSignatureChange>,
}

impl Default for SyncTrack {
    fn default() -> Self {
        Self::new(192)
    }
}

/// A tempo segment with its absolute start time resolved.
#[derive(Debug, Clone, Copy)]
struct TimedTempo {
    tick: Tick,
    seconds: f64,
    milli_bpm: u32,
}

impl SyncTrack {
    /// Creates an empty sync track.
    #[must_use]
    pub const fn new(resolution: u32) -> Self {
        Self {
            resolution,
            tempos: Vec::new(),
            time_signatures: Vec::new(),
        }
    }

    /// Sorts the changes, fills in the defaults at tick 0, removes duplicates on the same tick and
    /// marks interrupted time signature segments.
    ///
    /// When two changes share a tick, the one declared last wins.
    pub fn finalize(&mut self) {
        self.tempos.sort_by_key(|tempo| tempo.tick);
        dedup_keep_last(&mut self.tempos, |tempo| tempo.tick);
        if self.tempos.first().is_none_or(|tempo| tempo.tick != 0) {
            self.tempos.insert(0, TempoChange::new(0, DEFAULT_MILLI_BPM));
        }

        self.time_signatures.sort_by_key(|sig| sig.tick);
        dedup_keep_last(&mut self.time_signatures, |sig| sig.tick);
        if self.time_signatures.first().is_none_or(|sig| sig.tick != 0) {
            self.time_signatures
                .insert(0, TimeSignatureChange::new(0, 4, 2));
        }

        let resolution = self.resolution;
        let next_ticks: Vec<Option<Tick>> = self
            .time_signatures
            .iter()
            .skip(1)
            .map(|sig| Some(sig.tick))
            .chain(std::iter::once(None))
            .collect();
        for (sig, next) in self.time_signatures.iter_mut().zip(next_ticks) {
            let Some(next) = next else {
                continue;
            };
            let span = u64::from(next.saturating_sub(sig.tick));
            if span % sig.ticks_per_measure(resolution) != 0 {
                sig.interrupted = true;
            }
        }
    }

    /// Checks that every interrupted segment carries the signature of the segment before it.
    ///
    /// # Errors
    ///
    /// Fails when the first signature is interrupted.
    pub fn check_interruptions(&self) -> Result<Vec<SyncWarning>, SyncTrackError> {
        let mut warnings = Vec::new();
        let mut prev: Option<&TimeSignatureChange> = None;
        for sig in &self.time_signatures {
            if sig.interrupted {
                let Some(prev) = prev else {
                    return Err(SyncTrackError::InterruptedWithoutPredecessor { tick: sig.tick });
                };
                if !sig.same_signature(prev) {
                    let warning = SyncWarning::InterruptedMismatch {
                        tick: sig.tick,
                        expected_numerator: prev.numerator,
                        expected_exp: prev.denominator_exp,
                        found_numerator: sig.numerator,
                        found_exp: sig.denominator_exp,
                    };
                    log::warn!("{warning}");
                    warnings.push(warning);
                }
            }
            prev = Some(sig);
        }
        Ok(warnings)
    }

    /// Returns the measure containing `tick`.
    ///
    /// An interrupted segment counts as one short measure lasting until the next change.
    ///
    /// # Errors
    ///
    /// Fails when the interruption check fails.
    pub fn measure_position(&self, tick: Tick) -> Result<MeasurePosition, SyncTrackError> {
        self.check_interruptions()?;
        let mut measure = 0u64;
        let mut start = 0;
        let mut measure_len = TimeSignatureChange::new(0, 4, 2).ticks_per_measure(self.resolution);
        for (i, sig) in self.time_signatures.iter().enumerate() {
            if sig.tick > tick {
                break;
            }
            if sig.tick > start {
                measure += u64::from(sig.tick - start).div_ceil(measure_len);
            }
            start = sig.tick;
            measure_len = match self.time_signatures.get(i + 1) {
                Some(next) if sig.interrupted => u64::from(next.tick - sig.tick).max(1),
                _ => sig.ticks_per_measure(self.resolution),
            };
        }
        let offset = u64::from(tick.saturating_sub(start));
        measure += offset / measure_len;
        Ok(MeasurePosition {
            measure: u32::try_from(measure).unwrap_or(u32::MAX),
            tick_in_measure: (offset % measure_len) as Tick,
        })
    }

    fn timed_tempos(&self) -> Vec<TimedTempo> {
        let mut timed: Vec<TimedTempo> = Vec::with_capacity(self.tempos.len() + 1);
        let mut prev = TimedTempo {
            tick: 0,
            seconds: 0.0,
            milli_bpm: DEFAULT_MILLI_BPM,
        };
        for tempo in &self.tempos {
            let seconds = match tempo.anchor {
                Some(micros) => micros as f64 / MICROS_PER_SECOND,
                None => {
                    prev.seconds
                        + self.ticks_to_seconds(tempo.tick.saturating_sub(prev.tick), prev.milli_bpm)
                }
            };
            if tempo.tick == 0 {
                timed.clear();
            } else if timed.is_empty() {
                timed.push(prev);
            }
            prev = TimedTempo {
                tick: tempo.tick,
                seconds,
                milli_bpm: tempo.milli_bpm.max(1),
            };
            timed.push(prev);
        }
        if timed.is_empty() {
            timed.push(prev);
        }
        timed
    }

    fn ticks_to_seconds(&self, ticks: Tick, milli_bpm: u32) -> f64 {
        f64::from(ticks) * 60_000.0 / (f64::from(milli_bpm.max(1)) * f64::from(self.resolution.max(1)))
    }

    fn seconds_to_ticks(&self, seconds: f64, milli_bpm: u32) -> f64 {
        seconds * f64::from(milli_bpm.max(1)) * f64::from(self.resolution.max(1)) / 60_000.0
    }

    /// Converts a tick into seconds since tick 0.
    #[must_use]
    pub fn tick_to_seconds(&self, tick: Tick) -> f64 {
        let timed = self.timed_tempos();
        let index = timed.partition_point(|tempo| tempo.tick <= tick);
        let Some(tempo) = index.checked_sub(1).and_then(|i| timed.get(i)) else {
            return self.ticks_to_seconds(tick, DEFAULT_MILLI_BPM);
        };
        tempo.seconds + self.ticks_to_seconds(tick.saturating_sub(tempo.tick), tempo.milli_bpm)
    }

    /// Converts a tick into the time elapsed since tick 0. Negative times clamp to zero.
    #[must_use]
    pub fn tick_to_time(&self, tick: Tick) -> TimeSpan {
        let seconds = self.tick_to_seconds(tick);
        if seconds <= 0.0 {
            return TimeSpan::ZERO;
        }
        TimeSpan::from_duration(Duration::from_nanos((seconds * NANOS_PER_SECOND).round() as u64))
    }

    /// Converts seconds since tick 0 into the nearest tick.
    #[must_use]
    pub fn seconds_to_tick(&self, seconds: f64) -> Tick {
        let timed = self.timed_tempos();
        let index = timed.partition_point(|tempo| tempo.seconds <= seconds);
        let Some(tempo) = index.checked_sub(1).and_then(|i| timed.get(i)) else {
            return 0;
        };
        let ticks = self.seconds_to_ticks(seconds - tempo.seconds, tempo.milli_bpm).round();
        tempo.tick.saturating_add(ticks.clamp(0.0, f64::from(Tick::MAX)) as Tick)
    }

    /// Converts a time elapsed since tick 0 into the nearest tick.
    #[must_use]
    pub fn time_to_tick(&self, time: TimeSpan) -> Tick {
        self.seconds_to_tick(time.as_nanos().max(0) as f64 / NANOS_PER_SECOND)
    }

    /// Returns the tempo in effect at `tick`.
    #[must_use]
    pub fn tempo_at(&self, tick: Tick) -> Option<&TempoChange> {
        let index = self.tempos.partition_point(|tempo| tempo.tick <= tick);
        index.checked_sub(1).and_then(|i| self.tempos.get(i))
    }

    /// Returns the time signature in effect at `tick`.
    #[must_use]
    pub fn time_signature_at(&self, tick: Tick) -> Option<&TimeSignatureChange> {
        let index = self.time_signatures.partition_point(|sig| sig.tick <= tick);
        index.checked_sub(1).and_then(|i| self.time_signatures.get(i))
    }
}

fn dedup_keep_last<T>(items: &mut Vec<T>, key: impl Fn(&T) -> Tick) {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        match kept.last_mut() {
            Some(last) if key(last) == key(&item) => *last = item,
            _ => kept.push(item),
        }
    }
    *items = kept;
}

use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::parse_clean;

const SOURCE: &str = "[Song]
{
  Resolution = 192
}
[SyncTrack]
{
  0 = TS 4
  0 = B 120000
  768 = B 60000
  1536 = A 5000000
  1536 = B 240000
}
";

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn ticks_to_seconds_across_tempos() {
    let song = parse_clean(SOURCE);
    let sync = &song.sync;

    approx(sync.tick_to_seconds(0), 0.0);
    approx(sync.tick_to_seconds(192), 0.5);
    approx(sync.tick_to_seconds(768), 2.0);
    approx(sync.tick_to_seconds(960), 3.0);
    // The anchor pins tick 1536 at five seconds instead of six.
    approx(sync.tick_to_seconds(1536), 5.0);
    approx(sync.tick_to_seconds(1728), 5.25);
}

#[test]
fn seconds_to_ticks_across_tempos() {
    let song = parse_clean(SOURCE);
    let sync = &song.sync;

    assert_eq!(sync.seconds_to_tick(0.5), 192);
    assert_eq!(sync.seconds_to_tick(3.0), 960);
    assert_eq!(sync.seconds_to_tick(5.25), 1728);
}

#[test]
fn anchor_is_attached_to_its_tempo() {
    let song = parse_clean(SOURCE);

    assert_eq!(
        song.sync.tempo_at(1600).map(|tempo| (tempo.milli_bpm, tempo.anchor)),
        Some((240000, Some(5_000_000)))
    );
}

#[test]
fn defaults_fill_tick_zero() {
    let song = parse_clean("[Song]\n{\n  Resolution = 480\n}\n");

    assert_eq!(song.sync.tempos, vec![TempoChange::new(0, 120000)]);
    assert_eq!(
        song.sync.time_signatures,
        vec![TimeSignatureChange::new(0, 4, 2)]
    );
}

#[test]
fn measures_with_interrupted_signature() {
    let song = parse_clean(
        "[SyncTrack]\n{\n  0 = TS 4\n  768 = TS 4\n  1152 = TS 3\n}\n",
    );
    let sync = &song.sync;

    assert!(sync.time_signatures.get(1).is_some_and(|sig| sig.interrupted));
    assert_eq!(sync.time_signature_at(1000).map(|sig| sig.numerator), Some(4));
    assert_eq!(sync.time_signature_at(1200).map(|sig| sig.numerator), Some(3));
    assert_eq!(
        sync.measure_position(768),
        Ok(MeasurePosition {
            measure: 1,
            tick_in_measure: 0
        })
    );
    assert_eq!(
        sync.measure_position(1152),
        Ok(MeasurePosition {
            measure: 2,
            tick_in_measure: 0
        })
    );
    assert_eq!(
        sync.measure_position(1152 + 576 + 100),
        Ok(MeasurePosition {
            measure: 3,
            tick_in_measure: 100
        })
    );
}

#[test]
fn interrupted_first_signature_is_an_error() {
    let mut sync = SyncTrack::new(192);
    sync.time_signatures = vec![
        TimeSignatureChange::new(0, 4, 2),
        TimeSignatureChange::new(100, 4, 2),
    ];
    sync.finalize();

    assert_eq!(
        sync.check_interruptions(),
        Err(SyncTrackError::InterruptedWithoutPredecessor { tick: 0 })
    );
}

#[test]
fn zero_tempo_is_skipped() {
    let output = parse_chart(
        "[SyncTrack]\n{\n  0 = B 120000\n  192 = B 0\n}\n",
        &ParseSettings::default(),
    )
    .expect("source must be parsed");

    assert_eq!(output.song.sync.tempos, vec![TempoChange::new(0, 120000)]);
    assert_eq!(
        output.warnings,
        vec![ChartWarning::Sync(SyncWarning::ZeroTempo { tick: 192 })]
    );
}

use chart_rs::prelude::*;
use pretty_assertions::assert_eq;

use super::track_source;

fn drums_type(lines: &[&str], settings: &ParseSettings) -> DrumsType {
    parse_chart(&track_source("ExpertDrums", lines), settings)
        .expect("source must be parsed")
        .song
        .drums_type
}

#[test]
fn first_cymbal_means_four_lanes() {
    let lines = ["0 = N 1 0", "192 = N 2 0", "192 = N 66 0", "384 = N 5 0"];

    assert_eq!(
        drums_type(&lines, &ParseSettings::default()),
        DrumsType::FourLane
    );
}

#[test]
fn first_green_means_five_lanes() {
    let lines = ["0 = N 5 0", "192 = N 2 0", "192 = N 66 0"];

    assert_eq!(
        drums_type(&lines, &ParseSettings::default()),
        DrumsType::FiveLane
    );
}

#[test]
fn no_evidence_means_four_lanes() {
    assert_eq!(
        drums_type(&["0 = N 0 0", "0 = N 1 0"], &ParseSettings::default()),
        DrumsType::FourLane
    );
}

#[test]
fn setting_is_kept() {
    let settings = ParseSettings::default().with_drums_type(DrumsType::FiveLane);

    assert_eq!(
        drums_type(&["0 = N 2 0", "0 = N 66 0"], &settings),
        DrumsType::FiveLane
    );
}

#[test]
fn detection_is_deterministic() {
    let lines = ["192 = N 5 0", "0 = N 3 0", "0 = N 67 0", "96 = N 4 0"];
    let first = drums_type(&lines, &ParseSettings::default());

    for _ in 0..8 {
        assert_eq!(drums_type(&lines, &ParseSettings::default()), first);
    }
    assert_eq!(first, DrumsType::FourLane);
}

#[test]
fn guitar_only_song_keeps_unknown() {
    let song = parse_chart(
        &track_source("ExpertSingle", &["0 = N 0 0"]),
        &ParseSettings::default(),
    )
    .expect("source must be parsed")
    .song;

    assert_eq!(song.drums_type, DrumsType::Unknown);
}

fn two_drums_sections(sections: [(&str, &[&str]); 2]) -> DrumsType {
    let [(first, first_lines), (second, second_lines)] = sections;
    let mut source = track_source(first, first_lines);
    source.push_str(&format!("[{second}]\n{{\n"));
    for line in second_lines {
        source.push_str(&format!("  {line}\n"));
    }
    source.push_str("}\n");
    parse_chart(&source, &ParseSettings::default())
        .expect("source must be parsed")
        .song
        .drums_type
}

const GREEN_ONLY: &[&str] = &["0 = N 5 0"];
const CYMBAL_ONLY: &[&str] = &["0 = N 2 0", "0 = N 66 0"];
const RED_ONLY: &[&str] = &["0 = N 1 0"];

#[test]
fn first_section_in_file_decides() {
    assert_eq!(
        two_drums_sections([("ExpertDrums", GREEN_ONLY), ("EasyDrums", CYMBAL_ONLY)]),
        DrumsType::FiveLane
    );
    assert_eq!(
        two_drums_sections([("EasyDrums", CYMBAL_ONLY), ("ExpertDrums", GREEN_ONLY)]),
        DrumsType::FourLane
    );
}

#[test]
fn first_section_without_evidence_settles_four_lanes() {
    assert_eq!(
        two_drums_sections([("HardDrums", RED_ONLY), ("ExpertDrums", GREEN_ONLY)]),
        DrumsType::FourLane
    );
}

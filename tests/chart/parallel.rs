use chart_rs::prelude::*;
use pretty_assertions::assert_eq;
use rayon::prelude::*;

use super::expert_single;

#[test]
fn parses_many_files_in_parallel() {
    let sources: Vec<String> = (1..=32u32)
        .map(|count| {
            let lines: Vec<String> = (0..count)
                .map(|i| format!("{} = N {} 0", i * 96, i % 5))
                .collect();
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            expert_single(&lines)
        })
        .collect();

    let counts: Vec<usize> = sources
        .par_iter()
        .map(|source| {
            parse_chart(source, &ParseSettings::default())
                .map(|output| output.song.charts.values().map(|chart| chart.notes.len()).sum())
                .unwrap_or_default()
        })
        .collect();

    assert_eq!(counts, (1..=32).collect::<Vec<usize>>());
}

#[test]
fn parallel_and_sequential_agree() {
    let source = include_str!("files/basic.chart");
    let sequential = parse_chart(source, &ParseSettings::default());
    let parallel: Vec<_> = (0..16)
        .into_par_iter()
        .map(|_| parse_chart(source, &ParseSettings::default()))
        .collect();

    for output in parallel {
        assert_eq!(output, sequential);
    }
}

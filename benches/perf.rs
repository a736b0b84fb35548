use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use pressure_terminal::analysis_fetch::parse_analysis_json;
use pressure_terminal::filters::{CountrySlot, FilterSelection, MatchRow, ReferenceData};
use pressure_terminal::request::build_request;
use pressure_terminal::transform::shape_analysis;

const ANALYSIS_JSON: &str = include_str!("../tests/fixtures/pressure_analysis.json");

fn bench_analysis_parse(c: &mut Criterion) {
    c.bench_function("analysis_parse", |b| {
        b.iter(|| {
            let raw = parse_analysis_json(black_box(ANALYSIS_JSON)).unwrap();
            black_box(raw.over_pressure.batting.len());
        })
    });
}

fn bench_analysis_shape(c: &mut Criterion) {
    let raw = parse_analysis_json(ANALYSIS_JSON).unwrap();
    c.bench_function("analysis_shape", |b| {
        b.iter(|| {
            let view = shape_analysis(black_box(&raw));
            black_box(view.over_series.len());
        })
    });
}

fn bench_request_build(c: &mut Criterion) {
    let reference = ReferenceData {
        countries: vec!["India".to_string(), "Australia".to_string()],
        tournaments: vec!["World Cup".to_string()],
        matches: (0..500)
            .map(|i| MatchRow {
                match_id: format!("m-{i:04}"),
                tournament: "World Cup".to_string(),
                team_a: "India".to_string(),
                team_b: "Australia".to_string(),
                match_date: "2026-03-08".to_string(),
            })
            .collect(),
    };
    let mut selection = FilterSelection::new();
    selection.set_country(CountrySlot::First, Some("India".to_string()));
    selection.set_country(CountrySlot::Second, Some("Australia".to_string()));
    selection.toggle_tournament("World Cup");

    c.bench_function("request_build_all_matches", |b| {
        b.iter(|| {
            let request = build_request(black_box(&selection), black_box(&reference)).unwrap();
            black_box(request.selected_matches.len());
        })
    });
}

criterion_group!(
    benches,
    bench_analysis_parse,
    bench_analysis_shape,
    bench_request_build
);
criterion_main!(benches);

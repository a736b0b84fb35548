use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;

use pressure_terminal::analysis_fetch::parse_analysis_json;
use pressure_terminal::transform::{
    shape_analysis, ImpactCategory, SeriesRole, OVERS_PER_INNINGS, PHASE_PLACEHOLDER_TEAM,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn flattening_is_label_stable() {
    let values: Vec<f64> = (0..20).map(|i| i as f64 / 2.0).collect();
    let raw = parse_analysis_json(
        &serde_json::json!({ "overPressure": { "batting": { "India": values } } }).to_string(),
    )
    .expect("should parse");
    let view = shape_analysis(&raw);

    assert_eq!(view.over_series.len(), 1);
    let series = &view.over_series[0];
    assert_eq!(series.label, "India Batting");
    assert_eq!(series.team, "India");
    assert_eq!(series.role, SeriesRole::Batting);
    assert_eq!(series.values.len(), OVERS_PER_INNINGS);
    for (i, value) in series.values.iter().enumerate() {
        assert_eq!(*value, Some(i as f64 / 2.0));
    }
}

#[test]
fn empty_over_pressure_yields_no_series() {
    let raw = parse_analysis_json(r#"{ "overPressure": {} }"#).expect("should parse");
    assert!(shape_analysis(&raw).over_series.is_empty());

    let raw = parse_analysis_json("{}").expect("should parse");
    assert!(shape_analysis(&raw).over_series.is_empty());
}

#[test]
fn batting_precedes_bowling_and_source_map_order_survives() {
    // Deliberately non-alphabetic object order.
    let raw = parse_analysis_json(
        r#"{
            "overPressure": {
                "bowling": { "Zimbabwe": [1.0], "Australia": [2.0] },
                "batting": { "Sri Lanka": [3.0], "Bangladesh": [4.0] }
            }
        }"#,
    )
    .expect("should parse");
    let view = shape_analysis(&raw);

    let labels: Vec<&str> = view.over_series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Sri Lanka Batting",
            "Bangladesh Batting",
            "Zimbabwe Bowling",
            "Australia Bowling",
        ]
    );
}

#[test]
fn short_and_null_over_values_pad_to_twenty() {
    let raw = parse_analysis_json(
        r#"{ "overPressure": { "batting": { "India": [1.5, null, 2.5] } } }"#,
    )
    .expect("should parse");
    let view = shape_analysis(&raw);

    let values = &view.over_series[0].values;
    assert_eq!(values.len(), OVERS_PER_INNINGS);
    assert_eq!(values[0], Some(1.5));
    assert_eq!(values[1], None);
    assert_eq!(values[2], Some(2.5));
    assert!(values[3..].iter().all(|v| v.is_none()));
}

#[test]
fn phase_pairing_pads_missing_slots_with_placeholders() {
    let raw = parse_analysis_json("{}").expect("should parse");
    let view = shape_analysis(&raw);

    for slot in &view.phase_batting {
        assert!(slot.placeholder);
        assert_eq!(slot.team, PHASE_PLACEHOLDER_TEAM);
        assert_eq!(slot.values, [0.0, 0.0, 0.0]);
    }
    assert_eq!(view.phase_batting[0].color, Color::Green);
    assert_eq!(view.phase_batting[1].color, Color::Red);
}

#[test]
fn phase_pairing_with_one_entry_keeps_second_slot_placeholder() {
    let raw = parse_analysis_json(
        r#"{ "phasePressure": { "bowling": [ { "team": "Nepal", "values": [1.0, 2.0, 3.0] } ] } }"#,
    )
    .expect("should parse");
    let view = shape_analysis(&raw);

    assert!(!view.phase_bowling[0].placeholder);
    assert_eq!(view.phase_bowling[0].team, "Nepal");
    assert_eq!(view.phase_bowling[0].values, [1.0, 2.0, 3.0]);
    // Nepal has no registered color, so the default pair applies.
    assert_eq!(view.phase_bowling[0].color, Color::Green);
    assert!(view.phase_bowling[1].placeholder);
    assert_eq!(view.phase_bowling[1].color, Color::Red);
}

#[test]
fn impact_boards_pass_through_without_resorting_or_recapping() {
    let raw = parse_analysis_json(&read_fixture("pressure_analysis.json")).expect("should parse");
    let view = shape_analysis(&raw);

    // The service sent four "top" entries for total; no local cap to three.
    let total = view.impact(ImpactCategory::Total);
    assert_eq!(total.top.len(), 4);
    assert_eq!(total.top[0].player_name, "J Bumrah");
    assert_eq!(total.top[3].player_name, "T Head");

    let fielding = view.impact(ImpactCategory::Fielding);
    assert_eq!(fielding.top.len(), 1);
    assert!(fielding.bottom.is_empty());
}

#[test]
fn fixture_shapes_end_to_end() {
    let raw = parse_analysis_json(&read_fixture("pressure_analysis.json")).expect("should parse");
    let view = shape_analysis(&raw);

    let labels: Vec<&str> = view.over_series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "India Batting",
            "Australia Batting",
            "India Bowling",
            "Australia Bowling",
        ]
    );
    // Registered country colors resolve by exact name.
    assert_eq!(view.over_series[0].color, Color::Blue);
    assert_eq!(view.over_series[1].color, Color::Yellow);
    // The Australia batting array carries one null at over 19.
    assert_eq!(view.over_series[1].values[18], None);
    assert_eq!(view.over_series[1].values[19], Some(8.1));

    assert_eq!(view.phase_batting[0].team, "India");
    assert_eq!(view.phase_batting[1].team, "Australia");
    assert!(!view.phase_bowling[0].placeholder);
    assert!(view.phase_bowling[1].placeholder);
}

#[test]
fn null_body_shapes_to_an_empty_view() {
    let raw = parse_analysis_json("null").expect("null should parse");
    let view = shape_analysis(&raw);
    assert!(view.over_series.is_empty());
    assert!(view.impact(ImpactCategory::Batting).top.is_empty());
    assert!(view.phase_batting[0].placeholder);
}

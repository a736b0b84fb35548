use std::fs;
use std::path::PathBuf;

use pressure_terminal::analysis_fetch::parse_analysis_json;
use pressure_terminal::reference_fetch::{
    parse_countries_json, parse_matches_json, parse_tournaments_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_country_and_tournament_lists() {
    let countries =
        parse_countries_json(r#"["India", " Australia ", "", "England"]"#).expect("should parse");
    assert_eq!(countries, vec!["India", "Australia", "England"]);

    let tournaments = parse_tournaments_json(r#"["World Cup"]"#).expect("should parse");
    assert_eq!(tournaments, vec!["World Cup"]);
}

#[test]
fn empty_and_null_bodies_degrade_to_empty_lists() {
    assert!(parse_countries_json("").expect("empty ok").is_empty());
    assert!(parse_tournaments_json("null").expect("null ok").is_empty());
    assert!(parse_matches_json("  ").expect("blank ok").is_empty());
    assert!(parse_analysis_json("").expect("empty ok").over_pressure.batting.is_empty());
}

#[test]
fn invalid_bodies_are_errors_not_panics() {
    assert!(parse_countries_json("{not json").is_err());
    assert!(parse_matches_json(r#"{"unexpected": "shape"}"#).is_err());
    assert!(parse_analysis_json("[1, 2, 3]").is_err());
}

#[test]
fn parses_matches_fixture() {
    let rows = parse_matches_json(&read_fixture("matches.json")).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].match_id, "m-101");
    assert_eq!(rows[0].tournament, "World Cup");
    assert_eq!(rows[0].team_a, "India");
    assert_eq!(rows[0].team_b, "Australia");
    assert_eq!(rows[0].match_date, "2026-03-08");
    // Unknown fields and a blank date are tolerated.
    assert_eq!(rows[2].match_id, "m-103");
    assert!(rows[2].match_date.is_empty());
}

#[test]
fn parses_analysis_fixture() {
    let raw = parse_analysis_json(&read_fixture("pressure_analysis.json")).expect("should parse");
    assert_eq!(raw.over_pressure.batting.len(), 2);
    assert_eq!(raw.over_pressure.bowling.len(), 2);
    assert_eq!(raw.phase_pressure.batting.len(), 2);
    assert_eq!(raw.phase_pressure.bowling.len(), 1);
    assert_eq!(raw.top_bottom_players.batting.top.len(), 3);
    assert_eq!(raw.top_bottom_players.batting.top[0].player_name, "R Sharma");
    assert_eq!(raw.top_bottom_players.batting.top[0].country, "India");
    assert!(raw.top_bottom_players.batting.bottom[0].net_impact < 0.0);
}

#[test]
fn null_sub_keys_parse_to_empty_slices() {
    let raw = parse_analysis_json(
        r#"{
            "overPressure": { "batting": null, "bowling": { "India": [1.0] } },
            "phasePressure": null,
            "topBottomPlayers": { "batting": { "top": null, "bottom": [] } }
        }"#,
    )
    .expect("should parse");
    assert!(raw.over_pressure.batting.is_empty());
    assert_eq!(raw.over_pressure.bowling.len(), 1);
    assert!(raw.phase_pressure.batting.is_empty());
    assert!(raw.top_bottom_players.batting.top.is_empty());
}

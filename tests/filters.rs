use pressure_terminal::filters::{
    CountrySlot, FilterSelection, MatchRow, Phase, ReferenceData, TeamCategory,
};

fn match_row(id: &str) -> MatchRow {
    MatchRow {
        match_id: id.to_string(),
        tournament: "World Cup".to_string(),
        team_a: "India".to_string(),
        team_b: "Australia".to_string(),
        match_date: "2026-03-08".to_string(),
    }
}

#[test]
fn new_selection_defaults_to_all_phases_and_all_matches() {
    let selection = FilterSelection::new();
    assert_eq!(selection.team_category, TeamCategory::Men);
    assert_eq!(selection.phases.len(), 3);
    assert!(selection.all_matches_selected);
    assert!(selection.selected_matches.is_empty());
    assert!(selection.tournaments.is_empty());
}

#[test]
fn category_switch_resets_match_selection_but_keeps_other_filters() {
    let mut selection = FilterSelection::new();
    selection.set_country(CountrySlot::First, Some("India".to_string()));
    selection.toggle_tournament("World Cup");
    selection.toggle_phase(Phase::Powerplay);
    selection.set_all_matches(false);
    selection.toggle_match("men-001");

    selection.set_category(TeamCategory::Women);

    assert!(selection.all_matches_selected);
    assert!(selection.selected_matches.is_empty());
    // Countries, tournaments and phases deliberately leak across categories.
    assert_eq!(selection.country1.as_deref(), Some("India"));
    assert!(selection.tournaments.contains("World Cup"));
    assert!(!selection.phases.contains(&Phase::Powerplay));
}

#[test]
fn toggles_are_symmetric_difference() {
    let mut selection = FilterSelection::new();

    selection.toggle_tournament("Asia Cup");
    assert!(selection.tournaments.contains("Asia Cup"));
    selection.toggle_tournament("Asia Cup");
    assert!(!selection.tournaments.contains("Asia Cup"));

    selection.toggle_phase(Phase::DeathOvers);
    assert!(!selection.phases.contains(&Phase::DeathOvers));
    selection.toggle_phase(Phase::DeathOvers);
    assert!(selection.phases.contains(&Phase::DeathOvers));

    selection.toggle_match("m-1");
    selection.toggle_match("m-2");
    selection.toggle_match("m-1");
    assert!(!selection.selected_matches.contains("m-1"));
    assert!(selection.selected_matches.contains("m-2"));
}

#[test]
fn set_all_matches_clears_explicit_selection() {
    let mut selection = FilterSelection::new();
    selection.set_all_matches(false);
    selection.toggle_match("m-1");
    selection.toggle_match("m-2");

    selection.set_all_matches(true);
    assert!(selection.all_matches_selected);
    assert!(selection.selected_matches.is_empty());
}

#[test]
fn country_slots_are_independent_and_may_be_equal() {
    let mut selection = FilterSelection::new();
    selection.set_country(CountrySlot::First, Some("India".to_string()));
    selection.set_country(CountrySlot::Second, Some("India".to_string()));
    assert_eq!(selection.country1.as_deref(), Some("India"));
    assert_eq!(selection.country2.as_deref(), Some("India"));

    selection.set_country(CountrySlot::Second, Some("  ".to_string()));
    assert_eq!(selection.country2, None);
    assert_eq!(selection.country1.as_deref(), Some("India"));
}

#[test]
fn retain_known_matches_drops_stale_ids() {
    let mut selection = FilterSelection::new();
    selection.set_all_matches(false);
    selection.toggle_match("men-001");
    selection.toggle_match("women-001");

    let reference = ReferenceData {
        countries: vec!["India".to_string()],
        tournaments: vec!["World Cup".to_string()],
        matches: vec![match_row("women-001")],
    };
    selection.retain_known_matches(&reference);

    assert!(!selection.selected_matches.contains("men-001"));
    assert!(selection.selected_matches.contains("women-001"));
}

#[test]
fn category_cycling_covers_all_five() {
    let mut category = TeamCategory::Men;
    for _ in 0..TeamCategory::ALL.len() {
        category = category.cycle_next();
    }
    assert_eq!(category, TeamCategory::Men);
    assert_eq!(TeamCategory::U19Men.cycle_prev(), TeamCategory::Women);
    assert_eq!(TeamCategory::U19Women.query_value(), "U19 Women");
}

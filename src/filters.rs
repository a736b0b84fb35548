use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamCategory {
    Men,
    Women,
    #[serde(rename = "U19 Men")]
    U19Men,
    #[serde(rename = "U19 Women")]
    U19Women,
    Training,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 5] = [
        TeamCategory::Men,
        TeamCategory::Women,
        TeamCategory::U19Men,
        TeamCategory::U19Women,
        TeamCategory::Training,
    ];

    /// Value used both for display and for the `teamCategory` query/body field.
    pub fn query_value(self) -> &'static str {
        match self {
            TeamCategory::Men => "Men",
            TeamCategory::Women => "Women",
            TeamCategory::U19Men => "U19 Men",
            TeamCategory::U19Women => "U19 Women",
            TeamCategory::Training => "Training",
        }
    }

    pub fn cycle_next(self) -> TeamCategory {
        match self {
            TeamCategory::Men => TeamCategory::Women,
            TeamCategory::Women => TeamCategory::U19Men,
            TeamCategory::U19Men => TeamCategory::U19Women,
            TeamCategory::U19Women => TeamCategory::Training,
            TeamCategory::Training => TeamCategory::Men,
        }
    }

    pub fn cycle_prev(self) -> TeamCategory {
        match self {
            TeamCategory::Men => TeamCategory::Training,
            TeamCategory::Women => TeamCategory::Men,
            TeamCategory::U19Men => TeamCategory::Women,
            TeamCategory::U19Women => TeamCategory::U19Men,
            TeamCategory::Training => TeamCategory::U19Women,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Powerplay,
    #[serde(rename = "Middle Overs")]
    MiddleOvers,
    #[serde(rename = "Death Overs")]
    DeathOvers,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Powerplay, Phase::MiddleOvers, Phase::DeathOvers];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Powerplay => "Powerplay",
            Phase::MiddleOvers => "Middle Overs",
            Phase::DeathOvers => "Death Overs",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Phase::Powerplay => "PP",
            Phase::MiddleOvers => "MID",
            Phase::DeathOvers => "DTH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySlot {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchRow {
    pub match_id: String,
    pub tournament: String,
    pub team_a: String,
    pub team_b: String,
    #[serde(default)]
    pub match_date: String,
}

/// Selectable countries, tournaments and matches for one team category.
/// Replaced wholesale on every category change; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub countries: Vec<String>,
    pub tournaments: Vec<String>,
    pub matches: Vec<MatchRow>,
}

impl ReferenceData {
    pub fn match_ids(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.match_id.clone()).collect()
    }

    pub fn contains_match(&self, id: &str) -> bool {
        self.matches.iter().any(|m| m.match_id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub team_category: TeamCategory,
    pub country1: Option<String>,
    pub country2: Option<String>,
    pub tournaments: HashSet<String>,
    pub phases: HashSet<Phase>,
    pub all_matches_selected: bool,
    pub selected_matches: HashSet<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSelection {
    pub fn new() -> Self {
        Self {
            team_category: TeamCategory::Men,
            country1: None,
            country2: None,
            tournaments: HashSet::new(),
            phases: Phase::ALL.into_iter().collect(),
            all_matches_selected: true,
            selected_matches: HashSet::new(),
        }
    }

    /// Category switch keeps countries/tournaments/phases (they may simply
    /// stop matching the new reference data) but always falls back to the
    /// all-matches default, since match ids are category-scoped.
    pub fn set_category(&mut self, category: TeamCategory) {
        self.team_category = category;
        self.all_matches_selected = true;
        self.selected_matches.clear();
    }

    pub fn country(&self, slot: CountrySlot) -> Option<&str> {
        match slot {
            CountrySlot::First => self.country1.as_deref(),
            CountrySlot::Second => self.country2.as_deref(),
        }
    }

    pub fn set_country(&mut self, slot: CountrySlot, name: Option<String>) {
        let name = name.filter(|n| !n.trim().is_empty());
        match slot {
            CountrySlot::First => self.country1 = name,
            CountrySlot::Second => self.country2 = name,
        }
    }

    pub fn toggle_tournament(&mut self, name: &str) {
        if !self.tournaments.remove(name) {
            self.tournaments.insert(name.to_string());
        }
    }

    pub fn toggle_phase(&mut self, phase: Phase) {
        if !self.phases.remove(&phase) {
            self.phases.insert(phase);
        }
    }

    pub fn toggle_match(&mut self, id: &str) {
        if !self.selected_matches.remove(id) {
            self.selected_matches.insert(id.to_string());
        }
    }

    /// The "all" semantics stay implicit: the concrete id list is resolved
    /// at request-build time against the reference data of that moment.
    pub fn set_all_matches(&mut self, all: bool) {
        self.all_matches_selected = all;
        if all {
            self.selected_matches.clear();
        }
    }

    /// Drop explicit selections that no longer exist in the given reference
    /// data. Called after every reference refresh so ids from a previous
    /// category cannot linger in the selection.
    pub fn retain_known_matches(&mut self, reference: &ReferenceData) {
        self.selected_matches
            .retain(|id| reference.contains_match(id));
    }
}

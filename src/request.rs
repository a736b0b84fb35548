use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filters::{FilterSelection, Phase, ReferenceData, TeamCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select both countries before running the analysis")]
    MissingCountry,
    #[error("select at least one tournament")]
    MissingTournament,
}

/// Immutable snapshot of a validated selection, in the wire shape the
/// analytics service expects for `POST /pressure-analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub country1: String,
    pub country2: String,
    pub tournaments: Vec<String>,
    pub selected_phases: Vec<Phase>,
    pub selected_matches: Vec<String>,
    pub all_matches_selected: bool,
    pub team_category: TeamCategory,
}

/// Validation order matters: missing countries win over missing tournaments.
/// Phases and matches have safe defaults and never fail validation.
pub fn build_request(
    selection: &FilterSelection,
    reference: &ReferenceData,
) -> Result<AnalysisRequest, ValidationError> {
    let country1 = selection
        .country1
        .clone()
        .filter(|c| !c.trim().is_empty())
        .ok_or(ValidationError::MissingCountry)?;
    let country2 = selection
        .country2
        .clone()
        .filter(|c| !c.trim().is_empty())
        .ok_or(ValidationError::MissingCountry)?;
    if selection.tournaments.is_empty() {
        return Err(ValidationError::MissingTournament);
    }

    let mut tournaments: Vec<String> = selection.tournaments.iter().cloned().collect();
    tournaments.sort();

    let phases: Vec<Phase> = if selection.phases.is_empty() {
        Phase::ALL.to_vec()
    } else {
        Phase::ALL
            .into_iter()
            .filter(|p| selection.phases.contains(p))
            .collect()
    };

    // Resolved late, against the reference data of this moment. Walking the
    // reference list also filters out ids the current category does not know.
    let selected_matches: Vec<String> = if selection.all_matches_selected {
        reference.match_ids()
    } else {
        reference
            .matches
            .iter()
            .filter(|m| selection.selected_matches.contains(&m.match_id))
            .map(|m| m.match_id.clone())
            .collect()
    };

    Ok(AnalysisRequest {
        country1,
        country2,
        tournaments,
        selected_phases: phases,
        selected_matches,
        all_matches_selected: selection.all_matches_selected,
        team_category: selection.team_category,
    })
}

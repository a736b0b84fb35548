use ratatui::style::Color;
use serde_json::Value;

use crate::analysis_fetch::{PlayerImpact, RawAnalysis, RawOverMaps, RawPhaseEntry};
use crate::colors::{phase_slot_color, series_color};

pub const OVERS_PER_INNINGS: usize = 20;
pub const PHASE_SLOTS: usize = 3;
pub const PHASE_PLACEHOLDER_TEAM: &str = "No team";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    Batting,
    Bowling,
}

impl SeriesRole {
    pub fn suffix(self) -> &'static str {
        match self {
            SeriesRole::Batting => "Batting",
            SeriesRole::Bowling => "Bowling",
        }
    }
}

/// One flattened over-trend line. The role discriminant drives styling; the
/// label is display-only but keeps the exact "{team} {role}" convention
/// downstream consumers key on.
#[derive(Debug, Clone, PartialEq)]
pub struct OverSeries {
    pub team: String,
    pub role: SeriesRole,
    pub label: String,
    pub color: Color,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSeries {
    pub team: String,
    pub placeholder: bool,
    pub color: Color,
    pub values: [f64; PHASE_SLOTS],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpactBoard {
    pub top: Vec<PlayerImpact>,
    pub bottom: Vec<PlayerImpact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactCategory {
    Batting,
    Bowling,
    Fielding,
    Total,
}

impl ImpactCategory {
    pub fn label(self) -> &'static str {
        match self {
            ImpactCategory::Batting => "Batting",
            ImpactCategory::Bowling => "Bowling",
            ImpactCategory::Fielding => "Fielding",
            ImpactCategory::Total => "Total",
        }
    }

    pub fn cycle_next(self) -> ImpactCategory {
        match self {
            ImpactCategory::Batting => ImpactCategory::Bowling,
            ImpactCategory::Bowling => ImpactCategory::Fielding,
            ImpactCategory::Fielding => ImpactCategory::Total,
            ImpactCategory::Total => ImpactCategory::Batting,
        }
    }
}

/// Chart-ready projection of one analysis response. Rebuilt wholesale on
/// every successful run; never merged incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub over_series: Vec<OverSeries>,
    pub phase_batting: [PhaseSeries; 2],
    pub phase_bowling: [PhaseSeries; 2],
    pub impact_batting: ImpactBoard,
    pub impact_bowling: ImpactBoard,
    pub impact_fielding: ImpactBoard,
    pub impact_total: ImpactBoard,
}

impl Default for AnalysisView {
    fn default() -> Self {
        shape_analysis(&RawAnalysis::default())
    }
}

impl AnalysisView {
    pub fn impact(&self, category: ImpactCategory) -> &ImpactBoard {
        match category {
            ImpactCategory::Batting => &self.impact_batting,
            ImpactCategory::Bowling => &self.impact_bowling,
            ImpactCategory::Fielding => &self.impact_fielding,
            ImpactCategory::Total => &self.impact_total,
        }
    }
}

pub fn shape_analysis(raw: &RawAnalysis) -> AnalysisView {
    AnalysisView {
        over_series: flatten_over_series(&raw.over_pressure),
        phase_batting: pair_phase_series(&raw.phase_pressure.batting),
        phase_bowling: pair_phase_series(&raw.phase_pressure.bowling),
        impact_batting: impact_board(&raw.top_bottom_players.batting.top, &raw.top_bottom_players.batting.bottom),
        impact_bowling: impact_board(&raw.top_bottom_players.bowling.top, &raw.top_bottom_players.bowling.bottom),
        impact_fielding: impact_board(&raw.top_bottom_players.fielding.top, &raw.top_bottom_players.fielding.bottom),
        impact_total: impact_board(&raw.top_bottom_players.total.top, &raw.top_bottom_players.total.bottom),
    }
}

/// Batting entries first, then bowling; within a role the source map order
/// is kept as-is. Fallback colors index by position among the whole chart's
/// datasets, so unmapped teams stay stable within one render.
pub fn flatten_over_series(maps: &RawOverMaps) -> Vec<OverSeries> {
    let mut series = Vec::with_capacity(maps.batting.len() + maps.bowling.len());

    for (role, entries) in [
        (SeriesRole::Batting, &maps.batting),
        (SeriesRole::Bowling, &maps.bowling),
    ] {
        for (team, values) in entries.iter() {
            let index = series.len();
            series.push(OverSeries {
                team: team.clone(),
                role,
                label: format!("{team} {}", role.suffix()),
                color: series_color(team, index),
                values: over_values(values),
            });
        }
    }

    series
}

/// Exactly two slots per role; absent entries become a placeholder with a
/// three-zero vector and the default green/red pair.
pub fn pair_phase_series(entries: &[RawPhaseEntry]) -> [PhaseSeries; 2] {
    [phase_slot(entries, 0), phase_slot(entries, 1)]
}

fn phase_slot(entries: &[RawPhaseEntry], slot: usize) -> PhaseSeries {
    match entries.get(slot) {
        Some(entry) => {
            let mut values = [0.0; PHASE_SLOTS];
            for (i, value) in entry.values.iter().take(PHASE_SLOTS).enumerate() {
                values[i] = value.unwrap_or(0.0);
            }
            PhaseSeries {
                team: entry.team.clone(),
                placeholder: false,
                color: phase_slot_color(&entry.team, slot),
                values,
            }
        }
        None => PhaseSeries {
            team: PHASE_PLACEHOLDER_TEAM.to_string(),
            placeholder: true,
            color: phase_slot_color(PHASE_PLACEHOLDER_TEAM, slot),
            values: [0.0; PHASE_SLOTS],
        },
    }
}

/// Top/bottom lists pass through untouched: the service's ordering and cap
/// are trusted, no local re-sort or re-cap.
fn impact_board(top: &[PlayerImpact], bottom: &[PlayerImpact]) -> ImpactBoard {
    ImpactBoard {
        top: top.to_vec(),
        bottom: bottom.to_vec(),
    }
}

fn over_values(value: &Value) -> Vec<Option<f64>> {
    let mut out = vec![None; OVERS_PER_INNINGS];
    if let Some(items) = value.as_array() {
        for (i, item) in items.iter().take(OVERS_PER_INNINGS).enumerate() {
            out[i] = item.as_f64();
        }
    }
    out
}

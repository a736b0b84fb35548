use std::collections::VecDeque;

use crate::filters::{FilterSelection, Phase, ReferenceData, TeamCategory};
use crate::request::AnalysisRequest;
use crate::transform::{AnalysisView, ImpactCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    Category,
    CountryOne,
    CountryTwo,
    Tournaments,
    Phases,
    Matches,
}

/// Lifecycle of the single meaningful in-flight analysis run. A second
/// submission is refused while Pending; late responses are additionally
/// fenced by sequence number in `apply_delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

pub enum Delta {
    SetReference {
        seq: u64,
        data: ReferenceData,
        errors: Vec<String>,
    },
    SetAnalysis {
        seq: u64,
        view: AnalysisView,
    },
    AnalysisFailed {
        seq: u64,
        error: String,
    },
    Log(String),
}

pub enum ProviderCommand {
    FetchReference { seq: u64, category: TeamCategory },
    RunAnalysis { seq: u64, request: AnalysisRequest },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub selection: FilterSelection,
    pub reference: ReferenceData,
    pub reference_loading: bool,
    pub reference_seq: u64,
    pub run_state: RunState,
    pub analysis_seq: u64,
    pub view: Option<AnalysisView>,
    pub notice: Option<String>,
    pub impact_category: ImpactCategory,
    pub focus: FilterFocus,
    pub category_cursor: usize,
    pub country_cursor: usize,
    pub tournament_cursor: usize,
    pub phase_cursor: usize,
    pub match_cursor: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selection: FilterSelection::new(),
            reference: ReferenceData::default(),
            reference_loading: false,
            reference_seq: 0,
            run_state: RunState::Idle,
            analysis_seq: 0,
            view: None,
            notice: None,
            impact_category: ImpactCategory::Batting,
            focus: FilterFocus::Category,
            category_cursor: 0,
            country_cursor: 0,
            tournament_cursor: 0,
            phase_cursor: 0,
            match_cursor: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Switches category and invalidates the current reference data on the
    /// spot, so nothing built before the refresh lands can resolve against
    /// the previous category's match ids. Returns the refresh seq to send.
    pub fn change_category(&mut self, category: TeamCategory) -> u64 {
        self.selection.set_category(category);
        self.reference = ReferenceData::default();
        self.reference_loading = true;
        self.country_cursor = 0;
        self.tournament_cursor = 0;
        self.match_cursor = 0;
        self.reference_seq += 1;
        self.push_log(format!("[INFO] Category: {}", category.query_value()));
        self.reference_seq
    }

    /// Marks a run pending and returns the seq the provider must echo back.
    pub fn begin_analysis(&mut self) -> u64 {
        self.analysis_seq += 1;
        self.run_state = RunState::Pending;
        self.notice = None;
        self.analysis_seq
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FilterFocus::Category => FilterFocus::CountryOne,
            FilterFocus::CountryOne => FilterFocus::CountryTwo,
            FilterFocus::CountryTwo => FilterFocus::Tournaments,
            FilterFocus::Tournaments => FilterFocus::Phases,
            FilterFocus::Phases => FilterFocus::Matches,
            FilterFocus::Matches => FilterFocus::Category,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FilterFocus::Category => FilterFocus::Matches,
            FilterFocus::CountryOne => FilterFocus::Category,
            FilterFocus::CountryTwo => FilterFocus::CountryOne,
            FilterFocus::Tournaments => FilterFocus::CountryTwo,
            FilterFocus::Phases => FilterFocus::Tournaments,
            FilterFocus::Matches => FilterFocus::Phases,
        };
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            FilterFocus::Category => TeamCategory::ALL.len(),
            FilterFocus::CountryOne | FilterFocus::CountryTwo => self.reference.countries.len(),
            FilterFocus::Tournaments => self.reference.tournaments.len(),
            FilterFocus::Phases => Phase::ALL.len(),
            FilterFocus::Matches => self.reference.matches.len(),
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            FilterFocus::Category => &mut self.category_cursor,
            FilterFocus::CountryOne | FilterFocus::CountryTwo => &mut self.country_cursor,
            FilterFocus::Tournaments => &mut self.tournament_cursor,
            FilterFocus::Phases => &mut self.phase_cursor,
            FilterFocus::Matches => &mut self.match_cursor,
        }
    }

    pub fn focused_cursor(&self) -> usize {
        match self.focus {
            FilterFocus::Category => self.category_cursor,
            FilterFocus::CountryOne | FilterFocus::CountryTwo => self.country_cursor,
            FilterFocus::Tournaments => self.tournament_cursor,
            FilterFocus::Phases => self.phase_cursor,
            FilterFocus::Matches => self.match_cursor,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.focused_len();
        let cursor = self.focused_cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.focused_len();
        let cursor = self.focused_cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = if *cursor == 0 { total - 1 } else { *cursor - 1 };
    }

    pub fn clamp_cursors(&mut self) {
        let countries = self.reference.countries.len();
        let tournaments = self.reference.tournaments.len();
        let matches = self.reference.matches.len();
        self.country_cursor = self.country_cursor.min(countries.saturating_sub(1));
        self.tournament_cursor = self.tournament_cursor.min(tournaments.saturating_sub(1));
        self.match_cursor = self.match_cursor.min(matches.saturating_sub(1));
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetReference { seq, data, errors } => {
            if seq != state.reference_seq {
                state.push_log(format!("[INFO] Discarded stale reference refresh #{seq}"));
                return;
            }
            state.reference_loading = false;
            state.reference = data;
            state.selection.retain_known_matches(&state.reference);
            state.clamp_cursors();
            for err in errors {
                state.push_log(format!("[WARN] Reference fetch: {err}"));
            }
            state.push_log(format!(
                "[INFO] Reference data: {} countries, {} tournaments, {} matches",
                state.reference.countries.len(),
                state.reference.tournaments.len(),
                state.reference.matches.len()
            ));
        }
        Delta::SetAnalysis { seq, view } => {
            if seq != state.analysis_seq {
                state.push_log(format!("[INFO] Discarded stale analysis #{seq}"));
                return;
            }
            state.run_state = RunState::Succeeded;
            state.notice = None;
            state.view = Some(view);
            state.push_log("[INFO] Analysis updated");
        }
        Delta::AnalysisFailed { seq, error } => {
            if seq != state.analysis_seq {
                state.push_log(format!("[INFO] Discarded stale analysis error #{seq}"));
                return;
            }
            // Prior chart data stays on screen; only the notice changes.
            state.run_state = RunState::Failed;
            state.notice = Some(format!("Analysis failed: {error}"));
            state.push_log(format!("[WARN] Analysis failed: {error}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

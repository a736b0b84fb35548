use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde_json::json;

use crate::analysis_fetch::RawAnalysis;
use crate::filters::{MatchRow, ReferenceData, TeamCategory};
use crate::request::AnalysisRequest;
use crate::state::{Delta, ProviderCommand};
use crate::transform::{shape_analysis, OVERS_PER_INNINGS};

const FAKE_COUNTRIES: &[&str] = &[
    "India",
    "Australia",
    "England",
    "Pakistan",
    "New Zealand",
    "South Africa",
    "Sri Lanka",
    "West Indies",
];

const FAKE_TOURNAMENTS: &[&str] = &["World Cup", "T20 Blast", "Asia Cup", "Tri-Series"];

/// Demo provider with the same channel contract as the live one. Generates
/// category-scoped reference data and plausible pressure payloads so the UI
/// works without the analytics service.
pub fn spawn_fake_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let _ = tx.send(Delta::Log("[INFO] Fake feed active".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            // Rough stand-in for network latency.
            thread::sleep(Duration::from_millis(rng.gen_range(120..350)));

            match cmd {
                ProviderCommand::FetchReference { seq, category } => {
                    let delta = Delta::SetReference {
                        seq,
                        data: fake_reference(category, &mut rng),
                        errors: Vec::new(),
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
                ProviderCommand::RunAnalysis { seq, request } => {
                    let delta = Delta::SetAnalysis {
                        seq,
                        view: shape_analysis(&fake_analysis(&request, &mut rng)),
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

fn category_slug(category: TeamCategory) -> &'static str {
    match category {
        TeamCategory::Men => "men",
        TeamCategory::Women => "women",
        TeamCategory::U19Men => "u19m",
        TeamCategory::U19Women => "u19w",
        TeamCategory::Training => "trn",
    }
}

pub fn fake_reference(category: TeamCategory, rng: &mut ThreadRng) -> ReferenceData {
    let slug = category_slug(category);
    let today = Utc::now().date_naive();

    let mut matches = Vec::new();
    for (i, tournament) in FAKE_TOURNAMENTS.iter().enumerate() {
        for game in 0..3 {
            let a = FAKE_COUNTRIES[rng.gen_range(0..FAKE_COUNTRIES.len())];
            let b = loop {
                let pick = FAKE_COUNTRIES[rng.gen_range(0..FAKE_COUNTRIES.len())];
                if pick != a {
                    break pick;
                }
            };
            let date = today - ChronoDuration::days((i * 3 + game) as i64 * 7);
            matches.push(MatchRow {
                match_id: format!("{slug}-{:03}", i * 3 + game + 1),
                tournament: tournament.to_string(),
                team_a: a.to_string(),
                team_b: b.to_string(),
                match_date: date.format("%Y-%m-%d").to_string(),
            });
        }
    }

    ReferenceData {
        countries: FAKE_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        tournaments: FAKE_TOURNAMENTS.iter().map(|t| t.to_string()).collect(),
        matches,
    }
}

pub fn fake_analysis(request: &AnalysisRequest, rng: &mut ThreadRng) -> RawAnalysis {
    let teams = [request.country1.as_str(), request.country2.as_str()];

    let over_map = |rng: &mut ThreadRng| {
        let mut map = serde_json::Map::new();
        for team in teams {
            map.insert(team.to_string(), json!(over_curve(rng)));
        }
        serde_json::Value::Object(map)
    };

    let phase_entries = |rng: &mut ThreadRng| {
        json!(teams
            .iter()
            .map(|team| json!({
                "team": team,
                "values": [
                    round2(rng.gen_range(2.0..8.0)),
                    round2(rng.gen_range(2.0..8.0)),
                    round2(rng.gen_range(2.0..8.0)),
                ],
            }))
            .collect::<Vec<_>>())
    };

    let board = |rng: &mut ThreadRng| {
        json!({
            "top": impact_list(teams, rng, 1.0),
            "bottom": impact_list(teams, rng, -1.0),
        })
    };

    let value = json!({
        "overPressure": { "batting": over_map(rng), "bowling": over_map(rng) },
        "phasePressure": { "batting": phase_entries(rng), "bowling": phase_entries(rng) },
        "topBottomPlayers": {
            "batting": board(rng),
            "bowling": board(rng),
            "fielding": board(rng),
            "total": board(rng),
        },
    });

    // The demo path goes through the same deserializer as the live one.
    serde_json::from_value(value).unwrap_or_default()
}

fn over_curve(rng: &mut ThreadRng) -> Vec<Option<f64>> {
    let base = rng.gen_range(3.0..6.0);
    (0..OVERS_PER_INNINGS)
        .map(|over| {
            // Sparse gaps model overs the service could not score.
            if rng.gen_bool(0.05) {
                return None;
            }
            let ramp = if over >= 15 { 1.5 } else if over < 6 { 0.5 } else { 0.0 };
            Some(round2(base + ramp + rng.gen_range(-1.2..1.2)))
        })
        .collect()
}

fn impact_list(teams: [&str; 2], rng: &mut ThreadRng, sign: f64) -> serde_json::Value {
    json!((0..3)
        .map(|i| {
            let team = teams[i % 2];
            json!({
                "player_name": format!("{} Player {}", team, i + 1),
                "country": team,
                "net_impact": round2(sign * rng.gen_range(0.5..4.0)),
            })
        })
        .collect::<Vec<_>>())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

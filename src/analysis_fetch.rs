use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::http_client::{api_base, http_client};
use crate::request::AnalysisRequest;

/// Raw nested payload of `POST /pressure-analysis`. Every slice is optional
/// on the wire; missing or null sub-keys parse to empty collections so the
/// transformer never has to deal with absence errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default, rename = "overPressure", deserialize_with = "null_default")]
    pub over_pressure: RawOverMaps,
    #[serde(default, rename = "phasePressure", deserialize_with = "null_default")]
    pub phase_pressure: RawPhaseEntries,
    #[serde(default, rename = "topBottomPlayers", deserialize_with = "null_default")]
    pub top_bottom_players: RawImpactBoards,
}

/// Team name -> per-over value array, one map per role. `serde_json::Map`
/// keeps the service's object order (preserve_order feature); callers must
/// not assume alphabetic iteration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOverMaps {
    #[serde(default, deserialize_with = "null_default")]
    pub batting: Map<String, Value>,
    #[serde(default, deserialize_with = "null_default")]
    pub bowling: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhaseEntries {
    #[serde(default, deserialize_with = "null_default")]
    pub batting: Vec<RawPhaseEntry>,
    #[serde(default, deserialize_with = "null_default")]
    pub bowling: Vec<RawPhaseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPhaseEntry {
    pub team: String,
    #[serde(default, deserialize_with = "null_default")]
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImpactBoards {
    #[serde(default, deserialize_with = "null_default")]
    pub batting: RawTopBottom,
    #[serde(default, deserialize_with = "null_default")]
    pub bowling: RawTopBottom,
    #[serde(default, deserialize_with = "null_default")]
    pub fielding: RawTopBottom,
    #[serde(default, deserialize_with = "null_default")]
    pub total: RawTopBottom,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTopBottom {
    #[serde(default, deserialize_with = "null_default")]
    pub top: Vec<PlayerImpact>,
    #[serde(default, deserialize_with = "null_default")]
    pub bottom: Vec<PlayerImpact>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerImpact {
    pub player_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub net_impact: f64,
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn run_analysis(request: &AnalysisRequest) -> Result<RawAnalysis> {
    let client = http_client()?;
    let url = format!("{}/pressure-analysis", api_base());

    let resp = client
        .post(&url)
        .json(request)
        .send()
        .context("pressure-analysis request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading analysis body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_analysis_json(&body)
}

pub fn parse_analysis_json(raw: &str) -> Result<RawAnalysis> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(RawAnalysis::default());
    }
    serde_json::from_str(trimmed).context("invalid pressure-analysis json")
}

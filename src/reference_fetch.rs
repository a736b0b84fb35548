use anyhow::{Context, Result};

use crate::filters::{MatchRow, ReferenceData, TeamCategory};
use crate::http_client::{api_base, http_client};

/// Result of one category-scoped refresh. Endpoint failures degrade to an
/// empty slice and are reported alongside, so a dead service still yields a
/// valid (empty) ReferenceData for the selection model to work against.
#[derive(Debug, Clone)]
pub struct ReferenceFetch {
    pub data: ReferenceData,
    pub errors: Vec<String>,
}

pub fn fetch_reference(category: TeamCategory) -> ReferenceFetch {
    let (countries, (tournaments, matches)) = rayon::join(
        || fetch_countries(category),
        || {
            rayon::join(
                || fetch_tournaments(category),
                || fetch_matches(category),
            )
        },
    );

    let mut data = ReferenceData::default();
    let mut errors = Vec::new();

    match countries {
        Ok(names) => data.countries = names,
        Err(err) => errors.push(format!("countries: {err:#}")),
    }
    match tournaments {
        Ok(names) => data.tournaments = names,
        Err(err) => errors.push(format!("tournaments: {err:#}")),
    }
    match matches {
        Ok(rows) => data.matches = rows,
        Err(err) => errors.push(format!("matches: {err:#}")),
    }

    ReferenceFetch { data, errors }
}

fn fetch_countries(category: TeamCategory) -> Result<Vec<String>> {
    let body = fetch_scoped("countries", category)?;
    parse_countries_json(&body)
}

fn fetch_tournaments(category: TeamCategory) -> Result<Vec<String>> {
    let body = fetch_scoped("tournaments", category)?;
    parse_tournaments_json(&body)
}

fn fetch_matches(category: TeamCategory) -> Result<Vec<MatchRow>> {
    let body = fetch_scoped("matches", category)?;
    parse_matches_json(&body)
}

fn fetch_scoped(endpoint: &str, category: TeamCategory) -> Result<String> {
    let client = http_client()?;
    let url = format!("{}/{endpoint}", api_base());
    let resp = client
        .get(&url)
        .query(&[("teamCategory", category.query_value())])
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}

pub fn parse_countries_json(raw: &str) -> Result<Vec<String>> {
    parse_name_list(raw).context("invalid countries json")
}

pub fn parse_tournaments_json(raw: &str) -> Result<Vec<String>> {
    parse_name_list(raw).context("invalid tournaments json")
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRow>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid matches json")
}

fn parse_name_list(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let names: Vec<String> = serde_json::from_str(trimmed)?;
    Ok(names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect())
}

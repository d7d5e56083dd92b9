use std::collections::HashSet;

use crate::models::{AggregateAnalysis, Client, MatchResult, MatchThresholds};

pub const NO_DATA: &str = "No data available";

/// Budget at which an organization is treated as having substantial capacity
const LARGE_BUDGET: f64 = 500_000.0;
/// Budget below which financial capacity is flagged
const SMALL_BUDGET: f64 = 100_000.0;
/// Distinct funder types needed to count as a diverse match set
const DIVERSE_SOURCE_TYPES: usize = 3;

/// Summarize a client's standing across its qualifying matches
///
/// Rule-based: counts of strong and excellent matches, grant history, budget
/// size and funder diversity each contribute strengths or improvement areas.
pub fn generate_client_analysis(
    client: &Client,
    matches: &[MatchResult],
    thresholds: &MatchThresholds,
) -> AggregateAnalysis {
    if matches.is_empty() {
        return AggregateAnalysis::no_data();
    }

    let excellent = matches
        .iter()
        .filter(|m| m.match_score.total >= thresholds.excellent_match)
        .count();
    let strong = matches
        .iter()
        .filter(|m| m.match_score.total >= thresholds.strong_match)
        .count();
    let source_types: HashSet<_> = matches
        .iter()
        .filter_map(|m| m.source.source_type)
        .collect();
    let grant_history = client.previous_grants.len();

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if excellent > 0 {
        strengths.push(format!(
            "Excellent alignment with {excellent} opportunit{} scoring {}+",
            plural_y(excellent),
            thresholds.excellent_match
        ));
    }
    if grant_history > 0 {
        strengths.push(format!(
            "Established track record with {grant_history} previous grant{}",
            plural_s(grant_history)
        ));
    } else {
        improvements
            .push("Build a grant history, starting with smaller local awards".to_string());
    }

    match client.budget {
        Some(budget) if budget >= LARGE_BUDGET => {
            strengths.push("Substantial organizational capacity for large awards".to_string());
        }
        Some(budget) if budget >= SMALL_BUDGET => {}
        _ => improvements
            .push("Strengthen financial capacity and document annual budget".to_string()),
    }

    if source_types.len() >= DIVERSE_SOURCE_TYPES {
        let mut labels: Vec<&str> = source_types.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        strengths.push(format!(
            "Eligible across {} funder types ({})",
            source_types.len(),
            labels.join(", ")
        ));
    } else {
        improvements.push("Diversify funding sources beyond current funder types".to_string());
    }

    if strong == 0 {
        improvements.push(format!(
            "No matches scored {}+; refine focus areas and target populations",
            thresholds.strong_match
        ));
    }

    if strengths.is_empty() {
        strengths.push(format!(
            "Qualifies for {} funding opportunit{}",
            matches.len(),
            plural_y(matches.len())
        ));
    }
    if improvements.is_empty() {
        improvements
            .push("Maintain current grant readiness and monitor new opportunities".to_string());
    }

    let summary = match matches.iter().max_by_key(|m| m.match_score.total) {
        Some(top) => format!(
            "{} qualifies for {} opportunit{}, {} scoring {}+. Top match: {} ({}).",
            client.name,
            matches.len(),
            plural_y(matches.len()),
            strong,
            thresholds.strong_match,
            top.grant.title,
            top.match_score.total
        ),
        None => NO_DATA.to_string(),
    };

    AggregateAnalysis {
        client_strengths: strengths,
        improvement_areas: improvements,
        match_factors: average_factors(matches),
        summary,
    }
}

/// Average points per factor, strongest factor first
fn average_factors(matches: &[MatchResult]) -> Vec<String> {
    let count = matches.len() as f64;
    let mut averages = [
        ("Category alignment", 0.0),
        ("Budget fit", 0.0),
        ("Geographic fit", 0.0),
        ("Population alignment", 0.0),
        ("Grant experience", 0.0),
    ];

    for m in matches {
        let b = &m.match_score.breakdown;
        for (slot, points) in averages
            .iter_mut()
            .zip([b.category, b.budget, b.geographic, b.population, b.experience])
        {
            slot.1 += points / count;
        }
    }

    averages.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    averages
        .iter()
        .map(|(label, avg)| format!("{label}: average {avg:.1} points"))
        .collect()
}

fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 { "y" } else { "ies" }
}

impl AggregateAnalysis {
    /// Fallback used when there is nothing to analyze
    pub fn no_data() -> Self {
        Self {
            client_strengths: vec![NO_DATA.to_string()],
            improvement_areas: vec![NO_DATA.to_string()],
            match_factors: vec![NO_DATA.to_string()],
            summary: NO_DATA.to_string(),
        }
    }
}

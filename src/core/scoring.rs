use crate::core::amount::{extract_max_amount, extract_optional_amount};
use crate::core::overlap::{infer_population, overlap};
use crate::models::{
    Client, FactorCaps, GeographicScope, Grant, GrantSource, MatchScore, ScoreBreakdown,
    SourceType,
};

/// Coarse program buckets used when categories differ in wording
const CATEGORY_BUCKETS: &[&str] = &["education", "health", "environment", "arts"];

pub const BUDGET_INCOMPLETE: &str = "Budget information incomplete";
pub const CATEGORY_INCOMPLETE: &str = "Category information incomplete";
pub const SERVICE_AREA_MISSING: &str = "Service area not specified";
pub const POPULATION_MISSING: &str = "Target population not specified";

/// Points for one factor plus the explanations behind them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorScore {
    pub points: f64,
    pub factors: Vec<String>,
}

impl FactorScore {
    fn capped(mut self, cap: f64) -> Self {
        self.points = self.points.clamp(0.0, cap);
        self
    }

    fn add(&mut self, points: f64, factor: impl Into<String>) {
        self.points += points;
        self.factors.push(factor.into());
    }
}

/// Calculate a match score (0-100) for a client against one grant
///
/// Scoring formula:
/// total = round(min(
///     category (cap 30) +     # funder/grant category alignment, shared focus areas
///     budget (cap 25) +       # annual budget vs maximum award
///     geographic (cap 20) +   # service area vs funder type and scope
///     population (cap 15) +   # target populations vs eligibility keywords
///     experience (cap 10),    # grant history and organizational age
///   100))
///
/// Factors are reported in the same order as the sub-scores above.
pub fn calculate_match_score(
    client: &Client,
    grant: &Grant,
    source: &GrantSource,
    caps: &FactorCaps,
) -> MatchScore {
    let category = score_category(client, grant, source).capped(caps.category);
    let budget = score_budget(client, grant).capped(caps.budget);
    let geographic = score_geographic(client, source).capped(caps.geographic);
    let population = score_population(client, grant).capped(caps.population);
    let experience = score_experience(client, grant, source).capped(caps.experience);

    let breakdown = ScoreBreakdown {
        category: category.points,
        budget: budget.points,
        geographic: geographic.points,
        population: population.points,
        experience: experience.points,
    };

    let total = breakdown.sum().min(100.0).max(0.0).round() as u8;

    let factors = [category, budget, geographic, population, experience]
        .into_iter()
        .flat_map(|score| score.factors)
        .collect();

    MatchScore {
        total,
        breakdown,
        factors,
    }
}

/// Category alignment between the client, the funder and the grant
pub fn score_category(client: &Client, grant: &Grant, source: &GrantSource) -> FactorScore {
    let mut score = FactorScore::default();

    match non_empty(client.category.as_deref()) {
        Some(client_category) => {
            if same_label(Some(client_category), source.category.as_deref()) {
                score.add(
                    15.0,
                    format!("Organization category matches funder focus ({client_category})"),
                );
            }

            if same_label(Some(client_category), grant.category.as_deref()) {
                score.add(
                    10.0,
                    format!("Direct category match with grant ({client_category})"),
                );
            } else if let Some(bucket) = shared_bucket(client_category, grant.category.as_deref()) {
                score.add(5.0, format!("Related program area ({bucket})"));
            }
        }
        None => score.factors.push(CATEGORY_INCOMPLETE.to_string()),
    }

    let focus = overlap(&client.focus_areas, &grant.focus_areas);
    if !focus.common.is_empty() {
        score.add(
            (focus.score * 0.05).min(5.0),
            format!("Shared focus areas: {}", focus.common.join(", ")),
        );
    }

    score
}

/// Annual budget compared with the largest award the grant mentions
pub fn score_budget(client: &Client, grant: &Grant) -> FactorScore {
    let mut score = FactorScore::default();

    let budget = client.budget.filter(|b| b.is_finite() && *b >= 0.0);
    let max_amount = extract_optional_amount(grant.amount.as_deref()).filter(|a| *a > 0.0);

    let (budget, max_amount) = match (budget, max_amount) {
        (Some(budget), Some(max_amount)) => (budget, max_amount),
        _ => {
            score.factors.push(BUDGET_INCOMPLETE.to_string());
            return score;
        }
    };

    let ratio = budget / max_amount;

    if (0.8..=1.5).contains(&ratio) {
        score.add(20.0, "Budget well suited to award size");
    } else if (0.5..=2.0).contains(&ratio) {
        score.add(15.0, "Budget compatible with award size");
    } else if ratio > 2.0 {
        score.add(
            5.0,
            "Organization larger than award; consider a partnership or program-specific request",
        );
    } else if ratio >= 0.3 {
        score.add(8.0, "Budget below typical grantee size for this award");
    } else {
        score.factors.push("Insufficient capacity for award size".to_string());
    }

    if (0.9..=1.1).contains(&ratio) {
        score.add(5.0, "Award size closely matches annual budget");
    }

    score
}

/// Client service area against the funder's type and scope
pub fn score_geographic(client: &Client, source: &GrantSource) -> FactorScore {
    let mut score = FactorScore::default();

    let source_type = source.source_type;
    let source_scope = source.scope;

    match client.service_area {
        Some(GeographicScope::National) => {
            score.add(18.0, "National reach fits funder scope");
        }
        Some(GeographicScope::Regional) => {
            if matches!(
                source_type,
                Some(SourceType::PrivateFoundation | SourceType::Community | SourceType::Regional)
            ) || source_scope == Some(GeographicScope::Regional)
            {
                score.add(16.0, "Regional service area fits funder scope");
            } else if source_type == Some(SourceType::Government) {
                score.add(12.0, "Regional service area eligible for government funding");
            }
        }
        Some(GeographicScope::Local) => {
            if matches!(source_type, Some(SourceType::Community | SourceType::Local))
                || source_scope == Some(GeographicScope::Local)
            {
                score.add(18.0, "Local service area fits local funder");
            } else if source_type == Some(SourceType::PrivateFoundation) {
                score.add(10.0, "Local service area may fit private foundation");
            }
        }
        Some(GeographicScope::Statewide) => {
            score.add(15.0, "Statewide service area broadly eligible");
        }
        Some(GeographicScope::Unknown) | None => {
            score.factors.push(SERVICE_AREA_MISSING.to_string());
        }
    }

    score
}

/// Client target populations against populations inferred from grant text
pub fn score_population(client: &Client, grant: &Grant) -> FactorScore {
    let mut score = FactorScore::default();

    if client.target_population.is_empty() {
        score.factors.push(POPULATION_MISSING.to_string());
        return score;
    }

    let served = infer_population(grant.eligibility.as_deref(), grant.description.as_deref());
    let populations = overlap(&client.target_population, &served);

    if !populations.common.is_empty() {
        score.add(
            (populations.score * 0.15).min(15.0),
            format!("Serves target populations: {}", populations.common.join(", ")),
        );
    }

    score
}

/// Grant history and organizational maturity
pub fn score_experience(client: &Client, grant: &Grant, source: &GrantSource) -> FactorScore {
    let mut score = FactorScore::default();

    let categories: Vec<String> = [source.category.as_deref(), grant.category.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(|c| non_empty(Some(c)))
        .map(str::to_lowercase)
        .collect();

    let relevant_history = client.previous_grants.iter().any(|previous| {
        let previous = previous.to_lowercase();
        categories.iter().any(|category| previous.contains(category.as_str()))
    });
    if relevant_history {
        score.add(6.0, "Prior funding in this category");
    }

    if let Some(years) = client.operating_years.filter(|y| *y >= 3) {
        score.add(2.0, format!("Established organization ({years} years operating)"));
    }

    if let Some(amount) = extract_optional_amount(grant.amount.as_deref()).filter(|a| *a > 0.0) {
        let comparable = client
            .previous_grants
            .iter()
            .filter_map(|previous| extract_max_amount(previous))
            .any(|previous| (previous - amount).abs() <= amount * 0.5);
        if comparable {
            score.add(2.0, "Previous award of comparable size");
        }
    }

    score
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn same_label(a: Option<&str>, b: Option<&str>) -> bool {
    match (non_empty(a), non_empty(b)) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn bucket_of(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    CATEGORY_BUCKETS
        .iter()
        .copied()
        .find(|bucket| label.contains(bucket))
}

fn shared_bucket(client_category: &str, grant_category: Option<&str>) -> Option<&'static str> {
    let grant_bucket = bucket_of(non_empty(grant_category)?)?;
    (bucket_of(client_category)? == grant_bucket).then_some(grant_bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_client() -> Client {
        Client {
            id: Some("client-1".to_string()),
            name: "Bright Futures".to_string(),
            mission: Some("We empower students through science education".to_string()),
            category: Some("Education".to_string()),
            budget: Some(200_000.0),
            service_area: Some(GeographicScope::National),
            target_population: vec!["Youth".to_string()],
            focus_areas: vec!["STEM".to_string()],
            previous_grants: vec![],
            operating_years: None,
        }
    }

    fn create_test_grant() -> Grant {
        Grant {
            id: Some("grant-1".to_string()),
            title: "STEM Access Fund".to_string(),
            category: Some("Education".to_string()),
            amount: Some("$150,000 - $250,000".to_string()),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 1),
            eligibility: Some("Nonprofits serving youth".to_string()),
            description: Some("Science education for students".to_string()),
            focus_areas: vec!["STEM".to_string(), "Education".to_string()],
            status: Some("open".to_string()),
        }
    }

    fn create_test_source() -> GrantSource {
        GrantSource {
            id: Some("source-1".to_string()),
            name: "National Learning Foundation".to_string(),
            category: Some("Education".to_string()),
            source_type: Some(SourceType::PrivateFoundation),
            scope: Some(GeographicScope::National),
            grants: vec![],
        }
    }

    #[test]
    fn test_calculate_match_score() {
        let score = calculate_match_score(
            &create_test_client(),
            &create_test_grant(),
            &create_test_source(),
            &FactorCaps::default(),
        );

        assert!(score.breakdown.category >= 25.0);
        assert!(score.breakdown.budget >= 20.0);
        assert_eq!(score.breakdown.geographic, 18.0);
        assert!(score.total >= 60);
        assert_eq!(score.total, score.breakdown.sum().min(100.0).round() as u8);
    }

    #[test]
    fn test_category_score() {
        let score =
            score_category(&create_test_client(), &create_test_grant(), &create_test_source());
        // 15 funder + 10 grant + 50% focus overlap * 0.05
        assert!((score.points - 27.5).abs() < 1e-9);
        assert_eq!(score.factors.len(), 3);
    }

    #[test]
    fn test_category_bucket_match() {
        let mut client = create_test_client();
        client.category = Some("Health Services".to_string());
        let mut grant = create_test_grant();
        grant.category = Some("Community Health".to_string());
        grant.focus_areas.clear();

        let score = score_category(&client, &grant, &create_test_source());
        assert_eq!(score.points, 5.0);
        assert_eq!(score.factors, vec!["Related program area (health)"]);
    }

    #[test]
    fn test_category_missing() {
        let mut client = create_test_client();
        client.category = None;
        let score = score_category(&client, &create_test_grant(), &create_test_source());
        assert!((score.points - 2.5).abs() < 1e-9);
        assert_eq!(score.factors[0], CATEGORY_INCOMPLETE);
    }

    #[test]
    fn test_budget_bands() {
        let mut client = create_test_client();
        let mut grant = create_test_grant();
        grant.amount = Some("$100,000".to_string());

        let cases = [
            (100_000.0, 25.0), // excellent band plus exact-size bonus
            (150_000.0, 20.0),
            (60_000.0, 15.0),
            (40_000.0, 8.0),
            (500_000.0, 5.0),
            (10_000.0, 0.0),
        ];
        for (budget, expected) in cases {
            client.budget = Some(budget);
            assert_eq!(score_budget(&client, &grant).points, expected, "budget {budget}");
        }
    }

    #[test]
    fn test_budget_incomplete() {
        let mut client = create_test_client();
        client.budget = None;
        let mut grant = create_test_grant();
        grant.amount = None;

        let score = score_budget(&client, &grant);
        assert_eq!(score.points, 0.0);
        assert_eq!(score.factors, vec![BUDGET_INCOMPLETE]);

        let mut client = create_test_client();
        client.budget = Some(100_000.0);
        grant.amount = Some("Varies".to_string());
        assert_eq!(score_budget(&client, &grant).factors, vec![BUDGET_INCOMPLETE]);
    }

    #[test]
    fn test_geographic_score() {
        let mut client = create_test_client();
        let mut source = create_test_source();

        client.service_area = Some(GeographicScope::Regional);
        source.source_type = Some(SourceType::Government);
        source.scope = None;
        assert_eq!(score_geographic(&client, &source).points, 12.0);

        source.source_type = Some(SourceType::Community);
        assert_eq!(score_geographic(&client, &source).points, 16.0);

        source.source_type = Some(SourceType::Corporate);
        assert_eq!(score_geographic(&client, &source).points, 0.0);

        client.service_area = Some(GeographicScope::Local);
        source.source_type = Some(SourceType::PrivateFoundation);
        assert_eq!(score_geographic(&client, &source).points, 10.0);

        source.scope = Some(GeographicScope::Local);
        assert_eq!(score_geographic(&client, &source).points, 18.0);

        client.service_area = Some(GeographicScope::Statewide);
        assert_eq!(score_geographic(&client, &source).points, 15.0);

        client.service_area = None;
        let missing = score_geographic(&client, &source);
        assert_eq!(missing.points, 0.0);
        assert_eq!(missing.factors, vec![SERVICE_AREA_MISSING]);
    }

    #[test]
    fn test_geographic_score_from_reach_type() {
        let local: GrantSource = serde_json::from_value(serde_json::json!({
            "name": "County Arts Fund",
            "type": "local"
        }))
        .unwrap();
        let regional: GrantSource = serde_json::from_value(serde_json::json!({
            "name": "Tri-County Collaborative",
            "type": "Regional"
        }))
        .unwrap();
        let mut client = create_test_client();

        client.service_area = Some(GeographicScope::Local);
        assert_eq!(score_geographic(&client, &local).points, 18.0);

        client.service_area = Some(GeographicScope::Regional);
        assert_eq!(score_geographic(&client, &regional).points, 16.0);
        assert_eq!(score_geographic(&client, &local).points, 0.0);
    }

    #[test]
    fn test_geographic_score_capitalized_labels() {
        let client: Client = serde_json::from_value(serde_json::json!({
            "name": "Coastal Alliance",
            "serviceArea": "National"
        }))
        .unwrap();
        let source: GrantSource = serde_json::from_value(serde_json::json!({
            "name": "Department of Education",
            "type": "Government"
        }))
        .unwrap();

        let score = score_geographic(&client, &source);
        assert_eq!(score.points, 18.0);
        assert_eq!(score.factors, vec!["National reach fits funder scope"]);
    }

    #[test]
    fn test_population_score() {
        let client = create_test_client();
        let grant = create_test_grant();
        // "Youth" vs ["Youth"]
        assert_eq!(score_population(&client, &grant).points, 15.0);

        let mut client = create_test_client();
        client.target_population = vec!["Youth".to_string(), "Veterans".to_string()];
        assert!((score_population(&client, &grant).points - 7.5).abs() < 1e-9);

        client.target_population.clear();
        assert_eq!(score_population(&client, &grant).factors, vec![POPULATION_MISSING]);
    }

    #[test]
    fn test_experience_score() {
        let mut client = create_test_client();
        client.previous_grants = vec!["Education grant from State Board, $180,000".to_string()];
        client.operating_years = Some(12);

        let score = score_experience(&client, &create_test_grant(), &create_test_source());
        assert_eq!(score.points, 10.0);

        client.previous_grants = vec!["Arts council award $5,000".to_string()];
        client.operating_years = Some(1);
        let score = score_experience(&client, &create_test_grant(), &create_test_source());
        assert_eq!(score.points, 0.0);
        assert!(score.factors.is_empty());
    }

    #[test]
    fn test_caps_are_respected() {
        let caps = FactorCaps {
            category: 10.0,
            budget: 10.0,
            geographic: 10.0,
            population: 10.0,
            experience: 10.0,
        };
        let score = calculate_match_score(
            &create_test_client(),
            &create_test_grant(),
            &create_test_source(),
            &caps,
        );
        assert!(score.breakdown.category <= 10.0);
        assert!(score.breakdown.geographic <= 10.0);
        assert!(score.total <= 50);
    }
}

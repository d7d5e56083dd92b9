use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Grantee organization profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Annual operating budget in dollars
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub service_area: Option<GeographicScope>,
    #[serde(default)]
    pub target_population: Vec<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Free text such as "Gates Foundation education grant $150,000"
    #[serde(default)]
    pub previous_grants: Vec<String>,
    #[serde(default)]
    pub operating_years: Option<u32>,
}

/// Geographic reach, used both for a client's service area and a funder's scope
///
/// Matched case-insensitively; anything unrecognised becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeographicScope {
    Local,
    Regional,
    Statewide,
    National,
    Unknown,
}

impl GeographicScope {
    pub fn from_label(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "local" => GeographicScope::Local,
            "regional" => GeographicScope::Regional,
            "statewide" => GeographicScope::Statewide,
            "national" => GeographicScope::National,
            _ => GeographicScope::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for GeographicScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

/// Kind of funder behind a grant source
///
/// `Local` and `Regional` describe funders known only by their reach, such as
/// a county fund or a regional collaborative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Government,
    PrivateFoundation,
    Corporate,
    Community,
    Local,
    Regional,
    Other,
}

impl SourceType {
    pub fn from_label(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "government" => SourceType::Government,
            "private_foundation" | "private" | "foundation" => SourceType::PrivateFoundation,
            "corporate" => SourceType::Corporate,
            "community" => SourceType::Community,
            "local" => SourceType::Local,
            "regional" => SourceType::Regional,
            _ => SourceType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Government => "government",
            SourceType::PrivateFoundation => "private foundation",
            SourceType::Corporate => "corporate",
            SourceType::Community => "community",
            SourceType::Local => "local",
            SourceType::Regional => "regional",
            SourceType::Other => "other",
        }
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_label(&raw))
    }
}

/// Lowercase, with spaces and hyphens folded to underscores
fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

/// A funder and the opportunities it currently offers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSource {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub scope: Option<GeographicScope>,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

/// A single funding opportunity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text funding range, e.g. "$50,000 - $500,000"
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Per-factor points, each bounded by its cap in `FactorCaps`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub category: f64,
    pub budget: f64,
    pub geographic: f64,
    pub population: f64,
    pub experience: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.category + self.budget + self.geographic + self.population + self.experience
    }
}

/// Compatibility score of one client against one grant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total: u8,
    pub breakdown: ScoreBreakdown,
    pub factors: Vec<String>,
}

/// Deadline bucket for a grant relative to the analysis date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    Open,
    ClosingSoon,
    Closed,
    Rolling,
}

/// One step of a suggested application timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub step: String,
    /// Offset from today, rendered as "<N> days"
    pub due: String,
    pub status: String,
}

/// A scored grant together with everything the dashboard renders for it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub grant: Grant,
    pub source: SourceSummary,
    pub match_score: MatchScore,
    pub match_reasons: Vec<String>,
    pub timeline: Vec<TimelineStep>,
    pub action_steps: Vec<String>,
    pub deadline_status: DeadlineStatus,
    pub days_until_deadline: Option<i64>,
}

/// Source fields echoed alongside each match, without the nested grant list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub source_type: Option<SourceType>,
    pub scope: Option<GeographicScope>,
}

impl From<&GrantSource> for SourceSummary {
    fn from(source: &GrantSource) -> Self {
        Self {
            id: source.id.clone(),
            name: source.name.clone(),
            category: source.category.clone(),
            source_type: source.source_type,
            scope: source.scope,
        }
    }
}

/// Client-level summary across all qualifying matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateAnalysis {
    pub client_strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub match_factors: Vec<String>,
    pub summary: String,
}

/// Full output of analyzing one client against a set of sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAnalysis {
    pub matches: Vec<MatchResult>,
    pub analysis: AggregateAnalysis,
}

/// Point caps for each scoring factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorCaps {
    pub category: f64,
    pub budget: f64,
    pub geographic: f64,
    pub population: f64,
    pub experience: f64,
}

impl Default for FactorCaps {
    fn default() -> Self {
        Self {
            category: 30.0,
            budget: 25.0,
            geographic: 20.0,
            population: 15.0,
            experience: 10.0,
        }
    }
}

/// Tunable thresholds used by the matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Minimum total for a grant to appear in results
    pub qualification: u8,
    /// Matches at or above this count as strong in the aggregate analysis
    pub strong_match: u8,
    pub excellent_match: u8,
    pub closing_soon_days: i64,
    pub urgent_deadline_days: i64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            qualification: 40,
            strong_match: 75,
            excellent_match: 80,
            closing_soon_days: 30,
            urgent_deadline_days: 60,
        }
    }
}

use chrono::{NaiveDate, Utc};

use crate::core::{
    analysis::generate_client_analysis,
    reasons::generate_match_reasons,
    scoring::calculate_match_score,
    timeline::{days_until_deadline, determine_status, generate_action_steps, generate_timeline},
};
use crate::models::{
    AggregateAnalysis, Client, FactorCaps, Grant, GrantAnalysis, GrantSource, MatchResult,
    MatchScore, MatchThresholds, SourceSummary,
};

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every grant of every source against the client
/// 2. Keep grants at or above the qualification threshold
/// 3. Attach reasons, timeline and action steps
/// 4. Rank and summarize
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    caps: FactorCaps,
    thresholds: MatchThresholds,
}

impl Matcher {
    pub fn new(caps: FactorCaps, thresholds: MatchThresholds) -> Self {
        Self { caps, thresholds }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Score a single client/grant/source triple
    pub fn score(&self, client: &Client, grant: &Grant, source: &GrantSource) -> MatchScore {
        calculate_match_score(client, grant, source, &self.caps)
    }

    /// Analyze a client against all sources as of today (UTC)
    pub fn analyze(&self, client: &Client, sources: &[GrantSource]) -> GrantAnalysis {
        self.analyze_at(client, sources, Utc::now().date_naive())
    }

    /// Analyze a client against all sources as of `today`
    ///
    /// # Returns
    /// Qualifying matches ranked by total score (then earliest deadline, then
    /// title) and the client-level aggregate analysis.
    pub fn analyze_at(
        &self,
        client: &Client,
        sources: &[GrantSource],
        today: NaiveDate,
    ) -> GrantAnalysis {
        let total_grants: usize = sources.iter().map(|s| s.grants.len()).sum();
        if total_grants == 0 {
            tracing::debug!("No grants supplied for client {}", client.name);
            return GrantAnalysis::empty();
        }

        let mut matches: Vec<MatchResult> = sources
            .iter()
            .flat_map(|source| source.grants.iter().map(move |grant| (source, grant)))
            .filter_map(|(source, grant)| {
                let score = self.score(client, grant, source);

                if score.total < self.thresholds.qualification {
                    tracing::trace!(
                        "Grant '{}' scored {} for {}, below threshold {}",
                        grant.title,
                        score.total,
                        client.name,
                        self.thresholds.qualification
                    );
                    return None;
                }

                Some(self.build_result(client, grant, source, score, today))
            })
            .collect();

        // Highest score first, then soonest deadline (rolling last), then title
        matches.sort_by(|a, b| {
            b.match_score
                .total
                .cmp(&a.match_score.total)
                .then_with(|| match (a.grant.deadline, b.grant.deadline) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| a.grant.title.cmp(&b.grant.title))
        });

        tracing::debug!(
            "Client {} qualifies for {} of {} grants",
            client.name,
            matches.len(),
            total_grants
        );

        let analysis = generate_client_analysis(client, &matches, &self.thresholds);

        GrantAnalysis { matches, analysis }
    }

    /// Analyze several clients against the same sources
    pub fn analyze_batch_at(
        &self,
        clients: &[Client],
        sources: &[GrantSource],
        today: NaiveDate,
    ) -> Vec<GrantAnalysis> {
        clients
            .iter()
            .map(|client| self.analyze_at(client, sources, today))
            .collect()
    }

    fn build_result(
        &self,
        client: &Client,
        grant: &Grant,
        source: &GrantSource,
        score: MatchScore,
        today: NaiveDate,
    ) -> MatchResult {
        let days_until = days_until_deadline(grant.deadline, today);

        MatchResult {
            match_reasons: generate_match_reasons(client, grant, &score),
            timeline: generate_timeline(days_until),
            action_steps: generate_action_steps(
                &score.breakdown,
                days_until,
                self.thresholds.urgent_deadline_days,
            ),
            deadline_status: determine_status(
                grant.deadline,
                today,
                self.thresholds.closing_soon_days,
            ),
            days_until_deadline: days_until,
            grant: grant.clone(),
            source: SourceSummary::from(source),
            match_score: score,
        }
    }
}

impl GrantAnalysis {
    /// Result for a missing client or an empty grant list
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
            analysis: AggregateAnalysis::no_data(),
        }
    }
}

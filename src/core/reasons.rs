use crate::core::overlap::shared_words;
use crate::models::{Client, Grant, MatchScore};

/// Maximum number of factor strings promoted to reasons
const TOP_FACTORS: usize = 3;

/// Words longer than four characters both texts must share
const MIN_SHARED_MISSION_WORDS: usize = 2;

/// Build up to four human-readable reasons for a match
///
/// The first three non-empty factors (already ordered category, budget,
/// geographic, population, experience) are followed by a mission alignment
/// reason when the client's mission and the grant description share themes.
pub fn generate_match_reasons(client: &Client, grant: &Grant, score: &MatchScore) -> Vec<String> {
    let mut reasons: Vec<String> = score
        .factors
        .iter()
        .filter(|factor| !factor.trim().is_empty())
        .take(TOP_FACTORS)
        .cloned()
        .collect();

    if let (Some(mission), Some(description)) =
        (client.mission.as_deref(), grant.description.as_deref())
    {
        let shared = shared_words(mission, description);
        if shared.len() >= MIN_SHARED_MISSION_WORDS {
            reasons.push(format!(
                "Mission aligns with grant purpose (shared themes: {})",
                shared.join(", ")
            ));
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with(factors: &[&str]) -> MatchScore {
        MatchScore {
            factors: factors.iter().map(|f| f.to_string()).collect(),
            ..MatchScore::default()
        }
    }

    #[test]
    fn test_top_three_factors() {
        let score = score_with(&["a", "", "b", "c", "d"]);
        let reasons = generate_match_reasons(&Client::default(), &Grant::default(), &score);
        assert_eq!(reasons, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mission_reason() {
        let client = Client {
            mission: Some("Protecting coastal wetlands through community science".to_string()),
            ..Client::default()
        };
        let grant = Grant {
            description: Some("Grants for wetlands restoration and citizen science".to_string()),
            ..Grant::default()
        };

        let reasons = generate_match_reasons(&client, &grant, &score_with(&["x"]));
        assert_eq!(reasons.len(), 2);
        assert_eq!(
            reasons[1],
            "Mission aligns with grant purpose (shared themes: science, wetlands)"
        );
    }

    #[test]
    fn test_single_shared_word_is_not_enough() {
        let client = Client {
            mission: Some("Literacy programs".to_string()),
            ..Client::default()
        };
        let grant = Grant {
            description: Some("Funding for literacy".to_string()),
            ..Grant::default()
        };

        let reasons = generate_match_reasons(&client, &grant, &score_with(&[]));
        assert!(reasons.is_empty());
    }
}

use std::collections::BTreeSet;

/// Result of comparing two tag lists
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// 0-100
    pub score: f64,
    /// Items of the first list that matched something in the second
    pub common: Vec<String>,
}

impl Overlap {
    fn empty() -> Self {
        Self { score: 0.0, common: Vec::new() }
    }
}

/// Compare two tag lists using case-insensitive substring containment
///
/// Only items of `a` are collected, so `overlap(a, b)` and `overlap(b, a)`
/// can differ when one side has several items matching the same tag.
/// The denominator is the longer of the two lists.
pub fn overlap(a: &[String], b: &[String]) -> Overlap {
    if a.is_empty() || b.is_empty() {
        return Overlap::empty();
    }

    let b_lower: Vec<String> = b.iter().map(|item| item.to_lowercase()).collect();

    let common: Vec<String> = a
        .iter()
        .filter(|item| {
            let item_lower = item.to_lowercase();
            !item_lower.is_empty()
                && b_lower.iter().any(|other| {
                    !other.is_empty() && (item_lower.contains(other) || other.contains(&item_lower))
                })
        })
        .cloned()
        .collect();

    let score = common.len() as f64 / a.len().max(b.len()) as f64 * 100.0;

    Overlap { score, common }
}

/// Keyword groups recognised in eligibility text, with the label they map to
const POPULATION_KEYWORDS: &[(&[&str], &str)] = &[
    (&["youth", "children", "kids", "young people", "students", "teen"], "Youth"),
    (&["senior", "elderly", "older adult", "aging"], "Seniors"),
    (&["low-income", "low income", "poverty", "underserved"], "Low-Income"),
    (&["bipoc", "minority", "communities of color", "people of color"], "BIPOC"),
    (&["rural"], "Rural"),
    (&["indigenous", "native american", "tribal", "tribe"], "Indigenous"),
    (&["disabilit", "disabled"], "People with Disabilities"),
    (&["veteran"], "Veterans"),
    (&["immigrant"], "Immigrants"),
    (&["refugee"], "Refugees"),
    (&["lgbtq", "lgbt", "queer", "transgender"], "LGBTQ+"),
    (&["homeless", "unhoused", "housing insecure"], "Homeless"),
];

pub const GENERAL_PUBLIC: &str = "General Public";

/// Infer the populations a grant serves from its eligibility and description
///
/// Labels come back in keyword-table order. Falls back to "General Public".
pub fn infer_population(eligibility: Option<&str>, description: Option<&str>) -> Vec<String> {
    let text = format!(
        "{} {}",
        eligibility.unwrap_or_default(),
        description.unwrap_or_default()
    )
    .to_lowercase();

    let labels: Vec<String> = POPULATION_KEYWORDS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, label)| label.to_string())
        .collect();

    if labels.is_empty() {
        vec![GENERAL_PUBLIC.to_string()]
    } else {
        labels
    }
}

/// Distinct words longer than four characters present in both texts
///
/// Tokens are split on whitespace, lower-cased and trimmed of surrounding
/// punctuation. Output is sorted for stable reasons.
pub fn shared_words(a: &str, b: &str) -> Vec<String> {
    let words_a = significant_words(a);
    let words_b = significant_words(b);
    words_a.intersection(&words_b).cloned().collect()
}

fn significant_words(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() > 4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overlap_basic() {
        let result = overlap(&tags(&["STEM"]), &tags(&["stem", "Education"]));
        assert_eq!(result.common, vec!["STEM"]);
        assert!((result.score - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlap_substring_either_direction() {
        let result = overlap(&tags(&["Youth Education"]), &tags(&["education"]));
        assert_eq!(result.common, vec!["Youth Education"]);

        let result = overlap(&tags(&["arts"]), &tags(&["Performing Arts"]));
        assert_eq!(result.common, vec!["arts"]);
    }

    #[test]
    fn test_overlap_is_asymmetric() {
        let a = tags(&["youth sports", "youth arts", "youth health"]);
        let b = tags(&["youth", "seniors", "veterans"]);

        // Every item of `a` contains "youth"
        assert!((overlap(&a, &b).score - 100.0).abs() < f64::EPSILON);
        // Only "youth" of `b` matches something in `a`
        let reverse = overlap(&b, &a);
        assert_eq!(reverse.common, vec!["youth"]);
        assert!((reverse.score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_empty() {
        assert_eq!(overlap(&[], &tags(&["x"])), Overlap::empty());
        assert_eq!(overlap(&tags(&["x"]), &[]), Overlap::empty());
    }

    #[test]
    fn test_infer_population() {
        let found = infer_population(
            Some("Open to rural nonprofits serving low-income families"),
            Some("Supports youth programs"),
        );
        assert_eq!(found, vec!["Youth", "Low-Income", "Rural"]);
    }

    #[test]
    fn test_infer_population_default() {
        assert_eq!(infer_population(None, None), vec![GENERAL_PUBLIC]);
        assert_eq!(
            infer_population(Some("Any registered 501(c)(3)"), None),
            vec![GENERAL_PUBLIC]
        );
    }

    #[test]
    fn test_shared_words() {
        let words = shared_words(
            "We empower students through science education.",
            "Funding for science education programs that empower girls",
        );
        assert_eq!(words, vec!["education", "empower", "science"]);
    }
}

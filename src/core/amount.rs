use regex::Regex;
use std::sync::LazyLock;

/// Dollar figures such as "$50,000", "$1,250.50" or "$75000"
static CURRENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?").expect("currency pattern is valid")
});

/// Extract the largest dollar amount mentioned in a free-text field
///
/// `"$50,000 - $500,000"` yields `500000.0`. Text without any `$` figure
/// yields `None`; this never fails.
pub fn extract_max_amount(text: &str) -> Option<f64> {
    CURRENCY_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            let digits: String = m
                .as_str()
                .chars()
                .filter(|c| *c != '$' && *c != ',')
                .collect();
            digits.parse::<f64>().ok()
        })
        .filter(|value| value.is_finite())
        .fold(None, |max: Option<f64>, value| match max {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        })
}

/// Same as `extract_max_amount`, for optional fields
#[inline]
pub fn extract_optional_amount(text: Option<&str>) -> Option<f64> {
    text.and_then(extract_max_amount)
}

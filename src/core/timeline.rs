use chrono::NaiveDate;

use crate::models::{DeadlineStatus, ScoreBreakdown, TimelineStep};

/// Planning horizon assumed for grants without a deadline
pub const DEFAULT_HORIZON_DAYS: i64 = 365;

/// Milestones as (name, minimum days, fraction of the time remaining)
const MILESTONES: &[(&str, i64, f64)] = &[
    ("Research & Planning", 3, 0.1),
    ("Proposal Draft", 7, 0.4),
    ("Budget Preparation", 5, 0.6),
    ("Final Review", 3, 0.8),
    ("Submission", 0, 1.0),
];

/// Days from `today` until `deadline`, negative once it has passed
#[inline]
pub fn days_until_deadline(deadline: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    deadline.map(|deadline| (deadline - today).num_days())
}

/// Bucket a grant deadline relative to `today`
pub fn determine_status(
    deadline: Option<NaiveDate>,
    today: NaiveDate,
    closing_soon_days: i64,
) -> DeadlineStatus {
    match days_until_deadline(deadline, today) {
        None => DeadlineStatus::Rolling,
        Some(days) if days < 0 => DeadlineStatus::Closed,
        Some(days) if days <= closing_soon_days => DeadlineStatus::ClosingSoon,
        Some(_) => DeadlineStatus::Open,
    }
}

/// Suggest application milestones counted back from the deadline
///
/// Offsets are proportional to the days remaining, with per-step minimums.
/// Each milestone lands strictly before the next one where the window allows,
/// and the last one lands on the deadline itself.
pub fn generate_timeline(days_until: Option<i64>) -> Vec<TimelineStep> {
    let days = days_until.unwrap_or(DEFAULT_HORIZON_DAYS);

    if days < 0 {
        return vec![TimelineStep {
            step: "Deadline passed".to_string(),
            due: "0 days".to_string(),
            status: "missed".to_string(),
        }];
    }

    let mut offsets: Vec<i64> = MILESTONES
        .iter()
        .map(|(_, minimum, fraction)| (*minimum).max((days as f64 * fraction).round() as i64))
        .collect();

    // Walk back from the deadline so no milestone falls on or after its successor
    let mut next = days + 1;
    for offset in offsets.iter_mut().rev() {
        *offset = (*offset).min(next - 1).max(0);
        next = *offset;
    }

    MILESTONES
        .iter()
        .zip(offsets)
        .map(|((name, _, _), offset)| TimelineStep {
            step: name.to_string(),
            due: format!("{offset} days"),
            status: "pending".to_string(),
        })
        .collect()
}

/// Recommend next steps given the score breakdown and deadline pressure
pub fn generate_action_steps(
    breakdown: &ScoreBreakdown,
    days_until: Option<i64>,
    urgent_deadline_days: i64,
) -> Vec<String> {
    let mut steps = vec![
        "Review the full RFP and eligibility requirements".to_string(),
        "Gather organizational documents (financials, 501(c)(3) letter, board list)".to_string(),
        "Schedule a grant planning meeting with program and finance leads".to_string(),
    ];

    if breakdown.experience < 5.0 {
        steps.push(
            "Build capacity with smaller grants or a fiscal sponsor to strengthen track record"
                .to_string(),
        );
    }

    if breakdown.budget < 10.0 {
        steps.push(
            "Explore partnerships or a collaborative application to fit the award size".to_string(),
        );
    }

    let days = days_until.unwrap_or(DEFAULT_HORIZON_DAYS);
    if days < 0 {
        steps.push("Deadline has passed; watch for the next funding cycle".to_string());
    } else if days < urgent_deadline_days {
        steps.push(format!("Prioritize this application: deadline in {days} days"));
        steps.push("Contact the program officer this week to confirm fit".to_string());
    }

    if breakdown.population < 8.0 {
        steps.push(
            "Adapt program design to emphasize the populations this funder serves".to_string(),
        );
    }

    steps
}

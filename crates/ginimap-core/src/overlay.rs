//! Map overlay — which countries to highlight on the world map.

use std::collections::BTreeSet;

use crate::submission::SubmissionRecord;

/// The distinct, non-empty, upper-cased ISO-3 codes across all submissions.
///
/// Every country with any submission is highlighted, regardless of review
/// status — pending and rejected notes still mark the country so reviewers
/// can find them from the map. Consumed as a set; ordering is incidental.
pub fn overlay_countries(submissions: &[SubmissionRecord]) -> BTreeSet<String> {
  submissions
    .iter()
    .map(|s| s.country_iso3.trim().to_ascii_uppercase())
    .filter(|code| !code.is_empty())
    .collect()
}

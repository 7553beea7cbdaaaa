//! Country view projection — the computed read model for a selected country.
//!
//! Never stored, always derived from the reference table and the current
//! submissions table.

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  reference::{ReferenceRecord, ReferenceTable},
  submission::{Status, SubmissionRecord},
};

/// How many submissions the per-country panel shows.
pub const RECENT_LIMIT: usize = 12;

/// The view-ready structure for one selected country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryView {
  /// Reference facts for the selection; `None` when nothing is selected.
  pub facts:              Option<ReferenceRecord>,
  /// The most recently approved note, surfaced preferentially.
  pub featured_note:      Option<SubmissionRecord>,
  /// Up to [`RECENT_LIMIT`] submissions for the selection, newest first.
  pub recent_submissions: Vec<SubmissionRecord>,
}

impl CountryView {
  fn empty() -> Self {
    Self {
      facts:              None,
      featured_note:      None,
      recent_submissions: Vec::new(),
    }
  }
}

/// Project the per-country panel for `selected`.
///
/// `None` means no country is selected and yields the empty view. A code
/// with no reference record fails with [`Error::CountryNotFound`] — the
/// view layer only passes codes present on the map.
pub fn project_country(
  reference: &ReferenceTable,
  submissions: &[SubmissionRecord],
  selected: Option<&str>,
) -> Result<CountryView> {
  let Some(iso3) = selected else {
    return Ok(CountryView::empty());
  };

  let facts = reference
    .get(iso3)
    .cloned()
    .ok_or_else(|| Error::CountryNotFound(iso3.to_owned()))?;

  let mut matching: Vec<&SubmissionRecord> = submissions
    .iter()
    .filter(|s| s.country_iso3 == iso3)
    .collect();

  // Newest first; unparsable timestamps sort as oldest (None < Some).
  matching.sort_by(|a, b| b.parsed_timestamp().cmp(&a.parsed_timestamp()));

  let featured_note = matching
    .iter()
    .find(|s| s.status == Some(Status::Approved))
    .map(|s| (*s).clone());

  let recent_submissions =
    matching.into_iter().take(RECENT_LIMIT).cloned().collect();

  Ok(CountryView {
    facts: Some(facts),
    featured_note,
    recent_submissions,
  })
}

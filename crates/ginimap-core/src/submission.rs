//! Submission types — the log of student-authored country notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical column order of the submissions log. Files are always written
/// with exactly these columns; reads back-fill any that are absent.
pub const COLUMNS: [&str; 8] = [
  "timestamp",
  "student_id",
  "country_iso3",
  "title",
  "summary_md",
  "evidence_links",
  "rating",
  "status",
];

// ─── Status ──────────────────────────────────────────────────────────────────

/// Review state of a submission.
///
/// Values outside this set (including the empty string) read as `None` on
/// the record and are matched by no status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Pending,
  Approved,
  Rejected,
}

impl Status {
  /// The lower-case form stored in the `status` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
    }
  }

  /// Case-insensitive parse; anything unrecognised is `None`.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pending" => Some(Self::Pending),
      "approved" => Some(Self::Approved),
      "rejected" => Some(Self::Rejected),
      _ => None,
    }
  }
}

// ─── SubmissionRecord ────────────────────────────────────────────────────────

/// One entry of the submissions log.
///
/// `timestamp` stays a raw string: the log tolerates unparsable values,
/// which sort as oldest. `country_iso3` is upper-cased when the row is
/// written; codes with no reference record are tolerated and simply never
/// matched to a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
  /// RFC 3339 UTC timestamp assigned when the row was created.
  pub timestamp:      String,
  pub student_id:     String,
  pub country_iso3:   String,
  pub title:          String,
  /// Markdown body of the note.
  pub summary_md:     String,
  /// Semicolon-delimited link list, stored raw.
  pub evidence_links: String,
  /// 1–5, or absent.
  pub rating:         Option<u8>,
  pub status:         Option<Status>,
}

impl SubmissionRecord {
  /// Write-side normalisation: trim and upper-case the country code.
  pub fn normalized(mut self) -> Self {
    self.country_iso3 = self.country_iso3.trim().to_ascii_uppercase();
    self
  }

  /// The timestamp as a point in time, if it parses as RFC 3339.
  pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(self.timestamp.trim())
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
  }

  /// The evidence links split out of the raw semicolon-delimited field.
  pub fn evidence_link_list(&self) -> Vec<&str> {
    self
      .evidence_links
      .split(';')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .collect()
  }
}

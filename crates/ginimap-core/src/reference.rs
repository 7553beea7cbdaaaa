//! Reference dataset types — the read-only per-country Gini snapshot.
//!
//! The table is loaded once at startup and owned for the process lifetime;
//! a refreshed dataset takes effect on restart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One country's latest inequality snapshot. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
  pub country:        String,
  /// ISO-3 country code, upper-cased — the join key to the submissions log
  /// and the map's location identifier.
  pub iso3:           String,
  pub year:           i32,
  /// Gini coefficient on the 0–100 scale; higher is more unequal.
  pub gini:           f64,
  pub resource:       String,
  pub scale_detailed: String,
  pub income_group:   String,
  pub region_wb:      String,
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// The immutable reference table with an ISO-3 lookup index.
///
/// Upstream guarantees at most one row per country (latest-year-per-country
/// semantics). Should a duplicate slip through, the first row wins and table
/// order stays authoritative.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
  records: Vec<ReferenceRecord>,
  by_iso3: HashMap<String, usize>,
}

impl ReferenceTable {
  pub fn new(records: Vec<ReferenceRecord>) -> Self {
    let mut by_iso3 = HashMap::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
      by_iso3.entry(r.iso3.clone()).or_insert(i);
    }
    Self { records, by_iso3 }
  }

  /// Look up the unique record for an ISO-3 code.
  pub fn get(&self, iso3: &str) -> Option<&ReferenceRecord> {
    self.by_iso3.get(iso3).map(|&i| &self.records[i])
  }

  pub fn records(&self) -> &[ReferenceRecord] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(iso3: &str, year: i32) -> ReferenceRecord {
    ReferenceRecord {
      country:        "Testland".into(),
      iso3:           iso3.into(),
      year,
      gini:           33.3,
      resource:       "Income, net".into(),
      scale_detailed: "Per capita".into(),
      income_group:   "High income".into(),
      region_wb:      "Europe".into(),
    }
  }

  #[test]
  fn get_returns_the_unique_record() {
    let table = ReferenceTable::new(vec![record("ARG", 2022), record("BRA", 2021)]);
    assert_eq!(table.get("ARG").unwrap().year, 2022);
    assert_eq!(table.get("BRA").unwrap().year, 2021);
    assert!(table.get("XXX").is_none());
  }

  #[test]
  fn first_row_wins_on_duplicate_iso3() {
    let table = ReferenceTable::new(vec![record("ARG", 2022), record("ARG", 1999)]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("ARG").unwrap().year, 2022);
  }
}

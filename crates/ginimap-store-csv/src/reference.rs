//! Reference dataset loader with schema validation.
//!
//! Runs once at startup. A snapshot that cannot be fully trusted must not
//! reach the map, so any missing required column aborts the load; rows that
//! merely fail per-field coercion are dropped and the rest of the dataset
//! stays usable.

use std::path::Path;

use ginimap_core::reference::{ReferenceRecord, ReferenceTable};

use crate::{
  codec::normalize_header,
  error::{Error, Result},
};

/// Headers the snapshot must carry, as exported upstream.
const REQUIRED: [&str; 8] = [
  "country",
  "c3",
  "year",
  "gini",
  "resource",
  "scale_detailed",
  "incomegroup",
  "region_wb",
];

// Slots into `REQUIRED`, used when addressing parsed rows.
const COUNTRY: usize = 0;
const C3: usize = 1;
const YEAR: usize = 2;
const GINI: usize = 3;
const RESOURCE: usize = 4;
const SCALE_DETAILED: usize = 5;
const INCOMEGROUP: usize = 6;
const REGION_WB: usize = 7;

/// Parse and validate the read-only snapshot at `path`.
///
/// Comma-delimited first; if that yields a single header column the text is
/// re-read as semicolon-delimited (spreadsheet-export variant). Headers are
/// trimmed and lower-cased before validation. Rows whose `c3`, `year` or
/// `gini` fail coercion are excluded, never surfaced as partial records.
pub fn load_reference(path: impl AsRef<Path>) -> Result<ReferenceTable> {
  let text = std::fs::read_to_string(path)?;

  let (headers, rows) = parse_table(&text, b',')?;
  let (headers, rows) = if headers.len() == 1 {
    parse_table(&text, b';')?
  } else {
    (headers, rows)
  };

  let mut indices = [0usize; REQUIRED.len()];
  let mut missing = Vec::new();
  for (slot, name) in REQUIRED.iter().enumerate() {
    match headers.iter().position(|h| h == name) {
      Some(i) => indices[slot] = i,
      None => missing.push((*name).to_owned()),
    }
  }
  if !missing.is_empty() {
    return Err(Error::Schema { missing });
  }

  let mut records = Vec::with_capacity(rows.len());
  let mut dropped = 0usize;
  for row in &rows {
    let field = |slot: usize| row.get(indices[slot]).unwrap_or("").trim();

    let iso3 = field(C3).to_ascii_uppercase();
    let year = decode_year(field(YEAR));
    let gini = field(GINI).parse::<f64>().ok();

    if iso3.is_empty() {
      dropped += 1;
      continue;
    }
    let (Some(year), Some(gini)) = (year, gini) else {
      dropped += 1;
      continue;
    };

    records.push(ReferenceRecord {
      country:        field(COUNTRY).to_owned(),
      iso3,
      year,
      gini,
      resource:       field(RESOURCE).to_owned(),
      scale_detailed: field(SCALE_DETAILED).to_owned(),
      income_group:   field(INCOMEGROUP).to_owned(),
      region_wb:      field(REGION_WB).to_owned(),
    });
  }

  if dropped > 0 {
    tracing::debug!(dropped, "excluded reference rows that failed coercion");
  }

  Ok(ReferenceTable::new(records))
}

/// Years survive spreadsheet round-trips as floats (`"2018.0"`).
fn decode_year(s: &str) -> Option<i32> {
  s.parse::<i32>().ok().or_else(|| {
    s.parse::<f64>()
      .ok()
      .filter(|f| {
        f.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(f)
      })
      .map(|f| f as i32)
  })
}

fn parse_table(
  text: &str,
  delimiter: u8,
) -> Result<(Vec<String>, Vec<csv::StringRecord>)> {
  let mut reader = csv::ReaderBuilder::new()
    .delimiter(delimiter)
    .flexible(true)
    .from_reader(text.as_bytes());

  let headers: Vec<String> =
    reader.headers()?.iter().map(normalize_header).collect();

  let mut rows = Vec::new();
  for record in reader.records() {
    rows.push(record?);
  }
  Ok((headers, rows))
}

//! Encoding and decoding helpers between domain types and delimited rows.
//!
//! Reads are schema-tolerant: rows are addressed through a [`ColumnMap`]
//! built from the file's own header, and canonical columns absent from the
//! file read as empty strings. Writes always emit the canonical column set
//! in canonical order.

use ginimap_core::submission::{COLUMNS, Status, SubmissionRecord};

use crate::Result;

/// Trim and lower-case a header cell.
pub fn normalize_header(header: &str) -> String {
  header.trim().to_ascii_lowercase()
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Positions of the canonical columns within one file's header row.
pub struct ColumnMap {
  indices: [Option<usize>; COLUMNS.len()],
}

impl ColumnMap {
  pub fn from_headers(headers: &[String]) -> Self {
    let indices = COLUMNS.map(|name| headers.iter().position(|h| h == name));
    Self { indices }
  }

  fn field<'r>(&self, record: &'r csv::StringRecord, column: usize) -> &'r str {
    self.indices[column]
      .and_then(|i| record.get(i))
      .unwrap_or("")
  }

  pub fn decode_row(&self, record: &csv::StringRecord) -> SubmissionRecord {
    SubmissionRecord {
      timestamp:      self.field(record, 0).to_owned(),
      student_id:     self.field(record, 1).to_owned(),
      country_iso3:   self.field(record, 2).to_owned(),
      title:          self.field(record, 3).to_owned(),
      summary_md:     self.field(record, 4).to_owned(),
      evidence_links: self.field(record, 5).to_owned(),
      rating:         decode_rating(self.field(record, 6)),
      status:         Status::parse(self.field(record, 7)),
    }
  }
}

/// Unparsable ratings are treated as absent. Spreadsheet round-trips write
/// integer columns holding blanks as floats (`"4.0"`), so those are accepted
/// too.
pub fn decode_rating(s: &str) -> Option<u8> {
  let t = s.trim();
  if t.is_empty() {
    return None;
  }
  t.parse::<u8>().ok().or_else(|| {
    t.parse::<f64>()
      .ok()
      .filter(|f| f.fract() == 0.0 && (0.0..=255.0).contains(f))
      .map(|f| f as u8)
  })
}

/// Parse a whole submissions file into records.
pub fn decode_table(text: &str) -> Result<Vec<SubmissionRecord>> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .from_reader(text.as_bytes());

  let headers: Vec<String> =
    reader.headers()?.iter().map(normalize_header).collect();
  let map = ColumnMap::from_headers(&headers);

  let mut rows = Vec::new();
  for record in reader.records() {
    rows.push(map.decode_row(&record?));
  }
  Ok(rows)
}

// ─── Encoding ────────────────────────────────────────────────────────────────

fn encode_row(record: &SubmissionRecord) -> [String; COLUMNS.len()] {
  [
    record.timestamp.clone(),
    record.student_id.clone(),
    record.country_iso3.clone(),
    record.title.clone(),
    record.summary_md.clone(),
    record.evidence_links.clone(),
    record.rating.map(|r| r.to_string()).unwrap_or_default(),
    record
      .status
      .map(Status::as_str)
      .unwrap_or_default()
      .to_owned(),
  ]
}

/// Render `rows` as canonical delimited text, header row first.
pub fn encode_table(rows: &[SubmissionRecord]) -> Result<String> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record(COLUMNS)?;
  for row in rows {
    writer.write_record(encode_row(row))?;
  }
  let bytes = writer
    .into_inner()
    .map_err(|e| std::io::Error::other(e.to_string()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

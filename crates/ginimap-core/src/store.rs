//! The `SubmissionsStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `ginimap-store-csv`).
//! Higher layers (`ginimap-api`, the server binary) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::submission::SubmissionRecord;

/// Abstraction over the submissions log backend.
///
/// The log is append-only from the submission form's point of view; the
/// admin review flow rewrites the whole table at once (`replace_all`).
/// Whether writes are allowed at all is fixed when the backend is
/// constructed ([`read_only`](Self::read_only)).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SubmissionsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the current table. A missing backing file is an empty table, not
  /// an error.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Vec<SubmissionRecord>, Self::Error>> + Send + '_;

  /// Append one row (new row last, existing order preserved) and persist
  /// the table. Returns the row as stored, i.e. after write-side
  /// normalisation.
  fn append(
    &self,
    entry: SubmissionRecord,
  ) -> impl Future<Output = Result<SubmissionRecord, Self::Error>> + Send + '_;

  /// Replace the whole table with `rows`, exactly as provided — the bulk
  /// edit has full authority and the last writer wins. Returns the row
  /// count written.
  fn replace_all(
    &self,
    rows: Vec<SubmissionRecord>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Render the current table as canonical delimited text (header + rows),
  /// for offline download.
  fn export_csv(
    &self,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Whether the backend was opened in read-only mode. In that mode
  /// `append` and `replace_all` fail without touching storage.
  fn read_only(&self) -> bool;
}

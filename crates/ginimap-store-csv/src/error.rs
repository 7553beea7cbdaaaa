//! Error type for `ginimap-store-csv`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A dataset is missing required columns. Fatal for the reference
  /// snapshot; the submissions log never raises this (absent columns are
  /// back-filled on read instead).
  #[error("dataset missing required columns: {}", missing.join(", "))]
  Schema { missing: Vec<String> },

  /// A mutation was attempted while the store is in read-only mode. No
  /// state changed; the caller can surface the message and carry on.
  #[error("read-only mode: saving is disabled")]
  ReadOnly,

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed delimited data: {0}")]
  Csv(#[from] csv::Error),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for `ginimap-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller asked for a country that has no reference record. The view
  /// layer only passes codes present on the map, so this is a contract
  /// violation by the caller, not user input.
  #[error("no reference record for country: {0}")]
  CountryNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

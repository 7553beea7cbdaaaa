//! Delimited-file backend for the ginimap data service.
//!
//! Owns the two tabular datasets: the read-only reference snapshot
//! (validated once at startup) and the writable submissions log (re-read on
//! every operation, rewritten whole on every mutation). File I/O runs via
//! [`tokio::task::spawn_blocking`] so the async runtime is never blocked.

mod codec;
mod reference;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use reference::load_reference;
pub use store::CsvSubmissionsStore;

#[cfg(test)]
mod tests;

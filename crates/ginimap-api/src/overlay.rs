//! Handler for `GET /overlay`.

use std::collections::BTreeSet;

use axum::{Json, extract::State};
use ginimap_core::{overlay::overlay_countries, store::SubmissionsStore};

use crate::{AppState, error::ApiError};

/// `GET /overlay` — the ISO-3 codes to highlight on the map: every country
/// with any submission, regardless of review status.
pub async fn countries<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<BTreeSet<String>>, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  let submissions = state
    .store
    .load()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(overlay_countries(&submissions)))
}

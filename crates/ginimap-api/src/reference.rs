//! Handler for `GET /reference`.

use axum::{Json, extract::State};
use ginimap_core::{reference::ReferenceRecord, store::SubmissionsStore};

use crate::AppState;

/// `GET /reference` — the full startup-loaded snapshot, one record per
/// country, for the choropleth layer.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Json<Vec<ReferenceRecord>>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  Json(state.reference.records().to_vec())
}

//! Handler for `GET /countries/{iso3}`.

use axum::{
  Json,
  extract::{Path, State},
};
use ginimap_core::{
  project::{CountryView, project_country},
  store::SubmissionsStore,
};

use crate::{AppState, error::ApiError};

/// `GET /countries/{iso3}` — facts, featured note, and recent submissions
/// for one country. 404 when the code has no reference record: the view
/// layer must only pass codes present on the map.
pub async fn view<S>(
  State(state): State<AppState<S>>,
  Path(iso3): Path<String>,
) -> Result<Json<CountryView>, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  let submissions = state
    .store
    .load()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let view = project_country(&state.reference, &submissions, Some(&iso3))
    .map_err(|e| match e {
      ginimap_core::Error::CountryNotFound(code) => {
        ApiError::NotFound(format!("country {code} not found"))
      }
    })?;

  Ok(Json(view))
}

//! Handlers for `/submissions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/submissions` | Full current table |
//! | `POST` | `/submissions` | Body: [`NewSubmissionBody`]; returns 201 + stored row |
//! | `PUT`  | `/submissions` | Body: full edited table; last writer wins |
//! | `GET`  | `/submissions/export` | CSV download of the current table |

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
};
use chrono::Utc;
use ginimap_core::{
  store::SubmissionsStore,
  submission::{Status, SubmissionRecord},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /submissions`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<SubmissionRecord>>, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  let rows = state
    .store
    .load()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /submissions` — the submission form fields.
/// `timestamp` and `status` are always assigned server-side.
#[derive(Debug, Deserialize)]
pub struct NewSubmissionBody {
  pub student_id:     String,
  pub country_iso3:   String,
  pub title:          String,
  #[serde(default)]
  pub summary_md:     String,
  #[serde(default)]
  pub evidence_links: String,
  pub rating:         Option<u8>,
}

impl NewSubmissionBody {
  fn validate(&self) -> Result<(), ApiError> {
    if self.student_id.trim().is_empty() {
      return Err(ApiError::BadRequest("student_id must not be empty".into()));
    }
    if self.country_iso3.trim().is_empty() {
      return Err(ApiError::BadRequest(
        "country_iso3 must not be empty".into(),
      ));
    }
    if self.title.trim().is_empty() {
      return Err(ApiError::BadRequest("title must not be empty".into()));
    }
    if let Some(rating) = self.rating
      && !(1..=5).contains(&rating)
    {
      return Err(ApiError::BadRequest(
        "rating must be between 1 and 5".into(),
      ));
    }
    Ok(())
  }

  /// New rows enter the log pending review, stamped with the current time.
  fn into_record(self) -> SubmissionRecord {
    SubmissionRecord {
      timestamp:      Utc::now().to_rfc3339(),
      student_id:     self.student_id,
      country_iso3:   self.country_iso3,
      title:          self.title,
      summary_md:     self.summary_md,
      evidence_links: self.evidence_links,
      rating:         self.rating,
      status:         Some(Status::Pending),
    }
  }
}

/// `POST /submissions` — returns 201 + the row as stored.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewSubmissionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  if state.store.read_only() {
    return Err(ApiError::ReadOnly);
  }
  body.validate()?;

  let stored = state
    .store
    .append(body.into_record())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// Summary returned by `PUT /submissions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceSummary {
  pub rows: usize,
}

/// `PUT /submissions` — the admin review flow persisting bulk edits. The
/// body is taken as the new table exactly as provided; no diffing against
/// the prior version.
pub async fn replace_all<S>(
  State(state): State<AppState<S>>,
  Json(rows): Json<Vec<SubmissionRecord>>,
) -> Result<Json<ReplaceSummary>, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  if state.store.read_only() {
    return Err(ApiError::ReadOnly);
  }

  let written = state
    .store
    .replace_all(rows)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(ReplaceSummary { rows: written }))
}

// ─── Export ───────────────────────────────────────────────────────────────────

/// `GET /submissions/export` — the current table in the canonical delimited
/// format, served as a download.
pub async fn export<S>(
  State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  let dump = state
    .store
    .export_csv()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
      (
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"submissions.csv\"",
      ),
    ],
    dump,
  ))
}

//! JSON/CSV API for the ginimap data service.
//!
//! Exposes an axum [`Router`] backed by the startup-loaded reference table
//! and any [`SubmissionsStore`]. Rendering, routing, and the unprotected
//! admin entry point belong to the external view layer; no auth lives here.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", ginimap_api::api_router(state.clone()))
//! ```

pub mod error;

mod countries;
mod overlay;
mod reference;
mod submissions;

use std::sync::Arc;

use axum::{
  Json,
  Router,
  extract::State,
  routing::get,
};
use ginimap_core::{reference::ReferenceTable, store::SubmissionsStore};
use serde::Serialize;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// The reference table is the single instance created at startup; it is
/// never reloaded while the process runs.
#[derive(Clone)]
pub struct AppState<S> {
  pub reference: Arc<ReferenceTable>,
  pub store:     Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Reference dataset
    .route("/reference", get(reference::list::<S>))
    // Submissions log
    .route(
      "/submissions",
      get(submissions::list::<S>)
        .post(submissions::create::<S>)
        .put(submissions::replace_all::<S>),
    )
    .route("/submissions/export", get(submissions::export::<S>))
    // Projections
    .route("/countries/{iso3}", get(countries::view::<S>))
    .route("/overlay", get(overlay::countries::<S>))
    // Write-mode badge
    .route("/mode", get(mode::<S>))
    .with_state(state)
}

// ─── Mode ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ModeResponse {
  read_only: bool,
}

/// `GET /mode` — whether the store accepts writes; drives the
/// read-only/writable badge in the admin view.
async fn mode<S>(State(state): State<AppState<S>>) -> Json<ModeResponse>
where
  S: SubmissionsStore + Clone + Send + Sync + 'static,
{
  Json(ModeResponse {
    read_only: state.store.read_only(),
  })
}

// ─── Integration tests ────────────────────────────────────────────────────────

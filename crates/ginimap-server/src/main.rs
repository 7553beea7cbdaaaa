//! ginimap server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), layers
//! `GINIMAP_*` environment variables on top, loads the reference snapshot
//! (startup aborts if it fails validation), opens the submissions store,
//! and serves the JSON/CSV API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use ginimap_api::AppState;
use ginimap_store_csv::{CsvSubmissionsStore, load_reference};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `config.toml` with `GINIMAP_*`
/// environment variables taking precedence (e.g. `GINIMAP_READ_ONLY=true`,
/// `GINIMAP_DATA_DIR=/data`).
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:           String,
  #[serde(default = "default_port")]
  port:           u16,
  /// The read-only reference snapshot shipped with the deployment.
  #[serde(default = "default_reference_path")]
  reference_path: PathBuf,
  /// Root of writable storage; the submissions file lives here.
  #[serde(default = "default_data_dir")]
  data_dir:       PathBuf,
  /// Optional bundled dataset copied into `data_dir` on first run.
  #[serde(default)]
  seed_path:      Option<PathBuf>,
  /// Disables all writes; the API reports this so the view can badge it.
  #[serde(default)]
  read_only:      bool,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8050
}

fn default_reference_path() -> PathBuf {
  PathBuf::from("data/wiid_latest_per_country.csv")
}

fn default_data_dir() -> PathBuf {
  std::env::temp_dir().join("ginimap-submissions")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "ginimap data service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GINIMAP").try_parsing(true))
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The snapshot cannot be partially trusted: a schema failure here stops
  // the process before the map ever renders.
  let reference =
    load_reference(&server_cfg.reference_path).with_context(|| {
      format!(
        "failed to load reference dataset at {:?}",
        server_cfg.reference_path
      )
    })?;
  tracing::info!(countries = reference.len(), "reference dataset loaded");

  let store = CsvSubmissionsStore::open(
    &server_cfg.data_dir,
    server_cfg.seed_path.as_deref(),
    server_cfg.read_only,
  )
  .with_context(|| {
    format!(
      "failed to open submissions store in {:?}",
      server_cfg.data_dir
    )
  })?;

  if server_cfg.read_only {
    tracing::info!("read-only mode: submissions and admin saves are disabled");
  }

  let state = AppState {
    reference: Arc::new(reference),
    store:     Arc::new(store),
  };

  let app = ginimap_api::api_router(state).layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

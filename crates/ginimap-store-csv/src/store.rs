//! [`CsvSubmissionsStore`] — the delimited-file implementation of
//! [`SubmissionsStore`].

use std::{
  fs,
  path::{Path, PathBuf},
};

use ginimap_core::{store::SubmissionsStore, submission::SubmissionRecord};

use crate::{
  codec,
  error::{Error, Result},
};

/// Name of the writable submissions file inside the data directory.
const SUBMISSIONS_FILE: &str = "submissions.csv";

/// A submissions log backed by a single delimited text file.
///
/// There is no long-lived in-memory table: every operation re-reads the
/// file, every mutation rewrites it whole. Rewrites go through a temp file
/// and `rename`, so a write that fails part-way leaves the previous table
/// intact for subsequent reads.
///
/// Cloning is cheap — the store is just a path and a mode flag.
#[derive(Debug, Clone)]
pub struct CsvSubmissionsStore {
  path:      PathBuf,
  read_only: bool,
}

impl CsvSubmissionsStore {
  /// Open the store rooted at `data_dir`, seeding the writable file from
  /// `seed` on first run.
  ///
  /// Seeding is a verbatim byte copy and happens at most once: an existing
  /// writable file is never overwritten with the seed again, and the seed
  /// itself is never mutated. All writes from here on go to the writable
  /// path only.
  pub fn open(
    data_dir: impl AsRef<Path>,
    seed: Option<&Path>,
    read_only: bool,
  ) -> Result<Self> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(SUBMISSIONS_FILE);

    if !path.exists()
      && let Some(seed) = seed
      && seed.exists()
    {
      fs::copy(seed, &path)?;
      tracing::info!(
        seed = %seed.display(),
        to = %path.display(),
        "seeded submissions file"
      );
    }

    Ok(Self { path, read_only })
  }

  /// The writable file this store reads and rewrites.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Run blocking file work on the tokio blocking pool.
  async fn call<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Path) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let path = self.path.clone();
    tokio::task::spawn_blocking(move || f(&path)).await?
  }

  fn guard_writable(&self) -> Result<()> {
    if self.read_only {
      Err(Error::ReadOnly)
    } else {
      Ok(())
    }
  }

  fn load_sync(path: &Path) -> Result<Vec<SubmissionRecord>> {
    if !path.exists() {
      return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    codec::decode_table(&text)
  }

  fn write_sync(path: &Path, rows: &[SubmissionRecord]) -> Result<()> {
    let table = codec::encode_table(rows)?;
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, table.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
  }
}

impl SubmissionsStore for CsvSubmissionsStore {
  type Error = Error;

  async fn load(&self) -> Result<Vec<SubmissionRecord>> {
    self.call(|path| Self::load_sync(path)).await
  }

  async fn append(&self, entry: SubmissionRecord) -> Result<SubmissionRecord> {
    self.guard_writable()?;
    self
      .call(move |path| {
        let entry = entry.normalized();
        let mut rows = Self::load_sync(path)?;
        rows.push(entry.clone());
        Self::write_sync(path, &rows)?;
        tracing::debug!(rows = rows.len(), "appended submission");
        Ok(entry)
      })
      .await
  }

  async fn replace_all(&self, rows: Vec<SubmissionRecord>) -> Result<usize> {
    self.guard_writable()?;
    self
      .call(move |path| {
        Self::write_sync(path, &rows)?;
        tracing::debug!(rows = rows.len(), "replaced submissions table");
        Ok(rows.len())
      })
      .await
  }

  async fn export_csv(&self) -> Result<String> {
    self
      .call(|path| {
        let rows = Self::load_sync(path)?;
        codec::encode_table(&rows)
      })
      .await
  }

  fn read_only(&self) -> bool {
    self.read_only
  }
}

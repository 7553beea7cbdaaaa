//! Tests for the reference loader and the file-backed submissions store,
//! against throwaway on-disk directories.

use std::{fs, path::Path};

use ginimap_core::{
  store::SubmissionsStore,
  submission::{Status, SubmissionRecord},
};
use tempfile::TempDir;

use crate::{CsvSubmissionsStore, Error, load_reference};

const REFERENCE_CSV: &str = "\
country,c3,year,gini,resource,scale_detailed,incomegroup,region_wb
Argentina,arg,2022,40.7,Income (net),Per capita,Upper middle income,LAC
Brazil,BRA,2021,52.9,Income (net),Per capita,Upper middle income,LAC
Norway,NOR,2019,27.6,Income (net),Per capita,High income,Europe
";

fn write(path: &Path, contents: &str) {
  fs::write(path, contents).expect("write fixture");
}

fn entry(iso3: &str, timestamp: &str) -> SubmissionRecord {
  SubmissionRecord {
    timestamp:      timestamp.into(),
    student_id:     "s-42".into(),
    country_iso3:   iso3.into(),
    title:          "Inequality field note".into(),
    summary_md:     "Some **markdown**.".into(),
    evidence_links: "https://a.example;https://b.example".into(),
    rating:         Some(4),
    status:         Some(Status::Pending),
  }
}

// ─── Reference loader ────────────────────────────────────────────────────────

#[test]
fn reference_loads_and_upper_cases_iso3() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(&path, REFERENCE_CSV);

  let table = load_reference(&path).unwrap();
  assert_eq!(table.len(), 3);
  assert_eq!(table.get("ARG").unwrap().country, "Argentina");
  assert_eq!(table.get("ARG").unwrap().gini, 40.7);
  assert_eq!(table.get("NOR").unwrap().year, 2019);
}

#[test]
fn reference_missing_column_fails_naming_it() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(
    &path,
    "country,c3,year,resource,scale_detailed,incomegroup,region_wb\n\
     Argentina,ARG,2022,Income (net),Per capita,Upper middle income,LAC\n",
  );

  let err = load_reference(&path).unwrap_err();
  match err {
    Error::Schema { missing } => assert_eq!(missing, vec!["gini".to_string()]),
    other => panic!("expected Schema error, got: {other}"),
  }
}

#[test]
fn reference_drops_rows_failing_coercion() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(
    &path,
    "country,c3,year,gini,resource,scale_detailed,incomegroup,region_wb\n\
     Argentina,ARG,2022,40.7,r,s,i,w\n\
     Brazil,BRA,unknown,52.9,r,s,i,w\n\
     Chile,CHL,2020,not-a-number,r,s,i,w\n\
     Nameless,,2020,33.3,r,s,i,w\n\
     Norway,NOR,2019,27.6,r,s,i,w\n",
  );

  let table = load_reference(&path).unwrap();
  assert_eq!(table.len(), 2);
  assert!(table.get("ARG").is_some());
  assert!(table.get("NOR").is_some());
  assert!(table.get("BRA").is_none());
  assert!(table.get("CHL").is_none());
}

#[test]
fn reference_falls_back_to_semicolon_delimiter() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(
    &path,
    "country;c3;year;gini;resource;scale_detailed;incomegroup;region_wb\n\
     Argentina;ARG;2022;40.7;r;s;i;w\n",
  );

  let table = load_reference(&path).unwrap();
  assert_eq!(table.len(), 1);
  assert_eq!(table.get("ARG").unwrap().gini, 40.7);
}

#[test]
fn reference_headers_are_trimmed_and_lower_cased() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(
    &path,
    " Country ,C3, YEAR ,Gini,Resource,Scale_Detailed,IncomeGroup,Region_WB\n\
     Argentina,ARG,2022,40.7,r,s,i,w\n",
  );

  let table = load_reference(&path).unwrap();
  assert_eq!(table.len(), 1);
}

#[test]
fn reference_missing_file_is_fatal() {
  let dir = TempDir::new().unwrap();
  let err = load_reference(dir.path().join("absent.csv")).unwrap_err();
  assert!(matches!(err, Error::Io(_)));
}

#[test]
fn reference_tolerates_float_formatted_years() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("reference.csv");
  write(
    &path,
    "country,c3,year,gini,resource,scale_detailed,incomegroup,region_wb\n\
     Argentina,ARG,2022.0,40.7,r,s,i,w\n",
  );

  let table = load_reference(&path).unwrap();
  assert_eq!(table.get("ARG").unwrap().year, 2022);
}

// ─── Store: load ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_without_backing_file_is_empty() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  assert_eq!(store.load().await.unwrap(), Vec::new());
}

#[tokio::test]
async fn load_back_fills_columns_absent_from_older_files() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  // An older file from before `rating` and `status` existed.
  write(
    store.path(),
    "timestamp,student_id,country_iso3,title\n\
     2024-01-01T00:00:00Z,s-1,ARG,Old note\n",
  );

  let rows = store.load().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].title, "Old note");
  assert_eq!(rows[0].summary_md, "");
  assert_eq!(rows[0].evidence_links, "");
  assert_eq!(rows[0].rating, None);
  assert_eq!(rows[0].status, None);
}

#[tokio::test]
async fn load_lower_cases_status_and_drops_unknown_values() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  write(
    store.path(),
    "timestamp,student_id,country_iso3,title,summary_md,evidence_links,rating,status\n\
     2024-01-01T00:00:00Z,s-1,ARG,a,,,4,APPROVED\n\
     2024-01-02T00:00:00Z,s-2,BRA,b,,,4.0,Pending\n\
     2024-01-03T00:00:00Z,s-3,CHL,c,,,not-a-number,archived\n",
  );

  let rows = store.load().await.unwrap();
  assert_eq!(rows[0].status, Some(Status::Approved));
  assert_eq!(rows[0].rating, Some(4));
  assert_eq!(rows[1].status, Some(Status::Pending));
  assert_eq!(rows[1].rating, Some(4));
  assert_eq!(rows[2].status, None);
  assert_eq!(rows[2].rating, None);
}

// ─── Store: append ───────────────────────────────────────────────────────────

#[tokio::test]
async fn append_then_load_round_trips() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();

  let stored = store
    .append(entry("arg", "2024-05-01T12:00:00Z"))
    .await
    .unwrap();
  assert_eq!(stored.country_iso3, "ARG");

  let rows = store.load().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0], SubmissionRecord {
    country_iso3: "ARG".into(),
    ..entry("arg", "2024-05-01T12:00:00Z")
  });
}

#[tokio::test]
async fn append_preserves_existing_row_order() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();

  store.append(entry("ARG", "2024-05-01T12:00:00Z")).await.unwrap();
  store.append(entry("BRA", "2024-05-02T12:00:00Z")).await.unwrap();
  store.append(entry("CHL", "2024-05-03T12:00:00Z")).await.unwrap();

  let rows = store.load().await.unwrap();
  let order: Vec<&str> =
    rows.iter().map(|r| r.country_iso3.as_str()).collect();
  assert_eq!(order, vec!["ARG", "BRA", "CHL"]);
}

// ─── Store: read-only mode ───────────────────────────────────────────────────

#[tokio::test]
async fn read_only_append_fails_without_touching_the_file() {
  let dir = TempDir::new().unwrap();
  let writable = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  writable.append(entry("ARG", "2024-05-01T12:00:00Z")).await.unwrap();
  let before = fs::read(writable.path()).unwrap();

  let frozen = CsvSubmissionsStore::open(dir.path(), None, true).unwrap();
  assert!(frozen.read_only());
  let err = frozen.append(entry("BRA", "2024-05-02T12:00:00Z")).await;
  assert!(matches!(err, Err(Error::ReadOnly)));

  let after = fs::read(frozen.path()).unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn read_only_replace_all_fails() {
  let dir = TempDir::new().unwrap();
  let frozen = CsvSubmissionsStore::open(dir.path(), None, true).unwrap();
  let err = frozen.replace_all(vec![]).await;
  assert!(matches!(err, Err(Error::ReadOnly)));
  assert!(!frozen.path().exists());
}

// ─── Store: replace_all ──────────────────────────────────────────────────────

#[tokio::test]
async fn replace_all_has_full_authority() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();

  store.append(entry("ARG", "2024-05-01T12:00:00Z")).await.unwrap();
  store.append(entry("BRA", "2024-05-02T12:00:00Z")).await.unwrap();

  // The bulk edit omits the first row and flips the second to approved;
  // no diffing against the prior table happens.
  let mut kept = entry("BRA", "2024-05-02T12:00:00Z");
  kept.status = Some(Status::Approved);
  let written = store.replace_all(vec![kept.clone()]).await.unwrap();
  assert_eq!(written, 1);

  let rows = store.load().await.unwrap();
  assert_eq!(rows, vec![kept]);
}

// ─── Store: seeding ──────────────────────────────────────────────────────────

#[tokio::test]
async fn first_run_copies_the_seed_verbatim() {
  let dir = TempDir::new().unwrap();
  let seed = dir.path().join("seed.csv");
  write(
    &seed,
    "timestamp,student_id,country_iso3,title,summary_md,evidence_links,rating,status\n\
     2023-09-01T00:00:00Z,s-0,ARG,Seeded note,,,5,approved\n",
  );

  let data_dir = dir.path().join("data");
  let store =
    CsvSubmissionsStore::open(&data_dir, Some(&seed), false).unwrap();

  assert_eq!(fs::read(&seed).unwrap(), fs::read(store.path()).unwrap());
  let rows = store.load().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].status, Some(Status::Approved));
}

#[tokio::test]
async fn seeding_never_clobbers_an_existing_writable_file() {
  let dir = TempDir::new().unwrap();
  let seed = dir.path().join("seed.csv");
  write(&seed, "timestamp,student_id,country_iso3,title\nseed,s,ARG,x\n");

  let data_dir = dir.path().join("data");
  let store =
    CsvSubmissionsStore::open(&data_dir, Some(&seed), false).unwrap();
  store.append(entry("BRA", "2024-05-01T12:00:00Z")).await.unwrap();
  let before = fs::read(store.path()).unwrap();

  // Re-open with the same seed: the writable file must stay as it is.
  let reopened =
    CsvSubmissionsStore::open(&data_dir, Some(&seed), false).unwrap();
  assert_eq!(before, fs::read(reopened.path()).unwrap());
}

#[tokio::test]
async fn open_without_seed_starts_empty() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  assert!(!store.path().exists());
  assert!(store.load().await.unwrap().is_empty());
}

// ─── Store: export ───────────────────────────────────────────────────────────

#[tokio::test]
async fn export_renders_the_canonical_header_and_rows() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  store.append(entry("ARG", "2024-05-01T12:00:00Z")).await.unwrap();

  let dump = store.export_csv().await.unwrap();
  let mut lines = dump.lines();
  assert_eq!(
    lines.next(),
    Some(
      "timestamp,student_id,country_iso3,title,summary_md,evidence_links,rating,status"
    )
  );
  let row = lines.next().unwrap();
  assert!(row.contains("ARG"));
  assert!(row.contains("pending"));
}

#[tokio::test]
async fn export_of_an_empty_store_is_just_the_header() {
  let dir = TempDir::new().unwrap();
  let store = CsvSubmissionsStore::open(dir.path(), None, false).unwrap();
  let dump = store.export_csv().await.unwrap();
  assert_eq!(dump.lines().count(), 1);
}

//! The pipeline driver: discover, parse, derive, resolve, write, commit.
//!
//! Files are processed one after another in discovery order. Each group of
//! `batch_commit_size` files shares one transaction; an error anywhere in the
//! group drops the transaction, which rolls it back, and aborts the run.
//! Groups committed before the error stay committed, and only they are
//! reported as processed.

use std::{
  num::NonZeroUsize,
  path::{Path, PathBuf},
};

use sparkify_core::{
  derive::PlayKey,
  record::EventRecord,
  row::{ArtistRow, SongPlayRow, SongRow, TimeRow, UserRow},
  warehouse::{Warehouse, WarehouseTx},
};

use crate::{EtlConfig, Error, Result};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// The files of both roots, discovered before anything is written.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
  pub catalog: Vec<PathBuf>,
  pub logs:    Vec<PathBuf>,
}

impl Inputs {
  /// Discover both roots. A missing root fails here, before any write.
  pub fn discover(config: &EtlConfig) -> Result<Self> {
    let catalog = sparkify_source::discover(&config.catalog_root, &config.extension)?;
    tracing::info!("{} files found in {}", catalog.len(), config.catalog_root.display());

    let logs = sparkify_source::discover(&config.log_root, &config.extension)?;
    tracing::info!("{} files found in {}", logs.len(), config.log_root.display());

    Ok(Self { catalog, logs })
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Counts from the catalog pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogReport {
  pub files:            usize,
  pub songs_inserted:   usize,
  pub artists_inserted: usize,
}

/// Counts from the event pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventReport {
  pub files:          usize,
  /// Every event read, whatever its page.
  pub events:         usize,
  /// `NextSong` events, one songplay row each.
  pub plays:          usize,
  pub resolved:       usize,
  pub users_inserted: usize,
  pub time_inserted:  usize,
}

impl EventReport {
  pub fn unresolved(&self) -> usize { self.plays - self.resolved }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
  pub catalog: CatalogReport,
  pub events:  EventReport,
}

// ─── Driver ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Pass {
  Catalog,
  Events,
}

/// Drives both passes against a warehouse it borrows exclusively.
pub struct Pipeline<'w, W: Warehouse> {
  warehouse:         &'w mut W,
  batch_commit_size: NonZeroUsize,
}

impl<'w, W: Warehouse> Pipeline<'w, W> {
  pub fn new(warehouse: &'w mut W, batch_commit_size: NonZeroUsize) -> Self {
    Self { warehouse, batch_commit_size }
  }

  /// Load the catalog, then the event logs.
  pub fn run(&mut self, inputs: &Inputs) -> Result<RunReport> {
    let catalog = self.load_catalog(&inputs.catalog)?;
    let events = self.load_events(&inputs.logs)?;
    Ok(RunReport { catalog, events })
  }

  /// Write one song row and one artist row per catalog file.
  pub fn load_catalog(&mut self, files: &[PathBuf]) -> Result<CatalogReport> {
    let mut report = RunReport::default();
    self.process_files(files, Pass::Catalog, &mut report)?;
    Ok(report.catalog)
  }

  /// Write time, user and songplay rows for every `NextSong` event.
  pub fn load_events(&mut self, files: &[PathBuf]) -> Result<EventReport> {
    let mut report = RunReport::default();
    self.process_files(files, Pass::Events, &mut report)?;
    Ok(report.events)
  }

  fn process_files(
    &mut self,
    files: &[PathBuf],
    pass: Pass,
    report: &mut RunReport,
  ) -> Result<()> {
    let total = files.len();
    let mut done = 0;

    for group in files.chunks(self.batch_commit_size.get()) {
      let mut tx = self.warehouse.begin().map_err(Error::store)?;

      for path in group {
        let outcome = match pass {
          Pass::Catalog => load_catalog_file(&mut tx, path, &mut report.catalog),
          Pass::Events => load_event_file(&mut tx, path, &mut report.events),
        };
        if let Err(e) = outcome {
          tracing::error!(path = %path.display(), "aborting run, rolling back uncommitted files");
          return Err(e);
        }
      }

      tx.commit().map_err(Error::store)?;
      tracing::debug!(files = group.len(), "committed");

      // Progress only counts files whose writes are committed.
      for _ in group {
        done += 1;
        tracing::info!("{done}/{total} files processed.");
      }
    }

    Ok(())
  }
}

// ─── Per-file loaders ────────────────────────────────────────────────────────

fn load_catalog_file<T: WarehouseTx>(
  tx: &mut T,
  path: &Path,
  report: &mut CatalogReport,
) -> Result<()> {
  let record = sparkify_source::read_catalog(path)?;

  if tx.insert_song(&SongRow::from(&record)).map_err(Error::store)?.is_inserted() {
    report.songs_inserted += 1;
  }
  if tx.insert_artist(&ArtistRow::from(&record)).map_err(Error::store)?.is_inserted() {
    report.artists_inserted += 1;
  }

  report.files += 1;
  Ok(())
}

fn load_event_file<T: WarehouseTx>(
  tx: &mut T,
  path: &Path,
  report: &mut EventReport,
) -> Result<()> {
  let events = sparkify_source::read_events(path)?;
  let plays: Vec<&EventRecord> = events.iter().filter(|ev| ev.is_next_song()).collect();

  let derive_err = |source: sparkify_core::Error| Error::Derive { path: path.to_path_buf(), source };

  for ev in &plays {
    let row = TimeRow::from_millis(ev.ts).map_err(derive_err)?;
    if tx.insert_time(&row).map_err(Error::store)?.is_inserted() {
      report.time_inserted += 1;
    }
  }

  for ev in &plays {
    let row = UserRow::from_event(ev).map_err(derive_err)?;
    if tx.insert_user(&row).map_err(Error::store)?.is_inserted() {
      report.users_inserted += 1;
    }
  }

  let mut resolved = 0;
  for ev in &plays {
    let found = match PlayKey::from_event(ev) {
      Some(key) => tx.resolve(&key).map_err(Error::store)?,
      None => None,
    };
    if found.is_some() {
      resolved += 1;
    }
    tx.insert_songplay(&SongPlayRow::from_event(ev, found)).map_err(Error::store)?;
  }

  tracing::debug!(
    path = %path.display(),
    events = events.len(),
    plays = plays.len(),
    resolved,
    "loaded event log"
  );

  report.files += 1;
  report.events += events.len();
  report.plays += plays.len();
  report.resolved += resolved;
  Ok(())
}

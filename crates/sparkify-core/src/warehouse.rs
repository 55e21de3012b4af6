//! The [`Warehouse`] trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `sparkify-store-sqlite`). The pipeline driver depends on this abstraction,
//! not on any concrete engine.

use crate::{
  derive::PlayKey,
  row::{ArtistRow, SongPlayRow, SongRow, TimeRow, UserRow},
};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The five warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Songs,
  Artists,
  Users,
  Time,
  Songplays,
}

impl Table {
  pub fn name(self) -> &'static str {
    match self {
      Table::Songs => "songs",
      Table::Artists => "artists",
      Table::Users => "users",
      Table::Time => "time",
      Table::Songplays => "songplays",
    }
  }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
  pub songs:     u64,
  pub artists:   u64,
  pub users:     u64,
  pub time:      u64,
  pub songplays: u64,
}

// ─── Write results ───────────────────────────────────────────────────────────

/// What an insert-or-ignore write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  Inserted,
  /// A row with the same natural key already existed; nothing was written.
  Ignored,
}

impl WriteOutcome {
  pub fn is_inserted(self) -> bool { matches!(self, Self::Inserted) }
}

/// The catalog identifiers a play event resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMatch {
  pub song_id:   String,
  pub artist_id: String,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A relational store holding the five warehouse tables.
///
/// All writes go through a [`WarehouseTx`] obtained from [`Warehouse::begin`].
/// A transaction that is dropped without [`WarehouseTx::commit`] is rolled
/// back, so every exit path releases it.
pub trait Warehouse {
  type Error: std::error::Error + Send + Sync + 'static;

  type Tx<'a>: WarehouseTx<Error = Self::Error>
  where
    Self: 'a;

  /// Create any missing tables. Idempotent.
  fn create_tables(&mut self) -> Result<(), Self::Error>;

  /// Drop every table and recreate it empty.
  fn reset(&mut self) -> Result<(), Self::Error>;

  /// Open a transaction. Only one may be open at a time.
  fn begin(&mut self) -> Result<Self::Tx<'_>, Self::Error>;

  /// Count the rows of every table.
  fn counts(&self) -> Result<TableCounts, Self::Error>;
}

/// An open transaction against a [`Warehouse`].
///
/// Reference tables (songs, artists, users, time) use insert-or-ignore on
/// their natural key. The songplays fact table is an unconditional insert.
pub trait WarehouseTx {
  type Error: std::error::Error + Send + Sync + 'static;

  fn insert_song(&mut self, row: &SongRow) -> Result<WriteOutcome, Self::Error>;

  fn insert_artist(&mut self, row: &ArtistRow) -> Result<WriteOutcome, Self::Error>;

  /// An existing user is left untouched, even if `level` differs.
  fn insert_user(&mut self, row: &UserRow) -> Result<WriteOutcome, Self::Error>;

  fn insert_time(&mut self, row: &TimeRow) -> Result<WriteOutcome, Self::Error>;

  /// Insert a fact row and return its assigned `songplay_id`.
  fn insert_songplay(&mut self, row: &SongPlayRow) -> Result<i64, Self::Error>;

  /// Find the song and artist whose title, artist name and duration all
  /// equal `key` exactly. The first match wins when there are several.
  fn resolve(&self, key: &PlayKey<'_>) -> Result<Option<SongMatch>, Self::Error>;

  /// Make every write in this transaction durable.
  fn commit(self) -> Result<(), Self::Error>;
}

//! [`SqliteWarehouse`] — the SQLite implementation of [`Warehouse`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _, Transaction};

use sparkify_core::{
  derive::PlayKey,
  row::{ArtistRow, SongPlayRow, SongRow, TimeRow, UserRow},
  warehouse::{SongMatch, Table, TableCounts, Warehouse, WarehouseTx, WriteOutcome},
};

use crate::{
  Error, Result,
  schema::{
    CREATE_TABLES, DROP_TABLES, INSERT_ARTIST, INSERT_SONG, INSERT_SONGPLAY, INSERT_TIME,
    INSERT_USER, PRAGMAS, SELECT_SONG_MATCH,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sparkify warehouse backed by a single SQLite file.
pub struct SqliteWarehouse {
  conn: Connection,
}

impl SqliteWarehouse {
  /// Open (or create) a warehouse at `path` and create any missing tables.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)
      .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    Self::init(conn)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(PRAGMAS)?;
    let mut store = Self { conn };
    store.create_tables()?;
    Ok(store)
  }

  fn count(&self, table: Table) -> Result<u64> {
    let n: i64 = self.conn.query_row(
      &format!("SELECT COUNT(*) FROM {}", table.name()),
      [],
      |r| r.get(0),
    )?;
    Ok(n as u64)
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &Connection { &self.conn }
}

impl Warehouse for SqliteWarehouse {
  type Error = Error;
  type Tx<'a> = SqliteTx<'a>;

  fn create_tables(&mut self) -> Result<()> {
    self.conn.execute_batch(CREATE_TABLES)?;
    Ok(())
  }

  fn reset(&mut self) -> Result<()> {
    let tx = self.conn.transaction()?;
    tx.execute_batch(DROP_TABLES)?;
    tx.execute_batch(CREATE_TABLES)?;
    tx.commit()?;
    tracing::info!("dropped and recreated all tables");
    Ok(())
  }

  fn begin(&mut self) -> Result<SqliteTx<'_>> {
    Ok(SqliteTx { tx: self.conn.transaction()? })
  }

  fn counts(&self) -> Result<TableCounts> {
    Ok(TableCounts {
      songs:     self.count(Table::Songs)?,
      artists:   self.count(Table::Artists)?,
      users:     self.count(Table::Users)?,
      time:      self.count(Table::Time)?,
      songplays: self.count(Table::Songplays)?,
    })
  }
}

// ─── Transaction ─────────────────────────────────────────────────────────────

/// An open SQLite transaction. Dropping it without [`WarehouseTx::commit`]
/// rolls back every write made through it.
pub struct SqliteTx<'a> {
  tx: Transaction<'a>,
}

/// Map the affected-row count of an insert-or-ignore to its outcome.
fn outcome(changed: usize) -> WriteOutcome {
  if changed == 0 { WriteOutcome::Ignored } else { WriteOutcome::Inserted }
}

impl WarehouseTx for SqliteTx<'_> {
  type Error = Error;

  fn insert_song(&mut self, row: &SongRow) -> Result<WriteOutcome> {
    let changed = self.tx.prepare_cached(INSERT_SONG)?.execute(rusqlite::params![
      row.song_id,
      row.title,
      row.artist_id,
      row.year,
      row.duration,
    ])?;
    Ok(outcome(changed))
  }

  fn insert_artist(&mut self, row: &ArtistRow) -> Result<WriteOutcome> {
    let changed = self.tx.prepare_cached(INSERT_ARTIST)?.execute(rusqlite::params![
      row.artist_id,
      row.name,
      row.location,
      row.latitude,
      row.longitude,
    ])?;
    Ok(outcome(changed))
  }

  fn insert_user(&mut self, row: &UserRow) -> Result<WriteOutcome> {
    let changed = self.tx.prepare_cached(INSERT_USER)?.execute(rusqlite::params![
      row.user_id,
      row.first_name,
      row.last_name,
      row.gender,
      row.level,
    ])?;
    Ok(outcome(changed))
  }

  fn insert_time(&mut self, row: &TimeRow) -> Result<WriteOutcome> {
    let changed = self.tx.prepare_cached(INSERT_TIME)?.execute(rusqlite::params![
      row.start_time,
      row.hour,
      row.day,
      row.week,
      row.month,
      row.year,
      row.weekday,
    ])?;
    Ok(outcome(changed))
  }

  fn insert_songplay(&mut self, row: &SongPlayRow) -> Result<i64> {
    self.tx.prepare_cached(INSERT_SONGPLAY)?.execute(rusqlite::params![
      row.start_time,
      row.user_id,
      row.level,
      row.song_id,
      row.artist_id,
      row.session_id,
      row.location,
      row.user_agent,
    ])?;
    Ok(self.tx.last_insert_rowid())
  }

  fn resolve(&self, key: &PlayKey<'_>) -> Result<Option<SongMatch>> {
    let found = self
      .tx
      .prepare_cached(SELECT_SONG_MATCH)?
      .query_row(rusqlite::params![key.title, key.artist, key.duration], |r| {
        Ok(SongMatch { song_id: r.get(0)?, artist_id: r.get(1)? })
      })
      .optional()?;
    Ok(found)
  }

  fn commit(self) -> Result<()> {
    self.tx.commit()?;
    Ok(())
  }
}

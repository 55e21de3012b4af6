//! Pure derivations from input records to table rows.
//!
//! Nothing here touches the filesystem or a database.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::{
  Error, Result,
  record::{CatalogRecord, EventRecord},
  row::{ArtistRow, SongPlayRow, SongRow, TimeRow, UserRow},
  warehouse::SongMatch,
};

// ─── Catalog projection ──────────────────────────────────────────────────────

impl From<&CatalogRecord> for SongRow {
  fn from(rec: &CatalogRecord) -> Self {
    Self {
      song_id:   rec.song_id.clone(),
      title:     rec.title.clone(),
      artist_id: Some(rec.artist_id.clone()),
      year:      rec.year,
      duration:  rec.duration,
    }
  }
}

impl From<&CatalogRecord> for ArtistRow {
  fn from(rec: &CatalogRecord) -> Self {
    Self {
      artist_id: rec.artist_id.clone(),
      name:      rec.artist_name.clone(),
      location:  rec.artist_location.clone(),
      latitude:  rec.artist_latitude,
      longitude: rec.artist_longitude,
    }
  }
}

// ─── Temporal decomposition ──────────────────────────────────────────────────

impl TimeRow {
  /// Decompose an epoch-millisecond UTC timestamp into calendar parts.
  pub fn from_millis(ts: i64) -> Result<Self> {
    let dt = DateTime::<Utc>::from_timestamp_millis(ts).ok_or(Error::TimestampOutOfRange(ts))?;

    Ok(Self {
      start_time: ts,
      hour:       dt.hour(),
      day:        dt.day(),
      week:       dt.iso_week().week(),
      month:      dt.month(),
      year:       dt.year(),
      weekday:    dt.weekday().num_days_from_monday(),
    })
  }
}

// ─── Event projection ────────────────────────────────────────────────────────

impl UserRow {
  /// Project the user fields of an event. Fails if the event carries no
  /// user id.
  pub fn from_event(ev: &EventRecord) -> Result<Self> {
    let user_id = ev
      .user_id
      .clone()
      .ok_or(Error::MissingField { ts: ev.ts, field: "userId" })?;

    Ok(Self {
      user_id,
      first_name: ev.first_name.clone(),
      last_name:  ev.last_name.clone(),
      gender:     ev.gender.clone(),
      level:      ev.level.clone(),
    })
  }
}

impl SongPlayRow {
  /// Build the fact row for an event. An unresolved event keeps null song
  /// and artist references.
  pub fn from_event(ev: &EventRecord, resolved: Option<SongMatch>) -> Self {
    let (song_id, artist_id) = match resolved {
      Some(m) => (Some(m.song_id), Some(m.artist_id)),
      None    => (None, None),
    };

    Self {
      start_time: ev.ts,
      user_id: ev.user_id.clone(),
      level: ev.level.clone(),
      song_id,
      artist_id,
      session_id: ev.session_id,
      location: ev.location.clone(),
      user_agent: ev.user_agent.clone(),
    }
  }
}

// ─── Resolution key ──────────────────────────────────────────────────────────

/// The three fields a play event is matched on against the song catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayKey<'a> {
  pub title:    &'a str,
  pub artist:   &'a str,
  /// Seconds; compared for exact equality.
  pub duration: f64,
}

impl<'a> PlayKey<'a> {
  /// `None` when the event lacks a title, artist name or length.
  pub fn from_event(ev: &'a EventRecord) -> Option<Self> {
    Some(Self {
      title:    ev.song.as_deref()?,
      artist:   ev.artist.as_deref()?,
      duration: ev.length?,
    })
  }
}

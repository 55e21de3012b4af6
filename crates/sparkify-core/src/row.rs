//! Typed rows, one struct per warehouse table, in declared column order.

/// A row of the `songs` table. Keyed by `song_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
  pub song_id:   String,
  pub title:     String,
  pub artist_id: Option<String>,
  /// Release year; `0` means unknown in the source catalog.
  pub year:      Option<i32>,
  /// Seconds.
  pub duration:  f64,
}

/// A row of the `artists` table. Keyed by `artist_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
  pub artist_id: String,
  pub name:      String,
  pub location:  Option<String>,
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
}

/// A row of the `users` table. Keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
  pub user_id:    String,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub gender:     Option<String>,
  /// Subscription level, `free` or `paid`.
  pub level:      Option<String>,
}

/// A row of the `time` table, keyed by `start_time` (epoch ms).
///
/// `weekday` counts from Monday: `0` is Monday, `6` is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRow {
  pub start_time: i64,
  pub hour:       u32,
  pub day:        u32,
  /// ISO-8601 week of year.
  pub week:       u32,
  pub month:      u32,
  pub year:       i32,
  pub weekday:    u32,
}

/// A row of the `songplays` fact table. The surrogate `songplay_id` is
/// assigned by the store on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct SongPlayRow {
  pub start_time: i64,
  pub user_id:    Option<String>,
  pub level:      Option<String>,
  pub song_id:    Option<String>,
  pub artist_id:  Option<String>,
  pub session_id: i64,
  pub location:   Option<String>,
  pub user_agent: Option<String>,
}

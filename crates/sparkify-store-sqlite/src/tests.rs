//! Integration tests for `SqliteWarehouse` against an in-memory database.

use sparkify_core::{
  derive::PlayKey,
  row::{ArtistRow, SongPlayRow, SongRow, TimeRow, UserRow},
  warehouse::{SongMatch, TableCounts, Warehouse, WarehouseTx, WriteOutcome},
};

use crate::SqliteWarehouse;

fn store() -> SqliteWarehouse {
  SqliteWarehouse::open_in_memory().expect("in-memory store")
}

fn song() -> SongRow {
  SongRow {
    song_id:   "SOZCTXZ12AB0182364".into(),
    title:     "Setanta matins".into(),
    artist_id: Some("AR5KOSW1187FB35FF4".into()),
    year:      Some(0),
    duration:  269.58322,
  }
}

fn artist() -> ArtistRow {
  ArtistRow {
    artist_id: "AR5KOSW1187FB35FF4".into(),
    name:      "Elena".into(),
    location:  Some("Dubai UAE".into()),
    latitude:  Some(49.80388),
    longitude: Some(15.47491),
  }
}

fn user(level: &str) -> UserRow {
  UserRow {
    user_id:    "15".into(),
    first_name: Some("Lily".into()),
    last_name:  Some("Koch".into()),
    gender:     Some("F".into()),
    level:      Some(level.into()),
  }
}

fn play(session_id: i64) -> SongPlayRow {
  SongPlayRow {
    start_time: 1_541_106_673_000,
    user_id:    Some("15".into()),
    level:      Some("paid".into()),
    song_id:    None,
    artist_id:  None,
    session_id,
    location:   Some("Chicago-Naperville-Elgin, IL-IN-WI".into()),
    user_agent: None,
  }
}

fn load_catalog(s: &mut SqliteWarehouse) {
  let mut tx = s.begin().unwrap();
  tx.insert_song(&song()).unwrap();
  tx.insert_artist(&artist()).unwrap();
  tx.commit().unwrap();
}

// ─── Reference tables ────────────────────────────────────────────────────────

#[test]
fn fresh_store_is_empty() {
  let s = store();
  assert_eq!(s.counts().unwrap(), TableCounts::default());
}

#[test]
fn song_and_artist_inserts_are_idempotent() {
  let mut s = store();

  let mut tx = s.begin().unwrap();
  assert_eq!(tx.insert_song(&song()).unwrap(), WriteOutcome::Inserted);
  assert_eq!(tx.insert_artist(&artist()).unwrap(), WriteOutcome::Inserted);
  tx.commit().unwrap();

  let mut tx = s.begin().unwrap();
  assert_eq!(tx.insert_song(&song()).unwrap(), WriteOutcome::Ignored);
  assert_eq!(tx.insert_artist(&artist()).unwrap(), WriteOutcome::Ignored);
  tx.commit().unwrap();

  let counts = s.counts().unwrap();
  assert_eq!(counts.songs, 1);
  assert_eq!(counts.artists, 1);
}

#[test]
fn existing_song_is_never_overwritten() {
  let mut s = store();
  load_catalog(&mut s);

  let mut renamed = song();
  renamed.title = "Something else".into();

  let mut tx = s.begin().unwrap();
  assert_eq!(tx.insert_song(&renamed).unwrap(), WriteOutcome::Ignored);
  let key = PlayKey { title: "Setanta matins", artist: "Elena", duration: 269.58322 };
  assert!(tx.resolve(&key).unwrap().is_some());
}

#[test]
fn user_level_is_not_updated() {
  let mut s = store();

  let mut tx = s.begin().unwrap();
  assert!(tx.insert_user(&user("free")).unwrap().is_inserted());
  assert_eq!(tx.insert_user(&user("paid")).unwrap(), WriteOutcome::Ignored);
  tx.commit().unwrap();

  assert_eq!(s.counts().unwrap().users, 1);
  let level: String = s
    .conn_for_tests()
    .query_row("SELECT level FROM users WHERE user_id = '15'", [], |r| r.get(0))
    .unwrap();
  assert_eq!(level, "free");
}

#[test]
fn time_rows_are_keyed_by_timestamp() {
  let mut s = store();
  let row = TimeRow::from_millis(1_541_106_673_000).unwrap();

  let mut tx = s.begin().unwrap();
  assert_eq!(tx.insert_time(&row).unwrap(), WriteOutcome::Inserted);
  assert_eq!(tx.insert_time(&row).unwrap(), WriteOutcome::Ignored);
  tx.commit().unwrap();

  let (hour, week, weekday): (i64, i64, i64) = s
    .conn_for_tests()
    .query_row("SELECT hour, week, weekday FROM time", [], |r| {
      Ok((r.get(0)?, r.get(1)?, r.get(2)?))
    })
    .unwrap();
  assert_eq!((hour, week, weekday), (21, 44, 3));
}

#[test]
fn gender_longer_than_one_character_is_rejected() {
  let mut s = store();
  let mut bad = user("free");
  bad.gender = Some("Female".into());

  let mut tx = s.begin().unwrap();
  assert!(tx.insert_user(&bad).is_err());
}

#[test]
fn empty_gender_is_accepted() {
  let mut s = store();
  let mut blank = user("free");
  blank.gender = Some(String::new());

  let mut tx = s.begin().unwrap();
  assert_eq!(tx.insert_user(&blank).unwrap(), WriteOutcome::Inserted);
  tx.commit().unwrap();

  let gender: Option<String> = s
    .conn_for_tests()
    .query_row("SELECT gender FROM users WHERE user_id = '15'", [], |r| r.get(0))
    .unwrap();
  assert_eq!(gender.as_deref(), Some(""));
}

// ─── Fact table ──────────────────────────────────────────────────────────────

#[test]
fn songplays_are_never_deduplicated() {
  let mut s = store();

  let mut tx = s.begin().unwrap();
  let first = tx.insert_songplay(&play(100)).unwrap();
  let second = tx.insert_songplay(&play(101)).unwrap();
  let third = tx.insert_songplay(&play(101)).unwrap();
  tx.commit().unwrap();

  assert!(first < second && second < third);
  assert_eq!(s.counts().unwrap().songplays, 3);
}

// ─── Resolution ──────────────────────────────────────────────────────────────

#[test]
fn resolves_exact_match() {
  let mut s = store();
  load_catalog(&mut s);

  let tx = s.begin().unwrap();
  let key = PlayKey { title: "Setanta matins", artist: "Elena", duration: 269.58322 };
  assert_eq!(
    tx.resolve(&key).unwrap(),
    Some(SongMatch {
      song_id:   "SOZCTXZ12AB0182364".into(),
      artist_id: "AR5KOSW1187FB35FF4".into(),
    })
  );
}

#[test]
fn near_duration_does_not_resolve() {
  let mut s = store();
  load_catalog(&mut s);

  let tx = s.begin().unwrap();
  let key = PlayKey { title: "Setanta matins", artist: "Elena", duration: 269.58322 + 0.001 };
  assert_eq!(tx.resolve(&key).unwrap(), None);
}

#[test]
fn wrong_artist_or_title_does_not_resolve() {
  let mut s = store();
  load_catalog(&mut s);

  let tx = s.begin().unwrap();
  let wrong_artist = PlayKey { title: "Setanta matins", artist: "Elena ", duration: 269.58322 };
  let wrong_title = PlayKey { title: "setanta matins", artist: "Elena", duration: 269.58322 };
  assert_eq!(tx.resolve(&wrong_artist).unwrap(), None);
  assert_eq!(tx.resolve(&wrong_title).unwrap(), None);
}

#[test]
fn song_without_loaded_artist_does_not_resolve() {
  let mut s = store();

  let mut tx = s.begin().unwrap();
  tx.insert_song(&song()).unwrap();
  let key = PlayKey { title: "Setanta matins", artist: "Elena", duration: 269.58322 };
  assert_eq!(tx.resolve(&key).unwrap(), None);
}

#[test]
fn first_loaded_song_wins_among_duplicates() {
  let mut s = store();
  load_catalog(&mut s);

  let mut twin = song();
  twin.song_id = "SOTWIN000000000000".into();

  let mut tx = s.begin().unwrap();
  tx.insert_song(&twin).unwrap();
  let key = PlayKey { title: "Setanta matins", artist: "Elena", duration: 269.58322 };
  assert_eq!(tx.resolve(&key).unwrap().unwrap().song_id, "SOZCTXZ12AB0182364");
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[test]
fn dropped_transaction_rolls_back() {
  let mut s = store();

  {
    let mut tx = s.begin().unwrap();
    tx.insert_song(&song()).unwrap();
    tx.insert_songplay(&play(1)).unwrap();
  }

  assert_eq!(s.counts().unwrap(), TableCounts::default());
}

#[test]
fn reset_empties_every_table() {
  let mut s = store();
  load_catalog(&mut s);

  let mut tx = s.begin().unwrap();
  tx.insert_user(&user("free")).unwrap();
  tx.insert_songplay(&play(1)).unwrap();
  tx.commit().unwrap();
  assert_ne!(s.counts().unwrap(), TableCounts::default());

  s.reset().unwrap();
  assert_eq!(s.counts().unwrap(), TableCounts::default());

  let mut tx = s.begin().unwrap();
  tx.insert_songplay(&play(1)).unwrap();
  tx.commit().unwrap();
  assert_eq!(s.counts().unwrap().songplays, 1);
}

#[test]
fn reopening_a_file_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sparkify.db");

  {
    let mut s = SqliteWarehouse::open(&path).unwrap();
    load_catalog(&mut s);
  }

  let s = SqliteWarehouse::open(&path).unwrap();
  assert_eq!(s.counts().unwrap().songs, 1);
}

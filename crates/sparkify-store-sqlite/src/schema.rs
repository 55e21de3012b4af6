//! SQL schema and statements for the Sparkify SQLite warehouse.
//!
//! Every statement here has exactly one caller in `store.rs`, which binds a
//! typed row to it. Parameter order follows the column lists below.

/// Connection-level settings, applied once on open outside any transaction.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
";

/// Full table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// References between tables are soft: a songplay may name a song that was
/// never loaded, and catalog files write a song before its artist.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    first_name  TEXT,
    last_name   TEXT,
    gender      TEXT CHECK (gender IS NULL OR length(gender) <= 1),
    level       TEXT             -- 'free' | 'paid'
);

CREATE TABLE IF NOT EXISTS songs (
    song_id     TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    artist_id   TEXT,
    year        INTEGER,         -- 0 when unknown
    duration    REAL
);

CREATE TABLE IF NOT EXISTS artists (
    artist_id   TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    location    TEXT,
    latitude    REAL,
    longitude   REAL
);

-- Calendar parts of each distinct play timestamp; weekday 0 = Monday.
CREATE TABLE IF NOT EXISTS time (
    start_time  INTEGER PRIMARY KEY,   -- epoch milliseconds, UTC
    hour        INTEGER,
    day         INTEGER,
    week        INTEGER,               -- ISO-8601 week of year
    month       INTEGER,
    year        INTEGER,
    weekday     INTEGER
);

-- One row per NextSong event; never deduplicated.
CREATE TABLE IF NOT EXISTS songplays (
    songplay_id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_time  INTEGER NOT NULL,
    user_id     TEXT,
    level       TEXT,
    song_id     TEXT,
    artist_id   TEXT,
    session_id  INTEGER NOT NULL,
    location    TEXT,
    user_agent  TEXT
);

CREATE INDEX IF NOT EXISTS songs_match_idx ON songs(title, duration);

PRAGMA user_version = 1;
";

/// Drops every table, fact table first.
pub const DROP_TABLES: &str = "
DROP TABLE IF EXISTS songplays;
DROP TABLE IF EXISTS users;
DROP TABLE IF EXISTS songs;
DROP TABLE IF EXISTS artists;
DROP TABLE IF EXISTS time;
";

// ─── Writes ──────────────────────────────────────────────────────────────────

pub const INSERT_SONG: &str = "
INSERT INTO songs (song_id, title, artist_id, year, duration)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (song_id) DO NOTHING";

pub const INSERT_ARTIST: &str = "
INSERT INTO artists (artist_id, name, location, latitude, longitude)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (artist_id) DO NOTHING";

pub const INSERT_USER: &str = "
INSERT INTO users (user_id, first_name, last_name, gender, level)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (user_id) DO NOTHING";

pub const INSERT_TIME: &str = "
INSERT INTO time (start_time, hour, day, week, month, year, weekday)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT (start_time) DO NOTHING";

pub const INSERT_SONGPLAY: &str = "
INSERT INTO songplays (
    start_time, user_id, level, song_id, artist_id,
    session_id, location, user_agent
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

// ─── Reads ───────────────────────────────────────────────────────────────────

/// Exact match on title, artist name and duration; earliest-loaded song wins.
pub const SELECT_SONG_MATCH: &str = "
SELECT s.song_id, s.artist_id
FROM songs s
JOIN artists a ON s.artist_id = a.artist_id
WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3
ORDER BY s.rowid
LIMIT 1";

//! Input records — the shapes of one JSON object in a catalog file or an
//! event-log file.
//!
//! Unknown keys are ignored; the event logs carry several fields (`auth`,
//! `itemInSession`, `method`, ...) that nothing downstream reads.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// The `page` value of the only events that are ingested.
pub const NEXT_SONG_PAGE: &str = "NextSong";

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// One song and its performing artist, as found in a catalog file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
  pub song_id:          String,
  pub title:            String,
  pub artist_id:        String,
  #[serde(default)]
  pub year:             Option<i32>,
  pub duration:         f64,
  pub artist_name:      String,
  #[serde(default)]
  pub artist_location:  Option<String>,
  #[serde(default)]
  pub artist_latitude:  Option<f64>,
  #[serde(default)]
  pub artist_longitude: Option<f64>,
}

// ─── Event log ───────────────────────────────────────────────────────────────

/// One user-activity event from an event-log file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
  /// Epoch milliseconds, UTC.
  pub ts:         i64,
  pub page:       String,
  #[serde(default, deserialize_with = "text_or_number")]
  pub user_id:    Option<String>,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name:  Option<String>,
  #[serde(default)]
  pub gender:     Option<String>,
  #[serde(default)]
  pub level:      Option<String>,
  /// Track title.
  #[serde(default)]
  pub song:       Option<String>,
  /// Artist name.
  #[serde(default)]
  pub artist:     Option<String>,
  /// Track duration in seconds.
  #[serde(default)]
  pub length:     Option<f64>,
  pub session_id: i64,
  #[serde(default)]
  pub location:   Option<String>,
  #[serde(default)]
  pub user_agent: Option<String>,
}

impl EventRecord {
  pub fn is_next_song(&self) -> bool { self.page == NEXT_SONG_PAGE }
}

/// Accept a user id written either as a JSON string or a JSON integer.
/// Logged-out events carry an empty string, which maps to `None`. A number
/// with a fractional part is rejected rather than keyed as `"39.0"`.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if s.is_empty() => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(Some(n.to_string())),
    Some(other) => Err(de::Error::custom(format!(
      "expected a string or integer user id, found {other}"
    ))),
  }
}

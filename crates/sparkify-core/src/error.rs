//! Error types for `sparkify-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("timestamp out of range: {0} ms")]
  TimestampOutOfRange(i64),

  #[error("event at {ts} is missing required field {field:?}")]
  MissingField { ts: i64, field: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

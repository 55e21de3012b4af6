//! Error types for the record source.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("root not found: {}", .0.display())]
  RootNotFound(PathBuf),

  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("directory walk failed: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Malformed JSON, or a record missing a required field.
  #[error("malformed record in {} (line {line}): {source}", path.display())]
  Parse {
    path:   PathBuf,
    line:   usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("catalog file {} holds {found} records, expected exactly one", path.display())]
  CatalogRecordCount { path: PathBuf, found: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

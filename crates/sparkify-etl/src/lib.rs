//! Batch loader for the Sparkify warehouse.
//!
//! Walks a catalog root and an event-log root, and loads their records into
//! any [`sparkify_core::warehouse::Warehouse`] through the [`Pipeline`].

pub mod error;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{CatalogReport, EventReport, Inputs, Pipeline, RunReport};

use std::{num::NonZeroUsize, path::{Path, PathBuf}};

use serde::Deserialize;
use sparkify_source::DEFAULT_EXTENSION;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `sparkify.toml` and `SPARKIFY_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
  /// Root of the song catalog files.
  pub catalog_root:      PathBuf,
  /// Root of the event-log files.
  pub log_root:          PathBuf,
  /// SQLite database path; `:memory:` opens a throwaway database.
  pub database:          String,
  /// Files written per transaction.
  pub batch_commit_size: NonZeroUsize,
  /// Extension of ingestible files, without the dot.
  pub extension:         String,
}

impl Default for EtlConfig {
  fn default() -> Self {
    Self {
      catalog_root:      PathBuf::from("data/song_data"),
      log_root:          PathBuf::from("data/log_data"),
      database:          "sparkify.db".to_string(),
      batch_commit_size: NonZeroUsize::MIN,
      extension:         DEFAULT_EXTENSION.to_string(),
    }
  }
}

impl EtlConfig {
  /// Layer the optional file at `path` under `SPARKIFY_*` environment
  /// variables. Keys missing from both keep their defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SPARKIFY").try_parsing(true))
      .build()?
      .try_deserialize()
  }
}

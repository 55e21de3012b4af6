//! Error type for the ETL driver.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source error: {0}")]
  Source(#[from] sparkify_source::Error),

  #[error("cannot derive rows from {}: {source}", path.display())]
  Derive {
    path:   PathBuf,
    #[source]
    source: sparkify_core::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error; the pipeline is generic over the store.
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! JSON-lines decoding.
//!
//! A file is a stream of JSON objects: usually one per line, but a single
//! pretty-printed object also decodes, since the stream deserializer only
//! needs whitespace between values.

use std::{fs::File, io::BufReader, path::Path};

use serde::de::DeserializeOwned;
use sparkify_core::record::{CatalogRecord, EventRecord};

use crate::{Error, Result};

/// Decode every JSON object in `path`, in file order.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

  serde_json::Deserializer::from_reader(BufReader::new(file))
    .into_iter::<T>()
    .map(|res| {
      res.map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        line: source.line(),
        source,
      })
    })
    .collect()
}

/// Decode a catalog file, which must hold exactly one record.
pub fn read_catalog(path: &Path) -> Result<CatalogRecord> {
  let mut records = read_records::<CatalogRecord>(path)?;
  if records.len() != 1 {
    return Err(Error::CatalogRecordCount { path: path.to_path_buf(), found: records.len() });
  }
  Ok(records.remove(0))
}

/// Decode an event-log file. All events are returned, whatever their page.
pub fn read_events(path: &Path) -> Result<Vec<EventRecord>> {
  read_records(path)
}

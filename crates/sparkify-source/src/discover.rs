//! Recursive discovery of ingestible files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// File extension of ingestible files when none is configured.
pub const DEFAULT_EXTENSION: &str = "json";

/// List every file under `root` whose extension is `extension`, at any depth.
///
/// Paths are absolute and ordered by a depth-first walk with entries sorted by
/// file name, so the result does not depend on on-disk directory order.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
  if !root.exists() {
    return Err(Error::RootNotFound(root.to_path_buf()));
  }
  if !root.is_dir() {
    return Err(Error::NotADirectory(root.to_path_buf()));
  }

  let root = root
    .canonicalize()
    .map_err(|source| Error::Io { path: root.to_path_buf(), source })?;

  let mut files = Vec::new();
  for entry in WalkDir::new(&root).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() && has_extension(entry.path(), extension) {
      files.push(entry.into_path());
    }
  }

  tracing::debug!(root = %root.display(), count = files.len(), "discovered files");
  Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext == extension)
}

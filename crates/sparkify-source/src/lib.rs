//! Record source for the Sparkify ETL.
//!
//! Finds ingestible files under a root directory and decodes each one into
//! [`sparkify_core`] records. Pure synchronous; no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let files = sparkify_source::discover(Path::new("data/log_data"), "json").unwrap();
//! for path in &files {
//!   let events = sparkify_source::read_events(path).unwrap();
//!   println!("{}: {} events", path.display(), events.len());
//! }
//! ```

mod discover;
pub mod error;
mod parse;

pub use discover::{DEFAULT_EXTENSION, discover};
pub use error::{Error, Result};
pub use parse::{read_catalog, read_events, read_records};

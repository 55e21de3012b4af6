//! SQLite backend for the Sparkify warehouse.
//!
//! Wraps a single synchronous [`rusqlite::Connection`]; every write runs
//! inside a [`SqliteTx`] borrowed from it.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteTx, SqliteWarehouse};

#[cfg(test)]
mod tests;

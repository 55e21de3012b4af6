//! Core types and trait definitions for the Sparkify listening-history ETL.
//!
//! This crate is deliberately free of filesystem and database dependencies.
//! It holds the input record shapes, the typed table rows, the pure
//! derivations between them, and the [`warehouse::Warehouse`] abstraction
//! that storage backends implement.

pub mod derive;
pub mod error;
pub mod record;
pub mod row;
pub mod warehouse;

pub use error::{Error, Result};

//! Shared database schema, migrations, and query builders.

pub mod catalog;
pub mod commerce;
pub mod migrations;
pub mod social;
pub mod tables;
pub mod users;

// Re-export tables for convenience
pub use tables::*;

/// A built statement: `(sql, values)`.
pub type Built = (String, sea_query::Values);

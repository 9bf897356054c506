//! Canonical migration definitions.
//!
//! Applied in order by the store; each entry runs once and is recorded in the
//! `_migrations` table, so reopening an existing database is a no-op.

/// A named migration: `(name, sql)`.
pub type Migration = (&'static str, &'static str);

pub const MIGRATIONS: &[Migration] = &[(
    "0001_schema",
    include_str!("../../migrations/0001_schema.sql"),
)];

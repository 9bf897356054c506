//! Embedded SQLite store over the bookstore schema.
//!
//! Wraps a single connection behind a mutex so it can be shared via
//! `Arc<BookstoreDb>`. Opening a database applies the schema migrations and
//! turns on foreign-key enforcement; every constraint in the schema (CHECK,
//! UNIQUE, CASCADE/RESTRICT) is live on every connection.

mod catalog;
mod commerce;
mod error;
mod rows;
mod social;
mod users;

pub use catalog::NewBook;
pub use commerce::OrderDetail;
pub use error::{Result, StoreError};
pub use rows::*;

use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bookstore_schema::db::migrations::MIGRATIONS;
use bookstore_schema::db::{Built, tables::TABLE_NAMES};

pub struct BookstoreDb {
    conn: Mutex<Connection>,
}

impl BookstoreDb {
    /// Open (or create) the database at the default path,
    /// `~/.local/share/bookstore/bookstore.db`.
    pub fn open() -> Result<Self> {
        let path = default_db_path()?;
        Self::open_path(&path)
    }

    /// Open (or create) the database at a specific path.
    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Internal(format!("create dir for {}: {e}", path.display())))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database. Mostly useful in tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("bookstore db mutex poisoned")
    }

    /// Row count per table, in schema order. Drives the CLI `stats` command.
    pub fn table_counts(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn();
        let mut counts = Vec::with_capacity(TABLE_NAMES.len());
        for name in TABLE_NAMES {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {name}"), [], |row| row.get(0))?;
            counts.push((name.to_string(), count));
        }
        Ok(counts)
    }
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !already_applied {
            conn.execute_batch(sql)
                .map_err(|e| StoreError::Internal(format!("running migration {name}: {e}")))?;
            conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])?;
            tracing::info!("Applied migration: {name}");
        }
    }

    Ok(())
}

/// Default database location, `~/.local/share/bookstore/bookstore.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| StoreError::Internal("could not determine home directory".into()))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("bookstore")
        .join("bookstore.db"))
}

// ── sea-query → rusqlite bridge ────────────────────────────────────────────

pub(crate) fn sq_execute(conn: &Connection, built: Built) -> rusqlite::Result<usize> {
    let (sql, values) = built;
    conn.execute(&sql, params_from_iter(sq_params(values)))
}

pub(crate) fn sq_query_row<T>(
    conn: &Connection,
    built: Built,
    f: impl FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    let (sql, values) = built;
    conn.query_row(&sql, params_from_iter(sq_params(values)), f)
}

pub(crate) fn sq_query_map<T>(
    conn: &Connection,
    built: Built,
    f: impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let (sql, values) = built;
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(sq_params(values)), f)?;
    rows.collect()
}

fn sq_params(values: sea_query::Values) -> Vec<rusqlite::types::Value> {
    values.0.into_iter().map(sq_value).collect()
}

fn sq_value(v: sea_query::Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as Sql;
    use sea_query::Value as Sq;
    match v {
        Sq::Bool(Some(b)) => Sql::Integer(b as i64),
        Sq::TinyInt(Some(x)) => Sql::Integer(x as i64),
        Sq::SmallInt(Some(x)) => Sql::Integer(x as i64),
        Sq::Int(Some(x)) => Sql::Integer(x as i64),
        Sq::BigInt(Some(x)) => Sql::Integer(x),
        Sq::TinyUnsigned(Some(x)) => Sql::Integer(x as i64),
        Sq::SmallUnsigned(Some(x)) => Sql::Integer(x as i64),
        Sq::Unsigned(Some(x)) => Sql::Integer(x as i64),
        Sq::BigUnsigned(Some(x)) => Sql::Integer(x as i64),
        Sq::Float(Some(x)) => Sql::Real(x as f64),
        Sq::Double(Some(x)) => Sql::Real(x),
        Sq::String(Some(s)) => Sql::Text(*s),
        Sq::Char(Some(c)) => Sql::Text(c.to_string()),
        Sq::Bytes(Some(b)) => Sql::Blob(*b),
        _ => Sql::Null,
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::BookstoreDb;

    pub fn test_db() -> BookstoreDb {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.keep().join("test.db");
        BookstoreDb::open_path(&path).unwrap()
    }

    /// Insert a user directly, skipping the slow password hash.
    pub fn seed_user(db: &BookstoreDb, email: &str, role: &str) -> i64 {
        let conn = db.conn();
        conn.execute(
            "INSERT INTO users (email, password_hash, password_salt, name, role) \
             VALUES (?1, 'x', 'x', 'Seeded', ?2)",
            rusqlite::params![email, role],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    pub fn seed_book(db: &BookstoreDb, title: &str, price: i64) -> i64 {
        let conn = db.conn();
        conn.execute(
            "INSERT INTO books (title, price) VALUES (?1, ?2)",
            rusqlite::params![title, price],
        )
        .unwrap();
        conn.last_insert_rowid()
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[test]
    fn test_open_and_schema() {
        let db = test_db();
        let counts = db.table_counts().unwrap();
        assert_eq!(counts.len(), 15);
        assert!(counts.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.keep().join("idem.db");

        let db = BookstoreDb::open_path(&path).unwrap();
        let user_id = seed_user(&db, "keep@example.com", "user");
        drop(db);

        // Second open must not re-run the migration or lose data.
        let db = BookstoreDb::open_path(&path).unwrap();
        let applied: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 1);
        assert!(db.get_user(user_id).unwrap().is_some());
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = test_db();
        let err = db
            .conn()
            .execute(
                "INSERT INTO reviews (user_id, book_id, rating, content) VALUES (999, 999, 3, 'x')",
                [],
            )
            .unwrap_err();
        assert!(err.to_string().contains("FOREIGN KEY"));
    }
}

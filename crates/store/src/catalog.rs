//! Catalog operations: books, authors, categories, and their links.

use rusqlite::OptionalExtension;

use bookstore_schema::db::catalog as q;
use bookstore_schema::service;

use crate::error::{Result, StoreError, map_fk_conflict, map_insert_err};
use crate::rows::{AuthorRow, BookRow, CategoryRow, row_to_author, row_to_book, row_to_category};
use crate::{BookstoreDb, sq_execute, sq_query_map, sq_query_row};

/// Fields for a new catalog entry. Price is in cents.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub isbn: Option<String>,
    pub price: i64,
    pub publication_date: Option<String>,
}

impl BookstoreDb {
    pub fn add_book(&self, book: &NewBook) -> Result<i64> {
        let title = service::validate_title(&book.title)?;
        service::validate_price(book.price)?;
        let publication_date = book
            .publication_date
            .as_deref()
            .map(service::validate_publication_date)
            .transpose()?;

        let conn = self.conn();
        sq_execute(
            &conn,
            q::insert_book(
                &title,
                book.isbn.as_deref(),
                book.price,
                publication_date.as_deref(),
            ),
        )
        .map_err(|e| map_insert_err(e, "isbn already registered", "invalid book"))?;
        Ok(conn.last_insert_rowid())
    }

    /// A live book, or `None` if missing or soft-deleted.
    pub fn get_book(&self, book_id: i64) -> Result<Option<BookRow>> {
        let conn = self.conn();
        Ok(sq_query_row(&conn, q::get_live_book(book_id), row_to_book).optional()?)
    }

    pub fn list_books(&self) -> Result<Vec<BookRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::list_live_books(), row_to_book)?)
    }

    pub fn search_books(&self, title_fragment: &str) -> Result<Vec<BookRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::search_books(title_fragment), row_to_book)?)
    }

    /// Soft-delete: the row stays, reviews and order history stay, but the
    /// book disappears from every live listing.
    pub fn soft_delete_book(&self, book_id: i64) -> Result<()> {
        let conn = self.conn();
        let changed = sq_execute(&conn, q::soft_delete_book(book_id))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("book {book_id} not found")));
        }
        Ok(())
    }

    /// Hard-delete a book row. Catalog links, reviews, comments, cart and
    /// wishlist rows cascade; order items and library items block the delete.
    pub fn purge_book(&self, book_id: i64) -> Result<()> {
        let conn = self.conn();
        let deleted = sq_execute(&conn, q::delete_book(book_id))
            .map_err(|e| map_fk_conflict(e, "book has purchase or ownership history"))?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("book {book_id} not found")));
        }
        Ok(())
    }

    // ── Authors / categories ──────────────────────────────────────────────

    pub fn add_author(&self, name: &str) -> Result<i64> {
        let name = service::validate_name(name)?;
        let conn = self.conn();
        sq_execute(&conn, q::insert_author(&name))
            .map_err(|e| map_insert_err(e, "author already exists", "invalid author"))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::list_authors(), row_to_author)?)
    }

    pub fn add_category(&self, name: &str) -> Result<i64> {
        let name = service::validate_name(name)?;
        let conn = self.conn();
        sq_execute(&conn, q::insert_category(&name))
            .map_err(|e| map_insert_err(e, "category already exists", "invalid category"))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::list_categories(), row_to_category)?)
    }

    pub fn link_author(&self, book_id: i64, author_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::link_author(book_id, author_id)).map_err(|e| {
            map_insert_err(e, "author already linked", "book or author not found")
        })?;
        Ok(())
    }

    pub fn unlink_author(&self, book_id: i64, author_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::unlink_author(book_id, author_id))?;
        Ok(())
    }

    pub fn book_authors(&self, book_id: i64) -> Result<Vec<String>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::authors_of_book(book_id), |row| row.get(0))?)
    }

    pub fn link_category(&self, book_id: i64, category_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::link_category(book_id, category_id)).map_err(|e| {
            map_insert_err(e, "category already linked", "book or category not found")
        })?;
        Ok(())
    }

    pub fn unlink_category(&self, book_id: i64, category_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::unlink_category(book_id, category_id))?;
        Ok(())
    }

    pub fn book_categories(&self, book_id: i64) -> Result<Vec<String>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::categories_of_book(book_id), |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn test_add_and_get_book() {
        let db = test_db();
        let id = db
            .add_book(&NewBook {
                title: "The Rust Programming Language".into(),
                isbn: Some("978-1593278281".into()),
                price: 3999,
                publication_date: Some("2019-08-06".into()),
            })
            .unwrap();

        let book = db.get_book(id).unwrap().unwrap();
        assert_eq!(book.price, 3999);
        assert_eq!(book.publication_date.as_deref(), Some("2019-08-06"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let db = test_db();
        // Validation layer
        let err = db
            .add_book(&NewBook {
                title: "Bad".into(),
                price: -1,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        // The CHECK constraint backs it up even for raw inserts
        let raw = db
            .conn()
            .execute("INSERT INTO books (title, price) VALUES ('Raw', -1)", []);
        assert!(raw.is_err());

        // Zero is a legal price
        let free = db
            .add_book(&NewBook {
                title: "Free".into(),
                price: 0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(db.get_book(free).unwrap().unwrap().price, 0);
    }

    #[test]
    fn test_duplicate_isbn_conflict() {
        let db = test_db();
        let new = NewBook {
            title: "First".into(),
            isbn: Some("1111".into()),
            price: 100,
            ..Default::default()
        };
        db.add_book(&new).unwrap();
        let err = db
            .add_book(&NewBook {
                title: "Second".into(),
                ..new
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_soft_delete_hides_book() {
        let db = test_db();
        let id = seed_book(&db, "Gone Soon", 500);
        assert!(db.get_book(id).unwrap().is_some());

        db.soft_delete_book(id).unwrap();
        assert!(db.get_book(id).unwrap().is_none());
        assert!(db.list_books().unwrap().is_empty());

        // Already soft-deleted: nothing left to delete
        assert!(matches!(
            db.soft_delete_book(id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_author_links_cascade_on_purge() {
        let db = test_db();
        let book = seed_book(&db, "Linked", 100);
        let author = db.add_author("Some Author").unwrap();
        let category = db.add_category("Systems").unwrap();
        db.link_author(book, author).unwrap();
        db.link_category(book, category).unwrap();

        assert_eq!(db.book_authors(book).unwrap(), vec!["Some Author"]);
        assert_eq!(db.book_categories(book).unwrap(), vec!["Systems"]);

        db.purge_book(book).unwrap();
        assert!(db.book_authors(book).unwrap().is_empty());
        // The author and category themselves survive
        assert_eq!(db.list_authors().unwrap().len(), 1);
        assert_eq!(db.list_categories().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_author_name_conflict() {
        let db = test_db();
        db.add_author("Unique Name").unwrap();
        assert!(matches!(
            db.add_author("Unique Name"),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_link_to_missing_book() {
        let db = test_db();
        let author = db.add_author("Orphan").unwrap();
        assert!(matches!(
            db.link_author(999, author),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_search_books() {
        let db = test_db();
        seed_book(&db, "Rust in Action", 100);
        seed_book(&db, "Programming Rust", 100);
        seed_book(&db, "The Go Programming Language", 100);

        assert_eq!(db.search_books("Rust").unwrap().len(), 2);
        assert_eq!(db.search_books("zzz").unwrap().len(), 0);
    }
}

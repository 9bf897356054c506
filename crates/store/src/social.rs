//! Review, comment, and like operations.

use bookstore_schema::db::social as q;
use bookstore_schema::service;

use crate::error::{Result, StoreError, map_insert_err};
use crate::rows::{CommentRow, ReviewRow, row_to_comment, row_to_review};
use crate::{BookstoreDb, sq_execute, sq_query_map, sq_query_row};

impl BookstoreDb {
    /// Write a review for a live book. One review per (user, book); a second
    /// attempt is a `Conflict`.
    pub fn create_review(
        &self,
        user_id: i64,
        book_id: i64,
        rating: i64,
        content: &str,
    ) -> Result<i64> {
        service::validate_rating(rating)?;
        let content = service::validate_content(content)?;
        self.require_live_book(book_id)?;

        let conn = self.conn();
        let already: bool = sq_query_row(&conn, q::review_exists(user_id, book_id), |row| {
            row.get(0)
        })?;
        if already {
            return Err(StoreError::Conflict(format!(
                "user {user_id} already reviewed book {book_id}"
            )));
        }

        sq_execute(&conn, q::insert_review(user_id, book_id, rating, &content))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn reviews_for_book(&self, book_id: i64) -> Result<Vec<ReviewRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::reviews_for_book(book_id), row_to_review)?)
    }

    pub fn delete_review(&self, review_id: i64) -> Result<()> {
        let conn = self.conn();
        let deleted = sq_execute(&conn, q::delete_review(review_id))?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("review {review_id} not found")));
        }
        Ok(())
    }

    /// Like a review. The composite primary key makes a second like from the
    /// same user a `Conflict` rather than a double count.
    pub fn like_review(&self, user_id: i64, review_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::insert_review_like(user_id, review_id))
            .map_err(|e| map_insert_err(e, "already liked", "review or user not found"))?;
        Ok(())
    }

    pub fn unlike_review(&self, user_id: i64, review_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::delete_review_like(user_id, review_id))?;
        Ok(())
    }

    pub fn review_like_count(&self, review_id: i64) -> Result<i64> {
        let conn = self.conn();
        Ok(sq_query_row(&conn, q::review_like_count(review_id), |row| {
            row.get(0)
        })?)
    }

    // ── Comments ──────────────────────────────────────────────────────────

    /// Comment on a live book. Unlike reviews, a user may comment repeatedly.
    pub fn create_comment(&self, user_id: i64, book_id: i64, content: &str) -> Result<i64> {
        let content = service::validate_content(content)?;
        self.require_live_book(book_id)?;

        let conn = self.conn();
        sq_execute(&conn, q::insert_comment(user_id, book_id, &content))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn comments_for_book(&self, book_id: i64) -> Result<Vec<CommentRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::comments_for_book(book_id), row_to_comment)?)
    }

    pub fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let conn = self.conn();
        let deleted = sq_execute(&conn, q::delete_comment(comment_id))?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!(
                "comment {comment_id} not found"
            )));
        }
        Ok(())
    }

    pub fn like_comment(&self, user_id: i64, comment_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::insert_comment_like(user_id, comment_id))
            .map_err(|e| map_insert_err(e, "already liked", "comment or user not found"))?;
        Ok(())
    }

    pub fn unlike_comment(&self, user_id: i64, comment_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::delete_comment_like(user_id, comment_id))?;
        Ok(())
    }

    pub fn comment_like_count(&self, comment_id: i64) -> Result<i64> {
        let conn = self.conn();
        Ok(sq_query_row(&conn, q::comment_like_count(comment_id), |row| {
            row.get(0)
        })?)
    }

    /// NotFound unless the book exists and is not soft-deleted.
    pub(crate) fn require_live_book(&self, book_id: i64) -> Result<()> {
        if self.get_book(book_id)?.is_none() {
            return Err(StoreError::NotFound(format!("book {book_id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn test_review_lifecycle() {
        let db = test_db();
        let user = seed_user(&db, "reader@example.com", "user");
        let book = seed_book(&db, "Reviewed", 100);

        let review = db.create_review(user, book, 5, "Excellent.").unwrap();
        let reviews = db.reviews_for_book(book).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].reviewer, "Seeded");

        db.delete_review(review).unwrap();
        assert!(db.reviews_for_book(book).unwrap().is_empty());
    }

    #[test]
    fn test_rating_bounds() {
        let db = test_db();
        let user = seed_user(&db, "r@example.com", "user");
        let book = seed_book(&db, "Rated", 100);

        for bad in [0, 6] {
            assert!(matches!(
                db.create_review(user, book, bad, "x"),
                Err(StoreError::InvalidInput(_))
            ));
            // The CHECK constraint rejects out-of-range ratings too
            let raw = db.conn().execute(
                "INSERT INTO reviews (user_id, book_id, rating, content) VALUES (?1, ?2, ?3, 'x')",
                rusqlite::params![user, book, bad],
            );
            assert!(raw.is_err());
        }

        db.create_review(user, book, 1, "one star").unwrap();
    }

    #[test]
    fn test_one_review_per_user_per_book() {
        let db = test_db();
        let user = seed_user(&db, "once@example.com", "user");
        let book = seed_book(&db, "Once", 100);

        db.create_review(user, book, 4, "first").unwrap();
        assert!(matches!(
            db.create_review(user, book, 2, "second"),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_review_on_missing_or_deleted_book() {
        let db = test_db();
        let user = seed_user(&db, "ghost@example.com", "user");
        assert!(matches!(
            db.create_review(user, 999, 3, "x"),
            Err(StoreError::NotFound(_))
        ));

        let book = seed_book(&db, "Pulled", 100);
        db.soft_delete_book(book).unwrap();
        assert!(matches!(
            db.create_review(user, book, 3, "x"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_like_is_idempotent_via_pk() {
        let db = test_db();
        let author = seed_user(&db, "author@example.com", "user");
        let fan = seed_user(&db, "fan@example.com", "user");
        let book = seed_book(&db, "Liked", 100);
        let review = db.create_review(author, book, 5, "mine").unwrap();

        db.like_review(fan, review).unwrap();
        assert!(matches!(
            db.like_review(fan, review),
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(db.review_like_count(review).unwrap(), 1);

        db.unlike_review(fan, review).unwrap();
        assert_eq!(db.review_like_count(review).unwrap(), 0);
    }

    #[test]
    fn test_like_missing_review() {
        let db = test_db();
        let user = seed_user(&db, "nolike@example.com", "user");
        assert!(matches!(
            db.like_review(user, 999),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_comments_allow_repeats() {
        let db = test_db();
        let user = seed_user(&db, "chatty@example.com", "user");
        let book = seed_book(&db, "Discussed", 100);

        db.create_comment(user, book, "first!").unwrap();
        let second = db.create_comment(user, book, "me again").unwrap();

        let comments = db.comments_for_book(book).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].id, second);

        db.like_comment(user, second).unwrap();
        assert_eq!(db.comment_like_count(second).unwrap(), 1);
    }

    #[test]
    fn test_empty_content_rejected() {
        let db = test_db();
        let user = seed_user(&db, "terse@example.com", "user");
        let book = seed_book(&db, "Blank", 100);
        assert!(matches!(
            db.create_comment(user, book, "   "),
            Err(StoreError::InvalidInput(_))
        ));
    }
}

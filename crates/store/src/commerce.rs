//! Cart, wishlist, library, and order operations.

use rusqlite::OptionalExtension;

use bookstore_schema::db::{catalog, commerce as q};
use bookstore_schema::{OrderStatus, service};

use crate::error::{Result, StoreError, map_insert_err};
use crate::rows::{
    CartEntry, OrderItemRow, OrderRow, ShelfEntry, row_to_cart_entry, row_to_order,
    row_to_order_item, row_to_shelf_entry,
};
use crate::{BookstoreDb, sq_execute, sq_query_map, sq_query_row};

/// An order with its line items.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderDetail {
    pub order: OrderRow,
    pub items: Vec<OrderItemRow>,
}

impl BookstoreDb {
    // ── Cart ──────────────────────────────────────────────────────────────

    /// Put a book in the cart, or overwrite the line's quantity.
    pub fn set_cart_quantity(&self, user_id: i64, book_id: i64, quantity: i64) -> Result<()> {
        service::validate_quantity(quantity)?;
        self.require_live_book(book_id)?;

        let conn = self.conn();
        sq_execute(&conn, q::upsert_cart_item(user_id, book_id, quantity))?;
        Ok(())
    }

    pub fn remove_from_cart(&self, user_id: i64, book_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::delete_cart_item(user_id, book_id))?;
        Ok(())
    }

    pub fn clear_cart(&self, user_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::clear_cart(user_id))?;
        Ok(())
    }

    pub fn cart_contents(&self, user_id: i64) -> Result<Vec<CartEntry>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::cart_contents(user_id), row_to_cart_entry)?)
    }

    // ── Wishlist ──────────────────────────────────────────────────────────

    pub fn add_to_wishlist(&self, user_id: i64, book_id: i64) -> Result<()> {
        self.require_live_book(book_id)?;
        let conn = self.conn();
        sq_execute(&conn, q::insert_wishlist_item(user_id, book_id))
            .map_err(|e| map_insert_err(e, "already on wishlist", "book or user not found"))?;
        Ok(())
    }

    pub fn remove_from_wishlist(&self, user_id: i64, book_id: i64) -> Result<()> {
        let conn = self.conn();
        sq_execute(&conn, q::delete_wishlist_item(user_id, book_id))?;
        Ok(())
    }

    pub fn wishlist(&self, user_id: i64) -> Result<Vec<ShelfEntry>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::wishlist_contents(user_id), row_to_shelf_entry)?)
    }

    // ── Library ───────────────────────────────────────────────────────────

    /// Add a book to the user's library. Ownership is permanent: the row
    /// blocks deletion of both the user and the book.
    pub fn add_to_library(&self, user_id: i64, book_id: i64) -> Result<()> {
        self.require_live_book(book_id)?;

        let conn = self.conn();
        let owned: bool = sq_query_row(&conn, q::library_item_exists(user_id, book_id), |row| {
            row.get(0)
        })?;
        if owned {
            return Err(StoreError::Conflict(format!(
                "book {book_id} already in library"
            )));
        }

        sq_execute(&conn, q::insert_library_item(user_id, book_id))?;
        Ok(())
    }

    pub fn owns_book(&self, user_id: i64, book_id: i64) -> Result<bool> {
        let conn = self.conn();
        Ok(sq_query_row(&conn, q::library_item_exists(user_id, book_id), |row| {
            row.get(0)
        })?)
    }

    pub fn library(&self, user_id: i64) -> Result<Vec<ShelfEntry>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::library_contents(user_id), row_to_shelf_entry)?)
    }

    // ── Orders ────────────────────────────────────────────────────────────

    /// Place an order for `(book_id, quantity)` pairs in one transaction.
    /// Each line snapshots the book's current price into `price_at_purchase`;
    /// the order total is computed from the snapshots.
    pub fn place_order(
        &self,
        user_id: i64,
        items: &[(i64, i64)],
        shipping_address: &str,
    ) -> Result<i64> {
        let shipping_address = service::validate_shipping_address(shipping_address)?;
        if items.is_empty() {
            return Err(StoreError::InvalidInput("order has no items".into()));
        }
        for &(_, quantity) in items {
            service::validate_quantity(quantity)?;
        }

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let mut lines = Vec::with_capacity(items.len());
        let mut total: i64 = 0;
        for &(book_id, quantity) in items {
            let price: i64 = sq_query_row(&tx, catalog::get_live_price(book_id), |row| row.get(0))
                .optional()?
                .ok_or_else(|| StoreError::NotFound(format!("book {book_id} not found")))?;
            total += price * quantity;
            lines.push((book_id, quantity, price));
        }

        sq_execute(
            &tx,
            q::insert_order(user_id, total, OrderStatus::Pending.as_str(), &shipping_address),
        )?;
        let order_id = tx.last_insert_rowid();

        for (book_id, quantity, price) in lines {
            sq_execute(&tx, q::insert_order_item(order_id, book_id, quantity, price))
                .map_err(|e| map_insert_err(e, "duplicate book in order", "book not found"))?;
        }

        tx.commit()?;
        Ok(order_id)
    }

    pub fn get_order(&self, order_id: i64) -> Result<Option<OrderDetail>> {
        let conn = self.conn();
        let Some(order) = sq_query_row(&conn, q::get_order(order_id), row_to_order).optional()?
        else {
            return Ok(None);
        };
        let items = sq_query_map(&conn, q::items_for_order(order_id), row_to_order_item)?;
        Ok(Some(OrderDetail { order, items }))
    }

    pub fn orders_for_user(&self, user_id: i64) -> Result<Vec<OrderRow>> {
        let conn = self.conn();
        Ok(sq_query_map(&conn, q::orders_for_user(user_id), row_to_order)?)
    }

    /// Overwrite the order status. The schema constrains the value set but
    /// not the transition order.
    pub fn set_order_status(&self, order_id: i64, status: OrderStatus) -> Result<()> {
        let conn = self.conn();
        let changed = sq_execute(&conn, q::update_order_status(order_id, status.as_str()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("order {order_id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn test_cart_upsert_and_remove() {
        let db = test_db();
        let user = seed_user(&db, "cart@example.com", "user");
        let book = seed_book(&db, "Carted", 1500);

        db.set_cart_quantity(user, book, 1).unwrap();
        db.set_cart_quantity(user, book, 3).unwrap();

        let cart = db.cart_contents(user).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 3);
        assert_eq!(cart[0].price, 1500);

        assert!(matches!(
            db.set_cart_quantity(user, book, 0),
            Err(StoreError::InvalidInput(_))
        ));

        db.remove_from_cart(user, book).unwrap();
        assert!(db.cart_contents(user).unwrap().is_empty());
    }

    #[test]
    fn test_wishlist_duplicate_conflict() {
        let db = test_db();
        let user = seed_user(&db, "wish@example.com", "user");
        let book = seed_book(&db, "Wished", 100);

        db.add_to_wishlist(user, book).unwrap();
        assert!(matches!(
            db.add_to_wishlist(user, book),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_library_duplicate_conflict() {
        let db = test_db();
        let user = seed_user(&db, "own@example.com", "user");
        let book = seed_book(&db, "Owned", 100);

        db.add_to_library(user, book).unwrap();
        assert!(db.owns_book(user, book).unwrap());
        assert!(matches!(
            db.add_to_library(user, book),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_place_order_totals_and_snapshots() {
        let db = test_db();
        let user = seed_user(&db, "buyer@example.com", "user");
        let cheap = seed_book(&db, "Cheap", 500);
        let dear = seed_book(&db, "Dear", 2500);

        let order_id = db
            .place_order(user, &[(cheap, 2), (dear, 1)], "1 Main St")
            .unwrap();

        let detail = db.get_order(order_id).unwrap().unwrap();
        assert_eq!(detail.order.total_price, 3500);
        assert_eq!(detail.order.status, "pending");
        assert_eq!(detail.items.len(), 2);

        // A later price change does not touch the snapshot
        db.conn()
            .execute("UPDATE books SET price = 9999 WHERE id = ?1", [cheap])
            .unwrap();
        let detail = db.get_order(order_id).unwrap().unwrap();
        assert_eq!(detail.items[0].price_at_purchase, 500);
        assert_eq!(detail.order.total_price, 3500);
    }

    #[test]
    fn test_order_rejects_bad_input() {
        let db = test_db();
        let user = seed_user(&db, "fussy@example.com", "user");
        let book = seed_book(&db, "Fine", 100);

        assert!(matches!(
            db.place_order(user, &[], "1 Main St"),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            db.place_order(user, &[(book, 0)], "1 Main St"),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            db.place_order(user, &[(book, 1)], "   "),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            db.place_order(user, &[(999, 1)], "1 Main St"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.place_order(user, &[(book, 1), (book, 2)], "1 Main St"),
            Err(StoreError::Conflict(_))
        ));

        // Nothing was committed by the failed attempts
        assert!(db.orders_for_user(user).unwrap().is_empty());
    }

    #[test]
    fn test_order_status_updates_freely() {
        let db = test_db();
        let user = seed_user(&db, "ship@example.com", "user");
        let book = seed_book(&db, "Shipped", 100);
        let order = db.place_order(user, &[(book, 1)], "1 Main St").unwrap();

        db.set_order_status(order, OrderStatus::Paid).unwrap();
        db.set_order_status(order, OrderStatus::Cancelled).unwrap();
        // No transition rules: back to pending is allowed
        db.set_order_status(order, OrderStatus::Pending).unwrap();

        let detail = db.get_order(order).unwrap().unwrap();
        assert_eq!(detail.order.status, "pending");

        assert!(matches!(
            db.set_order_status(999, OrderStatus::Paid),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_soft_deleted_book_cannot_be_ordered() {
        let db = test_db();
        let user = seed_user(&db, "late@example.com", "user");
        let book = seed_book(&db, "Delisted", 100);
        db.soft_delete_book(book).unwrap();

        assert!(matches!(
            db.place_order(user, &[(book, 1)], "1 Main St"),
            Err(StoreError::NotFound(_))
        ));
    }

    // ── Cascade / restrict behavior across the schema ─────────────────────

    #[test]
    fn test_user_delete_cascades_social_rows() {
        let db = test_db();
        let user = seed_user(&db, "leaver@example.com", "user");
        let other = seed_user(&db, "stayer@example.com", "user");
        let book = seed_book(&db, "Shared", 100);

        let review = db.create_review(user, book, 4, "bye").unwrap();
        db.create_comment(user, book, "bye").unwrap();
        db.like_review(other, review).unwrap();
        db.set_cart_quantity(user, book, 1).unwrap();
        db.add_to_wishlist(user, book).unwrap();

        db.delete_user(user).unwrap();

        assert!(db.reviews_for_book(book).unwrap().is_empty());
        assert!(db.comments_for_book(book).unwrap().is_empty());
        // The other user's like went with the deleted review
        let like_count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM review_likes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(like_count, 0);
        let cart_count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM cart_items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(cart_count, 0);
    }

    #[test]
    fn test_user_delete_restricted_by_orders() {
        let db = test_db();
        let user = seed_user(&db, "history@example.com", "user");
        let book = seed_book(&db, "Bought", 100);
        db.place_order(user, &[(book, 1)], "1 Main St").unwrap();

        assert!(matches!(
            db.delete_user(user),
            Err(StoreError::Conflict(_))
        ));
        assert!(db.get_user(user).unwrap().is_some());
    }

    #[test]
    fn test_user_delete_restricted_by_library() {
        let db = test_db();
        let user = seed_user(&db, "keeper@example.com", "user");
        let book = seed_book(&db, "Kept", 100);
        db.add_to_library(user, book).unwrap();

        assert!(matches!(
            db.delete_user(user),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_book_purge_restricted_by_order_items() {
        let db = test_db();
        let user = seed_user(&db, "archivist@example.com", "user");
        let book = seed_book(&db, "On Record", 100);
        db.place_order(user, &[(book, 1)], "1 Main St").unwrap();

        assert!(matches!(
            db.purge_book(book),
            Err(StoreError::Conflict(_))
        ));
        // Soft delete remains available for delisting
        db.soft_delete_book(book).unwrap();
        assert!(db.get_book(book).unwrap().is_none());
    }

    #[test]
    fn test_book_purge_restricted_by_library() {
        let db = test_db();
        let user = seed_user(&db, "collector@example.com", "user");
        let book = seed_book(&db, "Collected", 100);
        db.add_to_library(user, book).unwrap();

        assert!(matches!(
            db.purge_book(book),
            Err(StoreError::Conflict(_))
        ));
        assert!(db.owns_book(user, book).unwrap());
    }

    #[test]
    fn test_book_purge_cascades_social_and_cart() {
        let db = test_db();
        let user = seed_user(&db, "browser@example.com", "user");
        let book = seed_book(&db, "Ephemeral", 100);

        db.create_review(user, book, 3, "ok").unwrap();
        db.create_comment(user, book, "hm").unwrap();
        db.set_cart_quantity(user, book, 2).unwrap();
        db.add_to_wishlist(user, book).unwrap();

        db.purge_book(book).unwrap();

        for table in ["reviews", "comments", "cart_items", "wishlist_items"] {
            let count: i64 = db
                .conn()
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 0, "{table} should be empty");
        }
    }
}

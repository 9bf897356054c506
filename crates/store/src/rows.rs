//! Typed rows returned by store queries, with their rusqlite mappers.
//!
//! Timestamps stay in SQLite's `datetime('now')` text form; enum-valued
//! columns (`role`, `status`) stay as the stored strings.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub isbn: Option<String>,
    /// Cents.
    pub price: i64,
    pub publication_date: Option<String>,
    pub deleted_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i64,
    pub content: String,
    pub created_at: String,
    /// Display name of the reviewing user.
    pub reviewer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRow {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub content: String,
    pub created_at: String,
    pub commenter: String,
}

/// A cart line joined with the book's current listing.
#[derive(Debug, Clone, Serialize)]
pub struct CartEntry {
    pub book_id: i64,
    pub title: String,
    /// Current price in cents, not a purchase snapshot.
    pub price: i64,
    pub quantity: i64,
}

/// A wishlist or library line.
#[derive(Debug, Clone, Serialize)]
pub struct ShelfEntry {
    pub book_id: i64,
    pub title: String,
    pub price: i64,
    pub added_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    /// Cents.
    pub total_price: i64,
    pub status: String,
    pub shipping_address: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRow {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub quantity: i64,
    /// Cents, snapshotted when the order was placed.
    pub price_at_purchase: i64,
}

pub(crate) fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub(crate) fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<BookRow> {
    Ok(BookRow {
        id: row.get(0)?,
        title: row.get(1)?,
        isbn: row.get(2)?,
        price: row.get(3)?,
        publication_date: row.get(4)?,
        deleted_at: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(crate) fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<AuthorRow> {
    Ok(AuthorRow {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<CategoryRow> {
    Ok(CategoryRow {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn row_to_review(row: &rusqlite::Row) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        book_id: row.get(2)?,
        rating: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
        reviewer: row.get(6)?,
    })
}

pub(crate) fn row_to_comment(row: &rusqlite::Row) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        book_id: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        commenter: row.get(5)?,
    })
}

pub(crate) fn row_to_cart_entry(row: &rusqlite::Row) -> rusqlite::Result<CartEntry> {
    Ok(CartEntry {
        book_id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        quantity: row.get(3)?,
    })
}

pub(crate) fn row_to_shelf_entry(row: &rusqlite::Row) -> rusqlite::Result<ShelfEntry> {
    Ok(ShelfEntry {
        book_id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        added_at: row.get(3)?,
    })
}

pub(crate) fn row_to_order(row: &rusqlite::Row) -> rusqlite::Result<OrderRow> {
    Ok(OrderRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        total_price: row.get(2)?,
        status: row.get(3)?,
        shipping_address: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub(crate) fn row_to_order_item(row: &rusqlite::Row) -> rusqlite::Result<OrderItemRow> {
    Ok(OrderItemRow {
        id: row.get(0)?,
        book_id: row.get(1)?,
        title: row.get(2)?,
        quantity: row.get(3)?,
        price_at_purchase: row.get(4)?,
    })
}

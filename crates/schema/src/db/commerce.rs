//! Cart, wishlist, library, and order query builders.

use sea_query::{Asterisk, Expr, Func, OnConflict, Order, Query, SqliteQueryBuilder};

use super::Built;
use super::tables::{Books, CartItems, LibraryItems, OrderItems, Orders, WishlistItems};

// ── Cart ──────────────────────────────────────────────────────────────────

/// Upsert a cart line: inserts or overwrites the quantity for (user, book).
pub fn upsert_cart_item(user_id: i64, book_id: i64, quantity: i64) -> Built {
    Query::insert()
        .into_table(CartItems::Table)
        .columns([CartItems::UserId, CartItems::BookId, CartItems::Quantity])
        .values_panic([user_id.into(), book_id.into(), quantity.into()])
        .on_conflict(
            OnConflict::columns([CartItems::UserId, CartItems::BookId])
                .update_column(CartItems::Quantity)
                .to_owned(),
        )
        .build(SqliteQueryBuilder)
}

pub fn delete_cart_item(user_id: i64, book_id: i64) -> Built {
    Query::delete()
        .from_table(CartItems::Table)
        .and_where(Expr::col(CartItems::UserId).eq(user_id))
        .and_where(Expr::col(CartItems::BookId).eq(book_id))
        .build(SqliteQueryBuilder)
}

pub fn clear_cart(user_id: i64) -> Built {
    Query::delete()
        .from_table(CartItems::Table)
        .and_where(Expr::col(CartItems::UserId).eq(user_id))
        .build(SqliteQueryBuilder)
}

/// Cart contents joined with the book's title and current price.
pub fn cart_contents(user_id: i64) -> Built {
    Query::select()
        .column((CartItems::Table, CartItems::BookId))
        .column((Books::Table, Books::Title))
        .column((Books::Table, Books::Price))
        .column((CartItems::Table, CartItems::Quantity))
        .from(CartItems::Table)
        .inner_join(
            Books::Table,
            Expr::col((Books::Table, Books::Id)).equals((CartItems::Table, CartItems::BookId)),
        )
        .and_where(Expr::col((CartItems::Table, CartItems::UserId)).eq(user_id))
        .order_by((CartItems::Table, CartItems::CreatedAt), Order::Asc)
        .build(SqliteQueryBuilder)
}

// ── Wishlist ──────────────────────────────────────────────────────────────

pub fn insert_wishlist_item(user_id: i64, book_id: i64) -> Built {
    Query::insert()
        .into_table(WishlistItems::Table)
        .columns([WishlistItems::UserId, WishlistItems::BookId])
        .values_panic([user_id.into(), book_id.into()])
        .build(SqliteQueryBuilder)
}

pub fn delete_wishlist_item(user_id: i64, book_id: i64) -> Built {
    Query::delete()
        .from_table(WishlistItems::Table)
        .and_where(Expr::col(WishlistItems::UserId).eq(user_id))
        .and_where(Expr::col(WishlistItems::BookId).eq(book_id))
        .build(SqliteQueryBuilder)
}

pub fn wishlist_contents(user_id: i64) -> Built {
    Query::select()
        .column((WishlistItems::Table, WishlistItems::BookId))
        .column((Books::Table, Books::Title))
        .column((Books::Table, Books::Price))
        .column((WishlistItems::Table, WishlistItems::CreatedAt))
        .from(WishlistItems::Table)
        .inner_join(
            Books::Table,
            Expr::col((Books::Table, Books::Id))
                .equals((WishlistItems::Table, WishlistItems::BookId)),
        )
        .and_where(Expr::col((WishlistItems::Table, WishlistItems::UserId)).eq(user_id))
        .order_by((WishlistItems::Table, WishlistItems::CreatedAt), Order::Asc)
        .build(SqliteQueryBuilder)
}

// ── Library ───────────────────────────────────────────────────────────────

pub fn insert_library_item(user_id: i64, book_id: i64) -> Built {
    Query::insert()
        .into_table(LibraryItems::Table)
        .columns([LibraryItems::UserId, LibraryItems::BookId])
        .values_panic([user_id.into(), book_id.into()])
        .build(SqliteQueryBuilder)
}

/// Does the user already own this book?
pub fn library_item_exists(user_id: i64, book_id: i64) -> Built {
    Query::select()
        .expr(Expr::expr(Func::count(Expr::col(Asterisk))).gt(0))
        .from(LibraryItems::Table)
        .and_where(Expr::col(LibraryItems::UserId).eq(user_id))
        .and_where(Expr::col(LibraryItems::BookId).eq(book_id))
        .build(SqliteQueryBuilder)
}

pub fn library_contents(user_id: i64) -> Built {
    Query::select()
        .column((LibraryItems::Table, LibraryItems::BookId))
        .column((Books::Table, Books::Title))
        .column((Books::Table, Books::Price))
        .column((LibraryItems::Table, LibraryItems::CreatedAt))
        .from(LibraryItems::Table)
        .inner_join(
            Books::Table,
            Expr::col((Books::Table, Books::Id))
                .equals((LibraryItems::Table, LibraryItems::BookId)),
        )
        .and_where(Expr::col((LibraryItems::Table, LibraryItems::UserId)).eq(user_id))
        .order_by((LibraryItems::Table, LibraryItems::CreatedAt), Order::Asc)
        .build(SqliteQueryBuilder)
}

// ── Orders ────────────────────────────────────────────────────────────────

/// Column list for order SELECT queries (matches `OrderRow` order).
fn order_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.columns([
        Orders::Id,
        Orders::UserId,
        Orders::TotalPrice,
        Orders::Status,
        Orders::ShippingAddress,
        Orders::CreatedAt,
    ])
}

pub fn insert_order(user_id: i64, total_price: i64, status: &str, shipping_address: &str) -> Built {
    Query::insert()
        .into_table(Orders::Table)
        .columns([
            Orders::UserId,
            Orders::TotalPrice,
            Orders::Status,
            Orders::ShippingAddress,
        ])
        .values_panic([
            user_id.into(),
            total_price.into(),
            status.into(),
            shipping_address.into(),
        ])
        .build(SqliteQueryBuilder)
}

pub fn get_order(order_id: i64) -> Built {
    let mut q = Query::select().to_owned();
    order_columns(&mut q);
    q.from(Orders::Table)
        .and_where(Expr::col(Orders::Id).eq(order_id))
        .build(SqliteQueryBuilder)
}

pub fn orders_for_user(user_id: i64) -> Built {
    let mut q = Query::select().to_owned();
    order_columns(&mut q);
    q.from(Orders::Table)
        .and_where(Expr::col(Orders::UserId).eq(user_id))
        .order_by(Orders::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Overwrite the order status. No transition order is enforced.
pub fn update_order_status(order_id: i64, status: &str) -> Built {
    Query::update()
        .table(Orders::Table)
        .value(Orders::Status, status)
        .value(Orders::UpdatedAt, Expr::cust("datetime('now')"))
        .and_where(Expr::col(Orders::Id).eq(order_id))
        .build(SqliteQueryBuilder)
}

// ── Order items ───────────────────────────────────────────────────────────

pub fn insert_order_item(
    order_id: i64,
    book_id: i64,
    quantity: i64,
    price_at_purchase: i64,
) -> Built {
    Query::insert()
        .into_table(OrderItems::Table)
        .columns([
            OrderItems::OrderId,
            OrderItems::BookId,
            OrderItems::Quantity,
            OrderItems::PriceAtPurchase,
        ])
        .values_panic([
            order_id.into(),
            book_id.into(),
            quantity.into(),
            price_at_purchase.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// Items of an order joined with the book's title.
pub fn items_for_order(order_id: i64) -> Built {
    Query::select()
        .column((OrderItems::Table, OrderItems::Id))
        .column((OrderItems::Table, OrderItems::BookId))
        .column((Books::Table, Books::Title))
        .column((OrderItems::Table, OrderItems::Quantity))
        .column((OrderItems::Table, OrderItems::PriceAtPurchase))
        .from(OrderItems::Table)
        .inner_join(
            Books::Table,
            Expr::col((Books::Table, Books::Id)).equals((OrderItems::Table, OrderItems::BookId)),
        )
        .and_where(Expr::col((OrderItems::Table, OrderItems::OrderId)).eq(order_id))
        .order_by((OrderItems::Table, OrderItems::Id), Order::Asc)
        .build(SqliteQueryBuilder)
}

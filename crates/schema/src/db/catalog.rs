//! Catalog query builders: books, authors, categories, and their junctions.

use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::Built;
use super::tables::{Authors, BookAuthors, BookCategories, Books, Categories};

/// Column list for book SELECT queries (matches `BookRow` order).
fn book_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.columns([
        Books::Id,
        Books::Title,
        Books::Isbn,
        Books::Price,
        Books::PublicationDate,
        Books::DeletedAt,
        Books::CreatedAt,
    ])
}

// ── Books ─────────────────────────────────────────────────────────────────

/// INSERT a new book. `price` is in cents.
pub fn insert_book(
    title: &str,
    isbn: Option<&str>,
    price: i64,
    publication_date: Option<&str>,
) -> Built {
    Query::insert()
        .into_table(Books::Table)
        .columns([
            Books::Title,
            Books::Isbn,
            Books::Price,
            Books::PublicationDate,
        ])
        .values_panic([
            title.into(),
            isbn.map(|s| s.to_string()).into(),
            price.into(),
            publication_date.map(|s| s.to_string()).into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a live (not soft-deleted) book by id.
pub fn get_live_book(book_id: i64) -> Built {
    let mut q = Query::select().to_owned();
    book_columns(&mut q);
    q.from(Books::Table)
        .and_where(Expr::col(Books::Id).eq(book_id))
        .and_where(Expr::col(Books::DeletedAt).is_null())
        .build(SqliteQueryBuilder)
}

/// Price of a live book, for order snapshots.
pub fn get_live_price(book_id: i64) -> Built {
    Query::select()
        .column(Books::Price)
        .from(Books::Table)
        .and_where(Expr::col(Books::Id).eq(book_id))
        .and_where(Expr::col(Books::DeletedAt).is_null())
        .build(SqliteQueryBuilder)
}

/// List live books, newest first.
pub fn list_live_books() -> Built {
    let mut q = Query::select().to_owned();
    book_columns(&mut q);
    q.from(Books::Table)
        .and_where(Expr::col(Books::DeletedAt).is_null())
        .order_by(Books::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Search live books by title substring.
pub fn search_books(title_fragment: &str) -> Built {
    let like = format!("%{title_fragment}%");
    let mut q = Query::select().to_owned();
    book_columns(&mut q);
    q.from(Books::Table)
        .and_where(Expr::col(Books::DeletedAt).is_null())
        .and_where(Expr::col(Books::Title).like(like))
        .order_by(Books::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Soft-delete a book: sets `deleted_at`, keeps the row and all references.
pub fn soft_delete_book(book_id: i64) -> Built {
    Query::update()
        .table(Books::Table)
        .value(Books::DeletedAt, Expr::cust("datetime('now')"))
        .value(Books::UpdatedAt, Expr::cust("datetime('now')"))
        .and_where(Expr::col(Books::Id).eq(book_id))
        .and_where(Expr::col(Books::DeletedAt).is_null())
        .build(SqliteQueryBuilder)
}

/// Hard DELETE. Cascades catalog links and social rows; restricted by
/// order_items and library_items.
pub fn delete_book(book_id: i64) -> Built {
    Query::delete()
        .from_table(Books::Table)
        .and_where(Expr::col(Books::Id).eq(book_id))
        .build(SqliteQueryBuilder)
}

// ── Authors / categories ──────────────────────────────────────────────────

pub fn insert_author(name: &str) -> Built {
    Query::insert()
        .into_table(Authors::Table)
        .columns([Authors::Name])
        .values_panic([name.into()])
        .build(SqliteQueryBuilder)
}

pub fn author_exists(name: &str) -> Built {
    Query::select()
        .expr(Expr::expr(Func::count(Expr::col(Asterisk))).gt(0))
        .from(Authors::Table)
        .and_where(Expr::col(Authors::Name).eq(name))
        .build(SqliteQueryBuilder)
}

pub fn list_authors() -> Built {
    Query::select()
        .columns([Authors::Id, Authors::Name])
        .from(Authors::Table)
        .order_by(Authors::Name, Order::Asc)
        .build(SqliteQueryBuilder)
}

pub fn insert_category(name: &str) -> Built {
    Query::insert()
        .into_table(Categories::Table)
        .columns([Categories::Name])
        .values_panic([name.into()])
        .build(SqliteQueryBuilder)
}

pub fn list_categories() -> Built {
    Query::select()
        .columns([Categories::Id, Categories::Name])
        .from(Categories::Table)
        .order_by(Categories::Name, Order::Asc)
        .build(SqliteQueryBuilder)
}

// ── Junctions ─────────────────────────────────────────────────────────────

pub fn link_author(book_id: i64, author_id: i64) -> Built {
    Query::insert()
        .into_table(BookAuthors::Table)
        .columns([BookAuthors::BookId, BookAuthors::AuthorId])
        .values_panic([book_id.into(), author_id.into()])
        .build(SqliteQueryBuilder)
}

pub fn unlink_author(book_id: i64, author_id: i64) -> Built {
    Query::delete()
        .from_table(BookAuthors::Table)
        .and_where(Expr::col(BookAuthors::BookId).eq(book_id))
        .and_where(Expr::col(BookAuthors::AuthorId).eq(author_id))
        .build(SqliteQueryBuilder)
}

/// Author names of a book (joins authors via book_authors).
pub fn authors_of_book(book_id: i64) -> Built {
    Query::select()
        .column((Authors::Table, Authors::Name))
        .from(BookAuthors::Table)
        .inner_join(
            Authors::Table,
            Expr::col((Authors::Table, Authors::Id))
                .equals((BookAuthors::Table, BookAuthors::AuthorId)),
        )
        .and_where(Expr::col((BookAuthors::Table, BookAuthors::BookId)).eq(book_id))
        .order_by((Authors::Table, Authors::Name), Order::Asc)
        .build(SqliteQueryBuilder)
}

pub fn link_category(book_id: i64, category_id: i64) -> Built {
    Query::insert()
        .into_table(BookCategories::Table)
        .columns([BookCategories::BookId, BookCategories::CategoryId])
        .values_panic([book_id.into(), category_id.into()])
        .build(SqliteQueryBuilder)
}

pub fn unlink_category(book_id: i64, category_id: i64) -> Built {
    Query::delete()
        .from_table(BookCategories::Table)
        .and_where(Expr::col(BookCategories::BookId).eq(book_id))
        .and_where(Expr::col(BookCategories::CategoryId).eq(category_id))
        .build(SqliteQueryBuilder)
}

/// Category names of a book.
pub fn categories_of_book(book_id: i64) -> Built {
    Query::select()
        .column((Categories::Table, Categories::Name))
        .from(BookCategories::Table)
        .inner_join(
            Categories::Table,
            Expr::col((Categories::Table, Categories::Id))
                .equals((BookCategories::Table, BookCategories::CategoryId)),
        )
        .and_where(Expr::col((BookCategories::Table, BookCategories::BookId)).eq(book_id))
        .order_by((Categories::Table, Categories::Name), Order::Asc)
        .build(SqliteQueryBuilder)
}

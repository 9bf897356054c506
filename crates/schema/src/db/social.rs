//! Review, comment, and like query builders.

use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::Built;
use super::tables::{CommentLikes, Comments, ReviewLikes, Reviews, Users};

// ── Reviews ───────────────────────────────────────────────────────────────

/// INSERT a review. The one-review-per-(user, book) rule is checked by the
/// caller with [`review_exists`]; the schema only indexes the pair.
pub fn insert_review(user_id: i64, book_id: i64, rating: i64, content: &str) -> Built {
    Query::insert()
        .into_table(Reviews::Table)
        .columns([
            Reviews::UserId,
            Reviews::BookId,
            Reviews::Rating,
            Reviews::Content,
        ])
        .values_panic([user_id.into(), book_id.into(), rating.into(), content.into()])
        .build(SqliteQueryBuilder)
}

/// Has this user already reviewed this book?
pub fn review_exists(user_id: i64, book_id: i64) -> Built {
    Query::select()
        .expr(Expr::expr(Func::count(Expr::col(Asterisk))).gt(0))
        .from(Reviews::Table)
        .and_where(Expr::col(Reviews::UserId).eq(user_id))
        .and_where(Expr::col(Reviews::BookId).eq(book_id))
        .build(SqliteQueryBuilder)
}

/// Reviews of a book with the reviewer's display name, newest first.
pub fn reviews_for_book(book_id: i64) -> Built {
    Query::select()
        .column((Reviews::Table, Reviews::Id))
        .column((Reviews::Table, Reviews::UserId))
        .column((Reviews::Table, Reviews::BookId))
        .column((Reviews::Table, Reviews::Rating))
        .column((Reviews::Table, Reviews::Content))
        .column((Reviews::Table, Reviews::CreatedAt))
        .column((Users::Table, Users::Name))
        .from(Reviews::Table)
        .inner_join(
            Users::Table,
            Expr::col((Users::Table, Users::Id)).equals((Reviews::Table, Reviews::UserId)),
        )
        .and_where(Expr::col((Reviews::Table, Reviews::BookId)).eq(book_id))
        .order_by((Reviews::Table, Reviews::CreatedAt), Order::Desc)
        .build(SqliteQueryBuilder)
}

pub fn delete_review(review_id: i64) -> Built {
    Query::delete()
        .from_table(Reviews::Table)
        .and_where(Expr::col(Reviews::Id).eq(review_id))
        .build(SqliteQueryBuilder)
}

// ── Review likes ──────────────────────────────────────────────────────────

/// INSERT a like. The composite PK rejects a second like from the same user.
pub fn insert_review_like(user_id: i64, review_id: i64) -> Built {
    Query::insert()
        .into_table(ReviewLikes::Table)
        .columns([ReviewLikes::UserId, ReviewLikes::ReviewId])
        .values_panic([user_id.into(), review_id.into()])
        .build(SqliteQueryBuilder)
}

pub fn delete_review_like(user_id: i64, review_id: i64) -> Built {
    Query::delete()
        .from_table(ReviewLikes::Table)
        .and_where(Expr::col(ReviewLikes::UserId).eq(user_id))
        .and_where(Expr::col(ReviewLikes::ReviewId).eq(review_id))
        .build(SqliteQueryBuilder)
}

pub fn review_like_count(review_id: i64) -> Built {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(ReviewLikes::Table)
        .and_where(Expr::col(ReviewLikes::ReviewId).eq(review_id))
        .build(SqliteQueryBuilder)
}

// ── Comments ──────────────────────────────────────────────────────────────

pub fn insert_comment(user_id: i64, book_id: i64, content: &str) -> Built {
    Query::insert()
        .into_table(Comments::Table)
        .columns([Comments::UserId, Comments::BookId, Comments::Content])
        .values_panic([user_id.into(), book_id.into(), content.into()])
        .build(SqliteQueryBuilder)
}

/// Comments on a book with the commenter's display name, oldest first.
pub fn comments_for_book(book_id: i64) -> Built {
    Query::select()
        .column((Comments::Table, Comments::Id))
        .column((Comments::Table, Comments::UserId))
        .column((Comments::Table, Comments::BookId))
        .column((Comments::Table, Comments::Content))
        .column((Comments::Table, Comments::CreatedAt))
        .column((Users::Table, Users::Name))
        .from(Comments::Table)
        .inner_join(
            Users::Table,
            Expr::col((Users::Table, Users::Id)).equals((Comments::Table, Comments::UserId)),
        )
        .and_where(Expr::col((Comments::Table, Comments::BookId)).eq(book_id))
        .order_by((Comments::Table, Comments::CreatedAt), Order::Asc)
        .build(SqliteQueryBuilder)
}

pub fn delete_comment(comment_id: i64) -> Built {
    Query::delete()
        .from_table(Comments::Table)
        .and_where(Expr::col(Comments::Id).eq(comment_id))
        .build(SqliteQueryBuilder)
}

// ── Comment likes ─────────────────────────────────────────────────────────

pub fn insert_comment_like(user_id: i64, comment_id: i64) -> Built {
    Query::insert()
        .into_table(CommentLikes::Table)
        .columns([CommentLikes::UserId, CommentLikes::CommentId])
        .values_panic([user_id.into(), comment_id.into()])
        .build(SqliteQueryBuilder)
}

pub fn delete_comment_like(user_id: i64, comment_id: i64) -> Built {
    Query::delete()
        .from_table(CommentLikes::Table)
        .and_where(Expr::col(CommentLikes::UserId).eq(user_id))
        .and_where(Expr::col(CommentLikes::CommentId).eq(comment_id))
        .build(SqliteQueryBuilder)
}

pub fn comment_like_count(comment_id: i64) -> Built {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(CommentLikes::Table)
        .and_where(Expr::col(CommentLikes::CommentId).eq(comment_id))
        .build(SqliteQueryBuilder)
}

//! User query builders.

use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::Built;
use super::tables::Users;

/// Column list for user SELECT queries (matches `UserRow` order).
fn user_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.columns([
        Users::Id,
        Users::Email,
        Users::Name,
        Users::Role,
        Users::CreatedAt,
    ])
}

/// INSERT a new user.
pub fn insert(email: &str, password_hash: &str, password_salt: &str, name: &str, role: &str) -> Built {
    Query::insert()
        .into_table(Users::Table)
        .columns([
            Users::Email,
            Users::PasswordHash,
            Users::PasswordSalt,
            Users::Name,
            Users::Role,
        ])
        .values_panic([
            email.into(),
            password_hash.into(),
            password_salt.into(),
            name.into(),
            role.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a single user by id.
pub fn get_by_id(user_id: i64) -> Built {
    let mut q = Query::select().to_owned();
    user_columns(&mut q);
    q.from(Users::Table)
        .and_where(Expr::col(Users::Id).eq(user_id))
        .build(SqliteQueryBuilder)
}

/// Find user by email for login (adds password hash and salt).
pub fn get_by_email_for_login(email: &str) -> Built {
    let mut q = Query::select().to_owned();
    user_columns(&mut q);
    q.columns([Users::PasswordHash, Users::PasswordSalt])
        .from(Users::Table)
        .and_where(Expr::col(Users::Email).eq(email))
        .build(SqliteQueryBuilder)
}

/// Check email existence.
pub fn email_exists(email: &str) -> Built {
    Query::select()
        .expr(Expr::expr(Func::count(Expr::col(Asterisk))).gt(0))
        .from(Users::Table)
        .and_where(Expr::col(Users::Email).eq(email))
        .build(SqliteQueryBuilder)
}

/// List every non-admin account, oldest first.
pub fn list_non_admin(admin_role: &str) -> Built {
    let mut q = Query::select().to_owned();
    user_columns(&mut q);
    q.from(Users::Table)
        .and_where(Expr::col(Users::Role).ne(admin_role))
        .order_by(Users::CreatedAt, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// Update password hash and salt.
pub fn update_password(user_id: i64, password_hash: &str, password_salt: &str) -> Built {
    Query::update()
        .table(Users::Table)
        .value(Users::PasswordHash, password_hash)
        .value(Users::PasswordSalt, password_salt)
        .value(Users::UpdatedAt, Expr::cust("datetime('now')"))
        .and_where(Expr::col(Users::Id).eq(user_id))
        .build(SqliteQueryBuilder)
}

/// DELETE a user. Cascades to social/cart/wishlist rows; restricted by
/// orders and library items.
pub fn delete(user_id: i64) -> Built {
    Query::delete()
        .from_table(Users::Table)
        .and_where(Expr::col(Users::Id).eq(user_id))
        .build(SqliteQueryBuilder)
}

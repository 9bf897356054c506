//! `bookstore seed` — populate a fresh database with a demo catalog.

use anyhow::{Context, Result};
use std::path::PathBuf;

use bookstore_schema::UserRole;
use bookstore_store::NewBook;

pub fn run_seed(db: Option<PathBuf>) -> Result<()> {
    let db = crate::open_db(db)?;

    let admin = db
        .create_user("admin@example.com", "admin-password", "Admin", UserRole::Admin)
        .context("seeding users (already seeded?)")?;
    let alice = db
        .create_user("alice@example.com", "alice-password", "Alice", UserRole::User)?;
    let bob = db.create_user("bob@example.com", "bob-password", "Bob", UserRole::User)?;
    tracing::debug!(admin, alice, bob, "seeded users");

    let fiction = db.add_category("Fiction")?;
    let systems = db.add_category("Systems")?;

    let herbert = db.add_author("Frank Herbert")?;
    let klabnik = db.add_author("Steve Klabnik")?;
    let nichols = db.add_author("Carol Nichols")?;

    let dune = db.add_book(&NewBook {
        title: "Dune".into(),
        isbn: Some("978-0441013593".into()),
        price: 1099,
        publication_date: Some("1965-08-01".into()),
    })?;
    db.link_author(dune, herbert)?;
    db.link_category(dune, fiction)?;

    let trpl = db.add_book(&NewBook {
        title: "The Rust Programming Language".into(),
        isbn: Some("978-1593278281".into()),
        price: 3999,
        publication_date: Some("2019-08-06".into()),
    })?;
    db.link_author(trpl, klabnik)?;
    db.link_author(trpl, nichols)?;
    db.link_category(trpl, systems)?;

    let review = db.create_review(alice, dune, 5, "The spice must flow.")?;
    db.like_review(bob, review)?;
    db.create_comment(bob, trpl, "The borrow checker chapter finally clicked.")?;

    db.set_cart_quantity(bob, dune, 1)?;
    db.add_to_wishlist(alice, trpl)?;

    let order = db.place_order(alice, &[(dune, 1)], "221B Baker Street")?;
    db.add_to_library(alice, dune)?;
    tracing::debug!(order, "seeded commerce rows");

    let total: i64 = db.table_counts()?.iter().map(|(_, n)| n).sum();
    println!("Seeded demo data ({total} rows across 15 tables).");
    Ok(())
}

//! Compile-time–checked column identifiers for all fifteen tables.

use sea_query::Iden;

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    PasswordSalt,
    Name,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Books {
    Table,
    Id,
    Title,
    Isbn,
    Price,
    PublicationDate,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Authors {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Categories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum BookAuthors {
    Table,
    BookId,
    AuthorId,
}

#[derive(Iden)]
pub enum BookCategories {
    Table,
    BookId,
    CategoryId,
}

#[derive(Iden)]
pub enum Reviews {
    Table,
    Id,
    UserId,
    BookId,
    Rating,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Comments {
    Table,
    Id,
    UserId,
    BookId,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum ReviewLikes {
    Table,
    UserId,
    ReviewId,
    CreatedAt,
}

#[derive(Iden)]
pub enum CommentLikes {
    Table,
    UserId,
    CommentId,
    CreatedAt,
}

#[derive(Iden)]
pub enum CartItems {
    Table,
    UserId,
    BookId,
    Quantity,
    CreatedAt,
}

#[derive(Iden)]
pub enum WishlistItems {
    Table,
    UserId,
    BookId,
    CreatedAt,
}

#[derive(Iden)]
pub enum LibraryItems {
    Table,
    UserId,
    BookId,
    CreatedAt,
}

#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    UserId,
    TotalPrice,
    Status,
    ShippingAddress,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum OrderItems {
    Table,
    Id,
    OrderId,
    BookId,
    Quantity,
    PriceAtPurchase,
}

/// Table names in creation order, used for stats and sanity checks.
pub const TABLE_NAMES: &[&str] = &[
    "users",
    "books",
    "authors",
    "categories",
    "book_authors",
    "book_categories",
    "reviews",
    "comments",
    "review_likes",
    "comment_likes",
    "cart_items",
    "wishlist_items",
    "library_items",
    "orders",
    "order_items",
];

//! Input validation shared by every consumer of the schema.
//!
//! The database enforces the same invariants with CHECK constraints; these
//! helpers reject bad input with a readable message before a statement runs.

use crate::ValidationError;

/// Validate and normalize an email address. Returns the lowercased, trimmed email.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') || email.len() > 254 {
        return Err(ValidationError::new("invalid email address"));
    }
    Ok(email)
}

/// Validate a password (8-72 characters).
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new(
            "password must be at least 8 characters",
        ));
    }
    if password.len() > 72 {
        return Err(ValidationError::new(
            "password must be at most 72 characters",
        ));
    }
    Ok(())
}

/// Validate and normalize a display name. Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 64 {
        return Err(ValidationError::new("name must be 1-64 characters"));
    }
    Ok(trimmed)
}

/// Validate a book title. Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 256 {
        return Err(ValidationError::new("title must be 1-256 characters"));
    }
    Ok(trimmed)
}

/// Validate a review rating (1-5 stars).
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::new("rating must be between 1 and 5"));
    }
    Ok(())
}

/// Validate a cart/order quantity.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::new("quantity must be positive"));
    }
    Ok(())
}

/// Validate a monetary amount in cents.
pub fn validate_price(cents: i64) -> Result<(), ValidationError> {
    if cents < 0 {
        return Err(ValidationError::new("price must not be negative"));
    }
    Ok(())
}

/// Validate review/comment content. Returns the trimmed content.
pub fn validate_content(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim().to_string();
    if trimmed.is_empty() {
        return Err(ValidationError::new("content must not be empty"));
    }
    if trimmed.len() > 10_000 {
        return Err(ValidationError::new("content is too long"));
    }
    Ok(trimmed)
}

/// Validate a publication date (`YYYY-MM-DD`). Returns the trimmed date.
pub fn validate_publication_date(date: &str) -> Result<String, ValidationError> {
    let trimmed = date.trim();
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::new("publication date must be YYYY-MM-DD"))?;
    Ok(trimmed.to_string())
}

/// Validate a shipping address. Returns the trimmed address.
pub fn validate_shipping_address(address: &str) -> Result<String, ValidationError> {
    let trimmed = address.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 500 {
        return Err(ValidationError::new(
            "shipping address must be 1-500 characters",
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" Alice@Example.COM ").unwrap(), "alice@example.com");
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_publication_date() {
        assert_eq!(validate_publication_date(" 2021-03-09 ").unwrap(), "2021-03-09");
        assert!(validate_publication_date("2021-13-01").is_err());
        assert!(validate_publication_date("March 9, 2021").is_err());
    }

    #[test]
    fn test_validate_content() {
        assert_eq!(validate_content("  fine  ").unwrap(), "fine");
        assert!(validate_content("   ").is_err());
    }
}

//! User operations: signup, login verification, listing, deletion.

use rusqlite::OptionalExtension;

use bookstore_schema::db::users as q;
use bookstore_schema::{UserRole, crypto, service};

use crate::error::{Result, StoreError, map_fk_conflict};
use crate::rows::{UserRow, row_to_user};
use crate::{BookstoreDb, sq_execute, sq_query_map, sq_query_row};

impl BookstoreDb {
    /// Register a user. Fails with `Conflict` if the email is taken.
    pub fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> Result<i64> {
        let email = service::validate_email(email)?;
        service::validate_password(password)?;
        let name = service::validate_name(name)?;

        let conn = self.conn();
        let exists: bool = sq_query_row(&conn, q::email_exists(&email), |row| row.get(0))?;
        if exists {
            return Err(StoreError::Conflict(format!(
                "email already registered: {email}"
            )));
        }

        let (hash, salt) = crypto::hash_password(password)?;
        sq_execute(&conn, q::insert(&email, &hash, &salt, &name, role.as_str()))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<UserRow>> {
        let conn = self.conn();
        Ok(sq_query_row(&conn, q::get_by_id(user_id), row_to_user).optional()?)
    }

    /// Check credentials. `Ok(None)` on unknown email or wrong password.
    pub fn verify_login(&self, email: &str, password: &str) -> Result<Option<UserRow>> {
        let email = service::validate_email(email)?;
        let conn = self.conn();
        let row = sq_query_row(&conn, q::get_by_email_for_login(&email), |row| {
            Ok((row_to_user(row)?, row.get::<_, String>(5)?, row.get::<_, String>(6)?))
        })
        .optional()?;

        match row {
            Some((user, hash, salt)) if crypto::verify_password(password, &hash, &salt) => {
                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }

    /// Every non-admin account, oldest first. Mirrors the admin user listing,
    /// which never shows admin accounts.
    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        let conn = self.conn();
        Ok(sq_query_map(
            &conn,
            q::list_non_admin(UserRole::Admin.as_str()),
            row_to_user,
        )?)
    }

    pub fn update_password(&self, user_id: i64, new_password: &str) -> Result<()> {
        service::validate_password(new_password)?;
        let (hash, salt) = crypto::hash_password(new_password)?;
        let conn = self.conn();
        let changed = sq_execute(&conn, q::update_password(user_id, &hash, &salt))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("user {user_id} not found")));
        }
        Ok(())
    }

    /// Delete an account. Reviews, comments, likes, cart and wishlist rows go
    /// with it; order history and owned library items block the deletion.
    pub fn delete_user(&self, user_id: i64) -> Result<()> {
        let conn = self.conn();
        let deleted = sq_execute(&conn, q::delete(user_id))
            .map_err(|e| map_fk_conflict(e, "user has order or library history"))?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("user {user_id} not found")));
        }
        Ok(())
    }
}

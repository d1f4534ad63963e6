//! User repository for database operations.

use crate::entities::user::{NewUser, User};
use crate::types::{errors::UserError, UserResult};
use sqlx::{Row, SqlitePool};

/// Repository for rows in the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user, enforcing email/phone uniqueness.
    ///
    /// Runs an aggregate pre-check inside the insert transaction so that a
    /// conflict on both columns reports both fields, not just the first one
    /// the constraint machinery happens to trip over. The unique constraints
    /// stay on the table; losing a race to a concurrent insert still comes
    /// back as [`UserError::Duplicate`].
    pub async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        let row = sqlx::query(
            "SELECT \
                EXISTS(SELECT 1 FROM users WHERE email = ?) AS email_taken, \
                EXISTS(SELECT 1 FROM users WHERE phone = ?) AS phone_taken",
        )
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| UserError::Database(e.to_string()))?;

        let mut conflicts = Vec::new();
        if row.get::<i64, _>("email_taken") != 0 {
            conflicts.push("email".to_string());
        }
        if row.get::<i64, _>("phone_taken") != 0 {
            conflicts.push("phone".to_string());
        }
        if !conflicts.is_empty() {
            return Err(UserError::Duplicate(conflicts));
        }

        let result = sqlx::query(
            "INSERT INTO users (name, email, address, phone, password) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.address)
        .bind(&new_user.phone)
        .bind(&new_user.password)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        let id = result.last_insert_rowid();

        tx.commit()
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            address: new_user.address.clone(),
            phone: new_user.phone.clone(),
            password: new_user.password.clone(),
        })
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, address, phone, password FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|row| map_user_row(&row)))
    }

    /// Find the user matching both email and password digest.
    ///
    /// Used only for login. A missing email and a digest mismatch are
    /// indistinguishable here, which keeps the login error non-enumerating.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password_digest: &str,
    ) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, address, phone, password FROM users \
             WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(row.map(|row| map_user_row(&row)))
    }
}

fn map_user_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        address: row.get("address"),
        phone: row.get("phone"),
        password: row.get("password"),
    }
}

fn map_insert_error(e: sqlx::Error) -> UserError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed") {
        let mut conflicts = Vec::new();
        if message.contains("users.email") {
            conflicts.push("email".to_string());
        }
        if message.contains("users.phone") {
            conflicts.push("phone".to_string());
        }
        if !conflicts.is_empty() {
            return UserError::Duplicate(conflicts);
        }
    }
    UserError::Database(message)
}

//! SQLite implementation of the UserRepository trait.
//!
//! Users live in the `users` table created by
//! [`DatabasePool::ensure_schema`](crate::database::DatabasePool::ensure_schema).
//! Ids come from `AUTOINCREMENT`, so they start at 1 and are never reused.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use pr_core::domain::entities::token::PrincipalId;
use pr_core::domain::entities::user::{normalize_email, NewUser, User, UserProfile};
use pr_core::errors::{AuthError, DomainError};
use pr_core::repositories::UserRepository;

const SELECT_BY_ID: &str = r#"
    SELECT id, first_name, last_name, email, phone, full_address,
           recovery_bounty, hash, password_hash, created_at
    FROM users
    WHERE id = ?
    LIMIT 1
"#;

const SELECT_BY_EMAIL: &str = r#"
    SELECT id, first_name, last_name, email, phone, full_address,
           recovery_bounty, hash, password_hash, created_at
    FROM users
    WHERE email = ?
    LIMIT 1
"#;

const SELECT_ALL: &str = r#"
    SELECT id, first_name, last_name, email, phone, full_address,
           recovery_bounty, hash, password_hash, created_at
    FROM users
    ORDER BY id
"#;

enum UserKey<'a> {
    Id(PrincipalId),
    Email(&'a str),
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    /// Database connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SQLite user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
        Ok(User {
            id: column(row, "id")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            full_address: column(row, "full_address")?,
            recovery_bounty: column(row, "recovery_bounty")?,
            hash: column(row, "hash")?,
            password_hash: column(row, "password_hash")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    async fn fetch_optional(
        &self,
        query: &str,
        key: UserKey<'_>,
    ) -> Result<Option<User>, DomainError> {
        let query = sqlx::query(query);
        let query = match key {
            UserKey::Id(id) => query.bind(id),
            UserKey::Email(email) => query.bind(email),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

/// Unique violations on `email` become `EmailAlreadyRegistered`
fn write_error(context: &str, e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Auth(AuthError::EmailAlreadyRegistered)
        }
        _ => DomainError::Database(format!("{}: {}", context, e)),
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| DomainError::Database(format!("Failed to get {}: {}", name, e)))
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<User>, DomainError> {
        self.fetch_optional(SELECT_BY_ID, UserKey::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_optional(SELECT_BY_EMAIL, UserKey::Email(email)).await
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                first_name, last_name, email, phone, full_address,
                recovery_bounty, hash, password_hash, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.full_address)
            .bind(user.recovery_bounty)
            .bind(&user.hash)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to create user", e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(user_id = id, "Inserted user row");
        Ok(User::from_new(id, user))
    }

    async fn update_password(
        &self,
        id: PrincipalId,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update password: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update_profile(
        &self,
        id: PrincipalId,
        profile: &UserProfile,
    ) -> Result<Option<User>, DomainError> {
        let query = r#"
            UPDATE users
            SET first_name = ?, last_name = ?, email = ?, phone = ?,
                full_address = ?, recovery_bounty = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(normalize_email(&profile.email))
            .bind(&profile.phone)
            .bind(&profile.full_address)
            .bind(profile.recovery_bounty)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: PrincipalId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to delete user: {}", e)))?;

        tracing::debug!(user_id = id, "Deleted user row");
        Ok(result.rows_affected() > 0)
    }
}

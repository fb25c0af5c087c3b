//! Table definitions the MySQL adapters expect
//!
//! Migrations are out of scope; `ensure_schema` only creates missing tables so
//! a fresh database works out of the box.

use crate::database::DatabasePool;
use crate::InfrastructureError;

pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        username VARCHAR(64) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        first_name VARCHAR(100) NULL,
        last_name VARCHAR(100) NULL,
        birth_date DATE NULL,
        phone_number VARCHAR(32) NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY uq_users_username (username)
    )
"#;

pub const CREATE_REFRESH_TOKENS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        token_id CHAR(36) NOT NULL PRIMARY KEY,
        subject BIGINT UNSIGNED NOT NULL,
        expires_at DATETIME NOT NULL,
        KEY idx_refresh_tokens_expires_at (expires_at)
    )
"#;

/// Create the `users` and `refresh_tokens` tables if they do not exist
pub async fn ensure_schema(pool: &DatabasePool) -> Result<(), InfrastructureError> {
    for statement in [CREATE_USERS_TABLE, CREATE_REFRESH_TOKENS_TABLE] {
        sqlx::query(statement).execute(pool.get_pool()).await?;
    }
    tracing::info!("Database schema verified");
    Ok(())
}

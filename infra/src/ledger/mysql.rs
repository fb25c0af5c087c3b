//! MySQL implementation of the RevocationLedger trait.
//!
//! One row per live refresh token in `refresh_tokens`. Deletion is a single
//! `DELETE ... WHERE token_id = ?`; InnoDB row locking makes the affected-row
//! count the atomic outcome of a concurrent race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ks_core::domain::entities::token::RevocationEntry;
use ks_core::errors::DomainError;
use ks_core::repositories::RevocationLedger;

use crate::database::DatabasePool;

/// MySQL-backed revocation ledger
pub struct MySqlRevocationLedger {
    pool: MySqlPool,
}

impl MySqlRevocationLedger {
    pub fn new(pool: &DatabasePool) -> Self {
        Self {
            pool: pool.get_pool().clone(),
        }
    }

    fn row_to_entry(row: &sqlx::mysql::MySqlRow) -> Result<RevocationEntry, DomainError> {
        let token_id: String = row
            .try_get("token_id")
            .map_err(|e| internal(format!("Failed to get token_id: {}", e)))?;

        Ok(RevocationEntry {
            token_id: Uuid::parse_str(&token_id)
                .map_err(|e| internal(format!("Invalid token UUID: {}", e)))?,
            subject: row
                .try_get("subject")
                .map_err(|e| internal(format!("Failed to get subject: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| internal(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl RevocationLedger for MySqlRevocationLedger {
    async fn put(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (token_id, subject, expires_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(entry.token_id.to_string())
            .bind(entry.subject)
            .bind(entry.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: format!("Ledger entry {} already exists", entry.token_id),
                    }
                }
                other => internal(format!("Failed to save ledger entry: {}", other)),
            })?;

        Ok(())
    }

    async fn get_by_id(&self, token_id: Uuid) -> Result<Option<RevocationEntry>, DomainError> {
        let query = r#"
            SELECT token_id, subject, expires_at
            FROM refresh_tokens
            WHERE token_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to find ledger entry: {}", e)))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn delete_by_id(&self, token_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_id = ?")
            .bind(token_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to delete ledger entry: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to delete expired ledger entries: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}

fn internal(message: String) -> DomainError {
    DomainError::Internal { message }
}

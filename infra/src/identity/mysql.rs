//! MySQL implementation of the IdentityStore trait
//!
//! Identities live in the `users` table with bcrypt password hashes.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use ks_core::domain::entities::identity::{Identity, IdentityId, NewIdentity};
use ks_core::errors::{AuthError, DomainError};
use ks_core::repositories::IdentityStore;

use crate::database::DatabasePool;
use crate::InfrastructureError;

use super::hashing::{dummy_hash, hash_password, verify_password};

/// MySQL-backed identity store
pub struct MySqlIdentityStore {
    pool: MySqlPool,
    bcrypt_cost: u32,
    dummy_hash: String,
}

impl MySqlIdentityStore {
    pub fn new(pool: &DatabasePool, bcrypt_cost: u32) -> Result<Self, InfrastructureError> {
        Ok(Self {
            pool: pool.get_pool().clone(),
            bcrypt_cost,
            dummy_hash: dummy_hash(bcrypt_cost)?,
        })
    }

    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<Identity, DomainError> {
        Ok(Identity {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::internal(format!("Failed to get username: {}", e)))?,
        })
    }
}

#[async_trait]
impl IdentityStore for MySqlIdentityStore {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash FROM users WHERE username = ? LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to look up identity: {}", e)))?;

        let Some(row) = row else {
            verify_password(password.to_string(), self.dummy_hash.clone()).await?;
            return Ok(None);
        };

        let hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?;

        if verify_password(password.to_string(), hash).await? {
            Ok(Some(Self::row_to_identity(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        let row = sqlx::query("SELECT id, username FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find identity: {}", e)))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn register(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        let NewIdentity {
            username,
            password,
            first_name,
            last_name,
            birth_date,
            phone_number,
        } = new_identity;

        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let query = r#"
            INSERT INTO users
                (username, password_hash, first_name, last_name, birth_date, phone_number)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&username)
            .bind(password_hash)
            .bind(first_name)
            .bind(last_name)
            .bind(birth_date)
            .bind(phone_number)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::from(AuthError::UsernameTaken {
                        username: username.clone(),
                    })
                }
                other => DomainError::internal(format!("Failed to register identity: {}", other)),
            })?;

        let id = result.last_insert_id();
        tracing::info!(identity_id = id, "Identity registered");

        Ok(Identity::new(id, username))
    }
}

//! `PostgreSQL` implementation of the `DurableSlot` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use washflow_core::error::DomainError;
use washflow_core::slot::DurableSlot;

use crate::schema::CREATE_SLOTS_TABLE;

/// PostgreSQL-backed durable slot. One row per key in `durable_slots`.
#[derive(Debug, Clone)]
pub struct PgSlot {
    pool: PgPool,
}

impl PgSlot {
    /// Creates a new `PgSlot`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `durable_slots` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the underlying `sqlx::Error` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(CREATE_SLOTS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

fn database_error(e: &sqlx::Error) -> DomainError {
    DomainError::infrastructure(format!("database error: {e}"))
}

#[async_trait]
impl DurableSlot for PgSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT payload FROM durable_slots WHERE slot_key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error(&e))?;
        Ok(row.map(|(payload,)| payload))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO durable_slots (slot_key, payload, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (slot_key)
            DO UPDATE SET
                payload = EXCLUDED.payload,
                updated_at = NOW()
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }
}

//! Repository for the `ids` table.
//!
//! Every method runs in its own transaction at REPEATABLE READ isolation;
//! nothing joins a caller's transaction.

use idstore_core::pagination::PageRequest;
use idstore_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::record::{NewRecord, Record};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid";

/// Provides CRUD operations for records.
pub struct RecordRepo;

impl RecordRepo {
    /// Open a fresh REPEATABLE READ transaction.
    async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Insert a new record, returning the row with its assigned id.
    pub async fn create(pool: &PgPool, input: &NewRecord) -> Result<Record, sqlx::Error> {
        let query = format!("INSERT INTO ids (uuid) VALUES ($1) RETURNING {COLUMNS}");
        let mut tx = Self::begin(pool).await?;
        let row = sqlx::query_as::<_, Record>(&query)
            .bind(input.uuid)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Find a record by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ids WHERE id = $1");
        let mut tx = Self::begin(pool).await?;
        let row = sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// List one page of records ordered by id.
    pub async fn list_page(pool: &PgPool, page: PageRequest) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ids ORDER BY id LIMIT $1 OFFSET $2");
        let mut tx = Self::begin(pool).await?;
        let rows = sqlx::query_as::<_, Record>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Insert or overwrite the record with `record.id`.
    pub async fn upsert(pool: &PgPool, record: &Record) -> Result<Record, sqlx::Error> {
        let query = format!(
            "INSERT INTO ids (id, uuid) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET uuid = EXCLUDED.uuid \
             RETURNING {COLUMNS}"
        );
        let mut tx = Self::begin(pool).await?;
        let row = sqlx::query_as::<_, Record>(&query)
            .bind(record.id)
            .bind(record.uuid)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Whether a record with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = Self::begin(pool).await?;
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM ids WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(exists)
    }

    /// Delete a record by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = Self::begin(pool).await?;
        let result = sqlx::query("DELETE FROM ids WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

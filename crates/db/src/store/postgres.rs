//! [`RecordStore`] backed by PostgreSQL through [`RecordRepo`].

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use idstore_core::pagination::PageRequest;
use idstore_core::types::DbId;

use super::{end_on_error, RecordStore, RecordStream, StoreError};
use crate::models::record::{NewRecord, Record};
use crate::repositories::RecordRepo;
use crate::DbPool;

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Record>, StoreError> {
        Ok(RecordRepo::find_by_id(&self.pool, id).await?)
    }

    fn find_page(&self, page: PageRequest) -> RecordStream {
        let pool = self.pool.clone();
        stream::once(async move { RecordRepo::list_page(&pool, page).await })
            .map_ok(|rows| stream::iter(rows.into_iter().map(Ok::<_, sqlx::Error>)))
            .try_flatten()
            .map_err(StoreError::from)
            .boxed()
    }

    fn save_all(&self, records: Vec<NewRecord>) -> RecordStream {
        let pool = self.pool.clone();
        end_on_error(
            stream::iter(records)
                .then(move |record| {
                    let pool = pool.clone();
                    async move { RecordRepo::create(&pool, &record).await.map_err(StoreError::from) }
                })
                .boxed(),
        )
    }

    async fn save(&self, record: Record) -> Result<Record, StoreError> {
        Ok(RecordRepo::upsert(&self.pool, &record).await?)
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(RecordRepo::exists(&self.pool, id).await?)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        let removed = RecordRepo::delete(&self.pool, id).await?;
        if !removed {
            tracing::debug!(record_id = id, "Delete matched no rows");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

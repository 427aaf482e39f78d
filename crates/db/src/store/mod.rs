//! The record store abstraction consumed by the HTTP layer.
//!
//! Single-row operations are plain async calls; the caller decides how long
//! to wait for them. Multi-row operations return a lazy [`RecordStream`]:
//! nothing is read or written until the stream is polled, so a caller can
//! hand the stream straight to a response body or consume it against a
//! deadline.

use async_trait::async_trait;
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use idstore_core::pagination::PageRequest;
use idstore_core::types::DbId;

use crate::models::record::{NewRecord, Record};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Failure of an underlying store call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Lazily evaluated sequence of records produced by a store call.
pub type RecordStream = BoxStream<'static, Result<Record, StoreError>>;

/// Yield the first error of `stream`, then stop polling it.
pub(crate) fn end_on_error(stream: RecordStream) -> RecordStream {
    stream
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Record>, StoreError>;

    /// Stream one page of records ordered by id.
    fn find_page(&self, page: PageRequest) -> RecordStream;

    /// Persist each record independently, yielding the saved rows in input
    /// order. An error ends the stream; rows already yielded stay saved.
    fn save_all(&self, records: Vec<NewRecord>) -> RecordStream;

    /// Upsert by id.
    async fn save(&self, record: Record) -> Result<Record, StoreError>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

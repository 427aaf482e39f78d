//! In-process [`RecordStore`] used by tests and database-less local runs.
//!
//! Rows live in a `BTreeMap` so pages come out in id order like the SQL
//! implementation. Latency and outages can be injected to exercise the
//! caller's bounded waits.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use idstore_core::pagination::PageRequest;
use idstore_core::types::DbId;
use tokio::sync::RwLock;

use super::{end_on_error, RecordStore, RecordStream, StoreError};
use crate::models::record::{NewRecord, Record};

#[derive(Default)]
struct Inner {
    rows: RwLock<BTreeMap<DbId, Record>>,
    /// Last id handed out; the first record gets id 1.
    last_id: AtomicI64,
    latency: Option<Duration>,
    unavailable: AtomicBool,
}

impl Inner {
    /// Apply injected latency, then fail if the store is marked unavailable.
    async fn enter(&self) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    async fn insert(&self, record: NewRecord) -> Result<Record, StoreError> {
        self.enter().await?;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = Record {
            id,
            uuid: record.uuid,
        };
        self.rows.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn page(&self, page: PageRequest) -> Result<Vec<Record>, StoreError> {
        self.enter().await?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.size).unwrap_or(usize::MAX);
        let rows = self.rows.read().await;
        Ok(rows.values().skip(skip).take(take).cloned().collect())
    }
}

/// Cloning shares the same rows.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that sleeps for `latency` before every call, and before every
    /// element of a batch save.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                latency: Some(latency),
                ..Inner::default()
            }),
        }
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Record>, StoreError> {
        self.inner.enter().await?;
        Ok(self.inner.rows.read().await.get(&id).cloned())
    }

    fn find_page(&self, page: PageRequest) -> RecordStream {
        let inner = Arc::clone(&self.inner);
        stream::once(async move { inner.page(page).await })
            .flat_map(|result| {
                let items: Vec<Result<Record, StoreError>> = match result {
                    Ok(rows) => rows.into_iter().map(Ok).collect(),
                    Err(e) => vec![Err(e)],
                };
                stream::iter(items)
            })
            .boxed()
    }

    fn save_all(&self, records: Vec<NewRecord>) -> RecordStream {
        let inner = Arc::clone(&self.inner);
        end_on_error(
            stream::iter(records)
                .then(move |record| {
                    let inner = Arc::clone(&inner);
                    async move { inner.insert(record).await }
                })
                .boxed(),
        )
    }

    async fn save(&self, record: Record) -> Result<Record, StoreError> {
        self.inner.enter().await?;
        self.inner.last_id.fetch_max(record.id, Ordering::SeqCst);
        self.inner
            .rows
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.enter().await?;
        Ok(self.inner.rows.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), StoreError> {
        self.inner.enter().await?;
        self.inner.rows.write().await.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.enter().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

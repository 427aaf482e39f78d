//! Handlers for the `/record` resource.
//!
//! Single-row store calls are awaited under a bounded wait; when the wait
//! elapses or the store fails the response is 206 rather than a server
//! error, since the operation may have partially taken effect. Listing is
//! streamed straight from the store, and deletes complete after the
//! response has been sent.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;
use idstore_core::deadline::{self, BATCH_WAIT_PER_ROW, SINGLE_ROW_WAIT};
use idstore_core::error::CoreError;
use idstore_core::pagination;
use idstore_core::record::{self, RECORD_ENTITY};
use idstore_core::types::DbId;
use idstore_db::models::record::{NewRecord, Record, RecordPayload};
use idstore_db::store::StoreError;
use tokio::time::Instant;

use crate::error::{AppError, AppResult};
use crate::query::{IdParams, PageParams};
use crate::response::json_array_body;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Await a store call for at most `wait`.
async fn bounded<T, F>(operation: &'static str, wait: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(wait, call).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            let waited_ms = deadline::as_millis_u64(wait);
            tracing::warn!(operation, waited_ms, "Store call exceeded its bounded wait");
            Err(CoreError::Timeout {
                operation,
                waited_ms,
            }
            .into())
        }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: RECORD_ENTITY,
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /record/{id}
// ---------------------------------------------------------------------------

/// Fetch a single record.
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Record>> {
    let Path(id) = path?;

    let record = bounded("find_by_id", SINGLE_ROW_WAIT, state.store.find_by_id(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(record))
}

// ---------------------------------------------------------------------------
// GET /record?p=&c=
// ---------------------------------------------------------------------------

/// Stream one page of records. `p` is one-based (default 1), `c` is the
/// page size (default 100, must exceed 10).
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = query?;
    let page = pagination::page_request(params.p, params.c)?;

    let body = json_array_body(state.store.find_page(page));
    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response())
}

// ---------------------------------------------------------------------------
// POST /record
// ---------------------------------------------------------------------------

/// Create a batch of records.
///
/// Rows are collected against a deadline of 100 ms per submitted payload.
/// If fewer rows than submitted arrive in time, the ones that did are
/// returned with 206. Saves still pending at the deadline keep running in
/// the background.
///
/// A store error stops the batch: rows saved before it are returned with
/// 206 and the remaining payloads are never attempted.
///
/// The router-wide request timeout does not apply here, so a batch is only
/// cut short by its own deadline.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Vec<RecordPayload>>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payloads) = body?;
    let uuids = record::validate_batch(payloads.iter().map(|p| p.uuid.as_deref()))?;

    let submitted = uuids.len();
    let wait = deadline::batch_wait(submitted);
    let until = Instant::now() + wait;

    let mut stream = state
        .store
        .save_all(uuids.into_iter().map(|uuid| NewRecord { uuid }).collect());
    let mut saved = Vec::with_capacity(submitted);

    loop {
        let next = tokio::time::timeout_at(until, stream.next()).await;
        match next {
            Ok(Some(Ok(record))) => saved.push(record),
            Ok(Some(Err(e))) => {
                tracing::warn!(
                    error = %e,
                    batch_size = submitted,
                    saved = saved.len(),
                    "Batch save failed part-way",
                );
                break;
            }
            Ok(None) => break,
            Err(_) => {
                tracing::warn!(
                    batch_size = submitted,
                    saved = saved.len(),
                    waited_ms = deadline::as_millis_u64(wait),
                    per_row_ms = deadline::as_millis_u64(BATCH_WAIT_PER_ROW),
                    "Batch save exceeded its deadline",
                );
                let reported = saved.len();
                tokio::spawn(async move {
                    let (late, failed) = stream
                        .fold((0usize, 0usize), |(ok, err), item| async move {
                            match item {
                                Ok(_) => (ok + 1, err),
                                Err(_) => (ok, err + 1),
                            }
                        })
                        .await;
                    tracing::info!(reported, late, failed, "Late batch saves drained");
                });
                break;
            }
        }
    }

    let status = if saved.len() == submitted {
        StatusCode::OK
    } else {
        StatusCode::PARTIAL_CONTENT
    };
    Ok((status, Json(saved)).into_response())
}

// ---------------------------------------------------------------------------
// PATCH /record?id=
// ---------------------------------------------------------------------------

/// Replace the uuid of an existing record. The existence read and the
/// write are separate store calls.
pub async fn update(
    State(state): State<AppState>,
    query: Result<Query<IdParams>, QueryRejection>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> AppResult<Json<Record>> {
    let Query(IdParams { id }) = query?;
    let Json(payload) = body?;
    let uuid = record::validate_uuid(payload.uuid.as_deref())?;

    bounded("find_by_id", SINGLE_ROW_WAIT, state.store.find_by_id(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    let saved = state.store.save(Record { id, uuid }).await?;
    tracing::debug!(record_id = id, uuid = %saved.uuid, "Record updated");

    Ok(Json(saved))
}

// ---------------------------------------------------------------------------
// DELETE /record?id=
// ---------------------------------------------------------------------------

/// Delete a record. Responds as soon as existence is confirmed; the delete
/// itself runs in the background.
pub async fn delete(
    State(state): State<AppState>,
    query: Result<Query<IdParams>, QueryRejection>,
) -> AppResult<StatusCode> {
    let Query(IdParams { id }) = query?;

    if !bounded("exists_by_id", SINGLE_ROW_WAIT, state.store.exists_by_id(id)).await? {
        return Err(not_found(id));
    }

    let store = Arc::clone(&state.store);
    tokio::spawn(async move {
        if let Err(e) = store.delete_by_id(id).await {
            tracing::error!(record_id = id, error = %e, "Background delete failed");
        }
    });

    tracing::info!(record_id = id, "Record delete dispatched");
    Ok(StatusCode::OK)
}

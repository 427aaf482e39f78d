//! Response body helpers.

use axum::body::{Body, Bytes};
use axum::BoxError;
use futures::stream::{self, StreamExt};
use idstore_db::store::RecordStream;

/// Encode a record stream as a chunked JSON array.
///
/// Rows are serialized as the store yields them. A store error after the
/// opening bracket has been sent cannot change the status any more; it is
/// logged and aborts the body.
pub fn json_array_body(records: RecordStream) -> Body {
    let open = stream::once(async { Ok::<_, BoxError>(Bytes::from_static(b"[")) });
    let close = stream::once(async { Ok::<_, BoxError>(Bytes::from_static(b"]")) });

    let items = records.enumerate().map(|(idx, item)| {
        let record = item.map_err(|e| {
            tracing::warn!(error = %e, rows_sent = idx, "Record stream failed mid-body");
            BoxError::from(e)
        })?;
        let mut buf = if idx == 0 { Vec::new() } else { vec![b','] };
        serde_json::to_writer(&mut buf, &record)?;
        Ok::<_, BoxError>(Bytes::from(buf))
    });

    Body::from_stream(open.chain(items).chain(close))
}

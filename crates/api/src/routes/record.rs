//! Route definitions for records.

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::record;
use crate::state::AppState;

/// Routes for the `/record` resource.
///
/// ```text
/// GET    /record/{id}      -> get_by_id
/// GET    /record?p=&c=     -> list
/// POST   /record           -> create
/// PATCH  /record?id=       -> update
/// DELETE /record?id=       -> delete
/// ```
///
/// `request_timeout` wraps every route except `POST /record`, whose
/// deadline grows with the batch size and is enforced by the handler.
pub fn router(request_timeout: TimeoutLayer) -> Router<AppState> {
    Router::new()
        .route(
            "/record",
            get(record::list)
                .patch(record::update)
                .delete(record::delete),
        )
        .route("/record/{id}", get(record::get_by_id))
        .route_layer(request_timeout)
        .route("/record", post(record::create))
}

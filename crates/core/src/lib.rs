//! Domain types, error taxonomy, and pure validation for the record service.
//!
//! Nothing in this crate performs I/O; the store lives in `idstore-db` and
//! the HTTP surface in `idstore-api`.

pub mod deadline;
pub mod error;
pub mod pagination;
pub mod record;
pub mod types;

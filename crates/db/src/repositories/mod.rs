//! Repository layer: one struct per table, static async methods over a pool.

pub mod record_repo;

pub use record_repo::RecordRepo;

//! Persistence layer contracts and implementations.
//!
//! # Responsibility
//! - Define the injected key-value contract and the year-record store
//!   built on it.
//! - Isolate storage-shape and migration details from the grid service.
//!
//! # Invariants
//! - Legacy payload shapes never cross this boundary; callers see only
//!   the current schema.

pub mod kv;
pub mod year_repo;

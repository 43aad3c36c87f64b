//! Use-case services over the calendar math and the year store.
//!
//! # Responsibility
//! - Orchestrate grid derivation and session lifecycle for UI callers.
//!
//! # Invariants
//! - Services stay storage-agnostic behind the `YearDataStore` contract.
//! - All state flows through explicit parameters; no ambient globals.

pub mod grid_service;
pub mod session;

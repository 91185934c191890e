//! Seed-source abstractions and SQLite implementation.
//!
//! # Responsibility
//! - Define the contract for loading the rebuildable seed dataset.
//! - Isolate SQL details from store/service orchestration.
//!
//! # Invariants
//! - Loaded entries are validated before they enter the cache region.
//! - Seed loads are read-only; live mutations never write back here.

pub mod seed_repo;

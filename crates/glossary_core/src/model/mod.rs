//! Domain model for the collaborative glossary.
//!
//! # Responsibility
//! - Define canonical data structures shared by stores, matcher and services.
//! - Keep one entry-centric shape for rendering and endorsement projections.
//!
//! # Invariants
//! - Every glossary record is identified by its unique keyword.
//! - Deletion is a hard removal from the live entries map; history lives only
//!   in the rebuildable seed source.

pub mod entry;

//! Multi-pattern keyword matching entry points.
//!
//! # Responsibility
//! - Expose the incremental pattern index backing cross-reference rendering.
//! - Keep substitution and escaping semantics inside core.

pub mod index;

//! Cache-backed stores over the shared region.
//!
//! # Responsibility
//! - Own all live glossary state: entries, pattern index, rendered HTML,
//!   star lists, user tables and named lock flags.
//! - Enforce the mutation discipline: writes serialize under named locks,
//!   reads are lock-free snapshot loads.
//!
//! # Invariants
//! - The pattern index is mutated in lockstep with the entries map; both
//!   swap atomically as one snapshot.
//! - Readers may observe data stale relative to an in-flight write; callers
//!   tolerate this bounded staleness.

use crate::model::entry::EntryValidationError;
use crate::repo::seed_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod annotation;
pub mod keyword_store;
pub mod lock;
pub mod region;
pub mod star_store;

pub use lock::{LockError, LockName, LockTable};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for mutation, hydration and locking failures.
#[derive(Debug)]
pub enum StoreError {
    Validation(EntryValidationError),
    Lock(LockError),
    Seed(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lock(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Lock(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LockError> for StoreError {
    fn from(value: LockError) -> Self {
        Self::Lock(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Seed(value)
    }
}

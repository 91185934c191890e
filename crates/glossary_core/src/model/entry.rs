//! Glossary entry, star and user records.
//!
//! # Responsibility
//! - Define the canonical entry record keyed by its keyword.
//! - Provide validation for submissions before they reach the store.
//!
//! # Invariants
//! - `keyword` uniquely identifies at most one live entry.
//! - Timestamps are Unix epoch milliseconds.
//! - Star lists are append-only and keep submission order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a seed-provided user account.
pub type UserId = i64;

/// Validation failure for a submitted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// The keyword is empty after trimming.
    EmptyKeyword,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKeyword => write!(f, "entry keyword must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// Canonical glossary record.
///
/// The rendered HTML and the star list are derived state owned by the cache
/// region, not by this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique key; also the linkable term inside other descriptions.
    pub keyword: String,
    /// Free-form description text; rendered with cross-reference links.
    pub description: String,
    /// Seed user that authored the latest revision.
    pub author_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; drives the front-page ordering.
    pub updated_at: i64,
}

impl Entry {
    /// Creates an entry stamped with the current time.
    ///
    /// # Contract
    /// - `created_at == updated_at` on creation; an upsert over an existing
    ///   keyword replaces the whole record, fresh timestamps included.
    pub fn new(
        keyword: impl Into<String>,
        description: impl Into<String>,
        author_id: UserId,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            keyword: keyword.into(),
            description: description.into(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks submission-level invariants.
    ///
    /// # Errors
    /// - `EmptyKeyword` when the keyword is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.keyword.trim().is_empty() {
            return Err(EntryValidationError::EmptyKeyword);
        }
        Ok(())
    }
}

/// Endorsement record attached to a keyword.
///
/// Duplicates are permitted; ordering is submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    pub keyword: String,
    pub user_name: String,
}

impl Star {
    pub fn new(keyword: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            user_name: user_name.into(),
        }
    }
}

/// Seed-provided user account.
///
/// Credential handling (registration, login, sessions) stays outside the
/// core; the fields are carried for the excluded collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub salt: String,
    pub password_hash: String,
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

//! Named mutual-exclusion locks over the shared cache region.
//!
//! # Responsibility
//! - Serialize mutations per logical resource via string-named flags.
//! - Bound every acquisition by a fixed retry ceiling.
//!
//! # Invariants
//! - Flags carry a fixed TTL; an expired flag counts as free, so a
//!   panicking critical section unblocks itself within the TTL.
//! - `release` clears the flag unconditionally. There is no ownership
//!   token, so a foreign or duplicate release can unlock a resource held
//!   by another caller. Known hazard, kept as the documented contract.
//! - Exceeding the retry ceiling is fatal for the operation; there is no
//!   deadlock detection beyond it.

use log::error;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Fixed polling granularity between failed acquisition attempts.
pub const LOCK_RETRY_INTERVAL: Duration = Duration::from_micros(10);
/// Failed attempts tolerated before an acquisition is declared dead.
pub const LOCK_RETRY_LIMIT: u32 = 1000;
/// Flag lifetime; held locks older than this count as free.
pub const LOCK_TTL: Duration = Duration::from_secs(1);

/// Typed lock names, namespaced per resource kind so entry and star
/// buckets can never collide on a shared key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockName<'a> {
    /// Serializes all keyword-store mutations and region rebuilds.
    Entry,
    /// Serializes the load-append-store cycle of one star bucket.
    Stars(&'a str),
}

impl LockName<'_> {
    fn key(&self) -> String {
        match self {
            Self::Entry => "entry".to_string(),
            Self::Stars(keyword) => format!("stars:{keyword}"),
        }
    }
}

impl Display for LockName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Acquisition failure after the retry ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    Exhausted { name: String, attempts: u32 },
}

impl Display for LockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted { name, attempts } => write!(
                f,
                "gave up acquiring lock `{name}` after {attempts} attempts"
            ),
        }
    }
}

impl Error for LockError {}

/// Table of named, TTL'd lock flags.
#[derive(Debug, Default)]
pub struct LockTable {
    flags: Mutex<HashMap<String, Instant>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the named flag, spinning with a fixed interval.
    ///
    /// # Errors
    /// - `Exhausted` after `LOCK_RETRY_LIMIT` failed attempts. Callers treat
    ///   this as fatal for the operation; it is never retried further.
    pub fn acquire(&self, name: &LockName<'_>) -> Result<(), LockError> {
        let key = name.key();
        let mut attempts = 0;

        while !self.try_acquire(&key) {
            attempts += 1;
            if attempts > LOCK_RETRY_LIMIT {
                error!(
                    "event=lock_acquire module=lock status=error name={key} attempts={attempts}"
                );
                return Err(LockError::Exhausted {
                    name: key,
                    attempts,
                });
            }
            thread::sleep(LOCK_RETRY_INTERVAL);
        }

        Ok(())
    }

    /// Clears the named flag unconditionally, held or not, owned or not.
    pub fn release(&self, name: &LockName<'_>) {
        let mut flags = self.flags.lock().expect("lock table poisoned");
        flags.remove(&name.key());
    }

    /// Drops every flag. Used by the explicit region reset.
    pub(crate) fn clear(&self) {
        let mut flags = self.flags.lock().expect("lock table poisoned");
        flags.clear();
    }

    fn try_acquire(&self, key: &str) -> bool {
        let mut flags = self.flags.lock().expect("lock table poisoned");
        let now = Instant::now();
        match flags.get(key) {
            Some(expiry) if *expiry > now => false,
            _ => {
                flags.insert(key.to_string(), now + LOCK_TTL);
                true
            }
        }
    }
}

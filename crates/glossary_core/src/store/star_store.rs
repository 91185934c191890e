//! Append-only endorsement lists per keyword.
//!
//! # Responsibility
//! - Record stars in submission order, duplicates permitted.
//! - Make the load-append-store cycle atomic via the per-keyword lock.
//!
//! # Invariants
//! - `load` never blocks on writers and defaults to an empty list.
//! - Two concurrent `add` calls for the same keyword both persist; the
//!   named lock serializes the read-modify-write.

use crate::model::entry::Star;
use crate::store::lock::{LockError, LockName};
use crate::store::region::Region;
use log::info;
use std::sync::Arc;

/// Star store bound to the shared region.
pub struct StarStore {
    region: Arc<Region>,
}

impl StarStore {
    pub fn new(region: Arc<Region>) -> Self {
        Self { region }
    }

    /// Stars for a keyword in submission order; empty when none recorded.
    pub fn load(&self, keyword: &str) -> Vec<Star> {
        self.region.stars_for(keyword)
    }

    /// Appends one endorsement under the keyword's star lock.
    ///
    /// The load-append-store sequence below is not atomic on its own; the
    /// named lock makes it so.
    ///
    /// # Errors
    /// - Lock exhaustion, fatal for this operation.
    pub fn add(&self, keyword: &str, user_name: &str) -> Result<(), LockError> {
        let lock = LockName::Stars(keyword);
        self.region.locks().acquire(&lock)?;

        let mut stars = self.region.stars_for(keyword);
        stars.push(Star::new(keyword, user_name));
        self.region.store_stars(keyword, stars);

        self.region.locks().release(&lock);
        info!("event=star_add module=store status=ok keyword={keyword} user={user_name}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StarStore;
    use crate::store::region::Region;
    use std::sync::Arc;

    #[test]
    fn load_defaults_to_empty() {
        let stars = StarStore::new(Arc::new(Region::new()));
        assert!(stars.load("missing").is_empty());
    }

    #[test]
    fn add_preserves_order_and_duplicates() {
        let stars = StarStore::new(Arc::new(Region::new()));
        stars.add("rust", "alice").unwrap();
        stars.add("rust", "bob").unwrap();
        stars.add("rust", "alice").unwrap();

        let loaded = stars.load("rust");
        let names: Vec<&str> = loaded.iter().map(|star| star.user_name.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "alice"]);
    }
}

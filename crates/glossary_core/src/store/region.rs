//! Process-wide shared cache region.
//!
//! # Responsibility
//! - Hold all live glossary state: the entries/index snapshot, rendered-HTML
//!   cache, star lists, user lookup tables and named lock flags.
//! - Provide lock-free snapshot reads and short-critical-section cache ops.
//!
//! # Invariants
//! - The entries map and the pattern index swap atomically as one snapshot,
//!   so the index's matchable set never drifts from the keyword set.
//! - `reset` is the only full teardown, and callers run it under the
//!   "entry" named lock so no reader observes a partially rebuilt index.

use crate::matcher::index::PatternIndex;
use crate::model::entry::{Entry, Star, User, UserId};
use crate::repo::seed_repo::SeedData;
use crate::store::lock::LockTable;
use arc_swap::ArcSwap;
use log::info;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

static GLOBAL_REGION: Lazy<Arc<Region>> = Lazy::new(|| Arc::new(Region::new()));

/// Immutable view of the entries map and its matching index.
///
/// Writers build a fresh snapshot under the "entry" lock and swap it in;
/// readers load whatever snapshot is current and may therefore observe
/// state slightly stale relative to an in-flight write.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entries: HashMap<String, Entry>,
    pub index: PatternIndex,
    /// `false` until the region has been filled from the seed source.
    pub hydrated: bool,
}

impl Snapshot {
    fn cold() -> Self {
        Self {
            entries: HashMap::new(),
            index: PatternIndex::new(),
            hydrated: false,
        }
    }

    /// Builds a hydrated snapshot from seed entries.
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        let index = PatternIndex::from_keywords(entries.iter().map(|entry| entry.keyword.as_str()));
        let entries = entries
            .into_iter()
            .map(|entry| (entry.keyword.clone(), entry))
            .collect();
        Self {
            entries,
            index,
            hydrated: true,
        }
    }
}

/// Seed-user lookup tables, by id and by name.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    by_id: HashMap<UserId, User>,
    by_name: HashMap<String, User>,
}

impl UserTable {
    fn from_users(users: Vec<User>) -> Self {
        let mut by_id = HashMap::with_capacity(users.len());
        let mut by_name = HashMap::with_capacity(users.len());
        for user in users {
            by_name.insert(user.name.clone(), user.clone());
            by_id.insert(user.id, user);
        }
        Self { by_id, by_name }
    }

    pub fn by_id(&self, id: UserId) -> Option<&User> {
        self.by_id.get(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<&User> {
        self.by_name.get(name)
    }
}

/// Shared cache region; one per process in production use.
#[derive(Debug)]
pub struct Region {
    snapshot: ArcSwap<Snapshot>,
    html: Mutex<HashMap<String, String>>,
    stars: Mutex<HashMap<String, Vec<Star>>>,
    users: ArcSwap<UserTable>,
    locks: LockTable,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// Creates a cold region; the first read hydrates it from the seed.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::cold()),
            html: Mutex::new(HashMap::new()),
            stars: Mutex::new(HashMap::new()),
            users: ArcSwap::from_pointee(UserTable::default()),
            locks: LockTable::new(),
        }
    }

    /// The process-wide region shared by every request handler.
    pub fn global() -> Arc<Region> {
        Arc::clone(&GLOBAL_REGION)
    }

    /// Lock-free load of the current entries/index snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Installs a new snapshot. Callers must hold the "entry" lock.
    pub(crate) fn install_snapshot(&self, snapshot: Snapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    pub fn users(&self) -> Arc<UserTable> {
        self.users.load_full()
    }

    pub fn locks(&self) -> &LockTable {
        &self.locks
    }

    /// Rebuilds the whole region from seed data and drops all derived state.
    ///
    /// Callers run this under the "entry" lock. Clearing the lock table also
    /// clears that held flag; the subsequent release is then a no-op, which
    /// the ownerless release contract permits.
    pub(crate) fn reset(&self, seed: SeedData) {
        let entry_count = seed.entries.len();
        let user_count = seed.users.len();

        self.install_snapshot(Snapshot::from_entries(seed.entries));
        self.users.store(Arc::new(UserTable::from_users(seed.users)));
        self.html.lock().expect("html cache poisoned").clear();
        self.stars.lock().expect("star cache poisoned").clear();
        self.locks.clear();

        info!(
            "event=region_reset module=store status=ok entries={entry_count} users={user_count}"
        );
    }

    /// Fills a cold region from seed data without touching derived caches
    /// or lock flags. Used by synchronous re-hydration on the read path;
    /// the explicit reinitialize goes through `reset` instead.
    pub(crate) fn hydrate(&self, seed: SeedData) {
        self.install_snapshot(Snapshot::from_entries(seed.entries));
        self.users.store(Arc::new(UserTable::from_users(seed.users)));
    }

    pub(crate) fn cached_html(&self, keyword: &str) -> Option<String> {
        self.html
            .lock()
            .expect("html cache poisoned")
            .get(keyword)
            .cloned()
    }

    pub(crate) fn store_html(&self, keyword: &str, html: String) {
        self.html
            .lock()
            .expect("html cache poisoned")
            .insert(keyword.to_string(), html);
    }

    pub(crate) fn invalidate_html(&self, keyword: &str) {
        self.html.lock().expect("html cache poisoned").remove(keyword);
    }

    pub(crate) fn stars_for(&self, keyword: &str) -> Vec<Star> {
        self.stars
            .lock()
            .expect("star cache poisoned")
            .get(keyword)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn store_stars(&self, keyword: &str, stars: Vec<Star>) {
        self.stars
            .lock()
            .expect("star cache poisoned")
            .insert(keyword.to_string(), stars);
    }
}

#[cfg(test)]
mod tests {
    use super::{Region, Snapshot};
    use crate::model::entry::Entry;
    use crate::repo::seed_repo::SeedData;

    #[test]
    fn global_region_is_one_shared_instance() {
        let first = Region::global();
        let second = Region::global();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_region_is_cold() {
        let region = Region::new();
        assert!(!region.snapshot().hydrated);
        assert!(region.snapshot().entries.is_empty());
    }

    #[test]
    fn snapshot_from_entries_indexes_every_keyword() {
        let snapshot = Snapshot::from_entries(vec![
            Entry::new("alpha", "first", 1),
            Entry::new("beta", "second", 1),
        ]);
        assert!(snapshot.hydrated);
        assert_eq!(snapshot.entries.len(), 2);
        assert!(snapshot.index.contains("alpha"));
        assert!(snapshot.index.contains("beta"));
    }

    #[test]
    fn reset_drops_derived_state() {
        let region = Region::new();
        region.store_html("alpha", "<p>old</p>".to_string());
        region.store_stars("alpha", vec![crate::model::entry::Star::new("alpha", "u")]);

        region.reset(SeedData::default());

        assert!(region.cached_html("alpha").is_none());
        assert!(region.stars_for("alpha").is_empty());
        assert!(region.snapshot().hydrated);
    }
}

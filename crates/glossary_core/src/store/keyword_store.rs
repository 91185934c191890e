//! Authoritative keyword -> entry store over the shared cache region.
//!
//! # Responsibility
//! - Provide get/set/delete/list over the live entries map.
//! - Mutate the pattern index in lockstep with the entries map.
//! - Invalidate affected rendered-HTML cache entries on mutation.
//!
//! # Invariants
//! - All mutations serialize under the "entry" named lock; reads are
//!   lock-free snapshot loads and may observe bounded staleness.
//! - A cold region re-hydrates synchronously from the seed source instead
//!   of failing the read.

use crate::model::entry::Entry;
use crate::repo::seed_repo::SeedRepository;
use crate::store::lock::LockName;
use crate::store::region::{Region, Snapshot};
use crate::store::{StoreError, StoreResult};
use log::{debug, info};
use std::sync::Arc;

/// Keyword store bound to a region and a seed source for hydration.
pub struct KeywordStore<S: SeedRepository> {
    region: Arc<Region>,
    seed: S,
}

impl<S: SeedRepository> KeywordStore<S> {
    pub fn new(region: Arc<Region>, seed: S) -> Self {
        Self { region, seed }
    }

    /// Lock-free read; may be stale relative to an in-flight write.
    pub fn get(&self, keyword: &str) -> StoreResult<Option<Entry>> {
        let snapshot = self.hydrated_snapshot()?;
        Ok(snapshot.entries.get(keyword).cloned())
    }

    /// All live entries, most-recently-updated first.
    pub fn list(&self) -> StoreResult<Vec<Entry>> {
        let snapshot = self.hydrated_snapshot()?;
        let mut entries: Vec<Entry> = snapshot.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        Ok(entries)
    }

    /// Upserts an entry by keyword.
    ///
    /// # Contract
    /// - An existing keyword is fully replaced; the index already knows it
    ///   and no other entry is re-scanned (documented asymmetry).
    /// - A new keyword enters the index, and every *other* entry whose
    ///   description contains it gets its cached HTML invalidated.
    ///
    /// # Errors
    /// - Validation failure, lock exhaustion, or seed errors during an
    ///   implicit first hydration.
    pub fn set(&self, entry: Entry) -> StoreResult<()> {
        entry.validate()?;

        self.region.locks().acquire(&LockName::Entry)?;
        let result = self.set_locked(entry);
        self.region.locks().release(&LockName::Entry);
        result
    }

    fn set_locked(&self, entry: Entry) -> StoreResult<()> {
        let snapshot = self.hydrated_snapshot_locked()?;
        let mut entries = snapshot.entries.clone();
        let mut index = snapshot.index.clone();

        let is_new = !entries.contains_key(&entry.keyword);
        if is_new {
            index.add(&entry.keyword);
        }

        let keyword = entry.keyword.clone();
        entries.insert(keyword.clone(), entry);
        self.region.install_snapshot(Snapshot {
            entries,
            index,
            hydrated: true,
        });

        // The entry's own rendering is stale either way.
        self.region.invalidate_html(&keyword);

        if is_new {
            // Other entries mentioning the new keyword may now need a link.
            let snapshot = self.region.snapshot();
            for (other_keyword, other) in &snapshot.entries {
                if other_keyword != &keyword && other.description.contains(keyword.as_str()) {
                    self.region.invalidate_html(other_keyword);
                }
            }
        }

        info!("event=entry_set module=store status=ok keyword={keyword} new={is_new}");
        Ok(())
    }

    /// Removes an entry and its keyword from the index.
    ///
    /// Returns `Ok(false)` as a no-op when the keyword is absent. Cached
    /// HTML of other entries that linked to the removed keyword is left
    /// stale on purpose (documented contract).
    pub fn delete(&self, keyword: &str) -> StoreResult<bool> {
        self.region.locks().acquire(&LockName::Entry)?;
        let result = self.delete_locked(keyword);
        self.region.locks().release(&LockName::Entry);
        result
    }

    fn delete_locked(&self, keyword: &str) -> StoreResult<bool> {
        let snapshot = self.hydrated_snapshot_locked()?;
        if !snapshot.entries.contains_key(keyword) {
            debug!("event=entry_delete module=store status=noop keyword={keyword}");
            return Ok(false);
        }

        let mut entries = snapshot.entries.clone();
        let mut index = snapshot.index.clone();
        entries.remove(keyword);
        index.remove(keyword);
        self.region.install_snapshot(Snapshot {
            entries,
            index,
            hydrated: true,
        });
        self.region.invalidate_html(keyword);

        info!("event=entry_delete module=store status=ok keyword={keyword}");
        Ok(true)
    }

    /// Rebuilds the whole region from the seed source.
    ///
    /// Runs under the "entry" lock so no reader observes a partially
    /// rebuilt index.
    pub fn reinitialize(&self) -> StoreResult<()> {
        self.region.locks().acquire(&LockName::Entry)?;
        let result = self
            .seed
            .load_seed()
            .map(|data| self.region.reset(data))
            .map_err(StoreError::from);
        self.region.locks().release(&LockName::Entry);
        result
    }

    /// Current snapshot, hydrating a cold region first.
    fn hydrated_snapshot(&self) -> StoreResult<Arc<Snapshot>> {
        let snapshot = self.region.snapshot();
        if snapshot.hydrated {
            return Ok(snapshot);
        }

        self.region.locks().acquire(&LockName::Entry)?;
        let result = self.hydrated_snapshot_locked();
        self.region.locks().release(&LockName::Entry);
        result
    }

    /// Hydration step for callers already holding the "entry" lock.
    fn hydrated_snapshot_locked(&self) -> StoreResult<Arc<Snapshot>> {
        let snapshot = self.region.snapshot();
        if snapshot.hydrated {
            // Another worker hydrated while this one waited on the lock.
            return Ok(snapshot);
        }

        let data = self.seed.load_seed()?;
        info!(
            "event=region_hydrate module=store status=ok entries={} users={}",
            data.entries.len(),
            data.users.len()
        );
        self.region.hydrate(data);
        Ok(self.region.snapshot())
    }
}

// src/snapshot.rs
// The published contributor view and the cell it is swapped through.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::{Contributor, CoreContributor, Organisation};

/// One organisation and its classified contributors, already in
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgBucket {
    pub organisation: Organisation,
    pub contributors: Vec<Contributor>,
}

/// The complete aggregated view. Immutable once published; a refresh
/// builds a brand new one and swaps it in wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Core team, sorted by surname key.
    pub core: Vec<CoreContributor>,
    /// Non-core organisation buckets, id descending.
    pub organisations: Vec<OrgBucket>,
    pub unaffiliated: Vec<Contributor>,
    /// None for the bundled fallback data.
    pub refreshed_at: Option<DateTime<Utc>>,
}

static FALLBACK: Lazy<Snapshot> = Lazy::new(|| {
    serde_json::from_str(include_str!("../config/fallback_contributors.json"))
        .expect("bundled fallback contributor data must parse")
});

impl Snapshot {
    /// Compiled-in data served until the first successful refresh.
    pub fn fallback() -> Snapshot {
        FALLBACK.clone()
    }
}

/// Single writer (the refresh task), many readers (HTTP handlers).
/// `publish` replaces the inner `Arc` under one write lock; `current`
/// clones the `Arc` under a read lock, so readers never block on a
/// refresh and never see a half-built snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(initial)),
        }
    }

    pub fn with_fallback() -> Self {
        Self::new(Snapshot::fallback())
    }

    pub fn publish(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().expect("snapshot lock poisoned");
        *guard = Arc::new(snapshot);
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.inner.read().expect("snapshot lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(refreshed_at: Option<DateTime<Utc>>) -> Snapshot {
        Snapshot {
            core: Vec::new(),
            organisations: Vec::new(),
            unaffiliated: Vec::new(),
            refreshed_at,
        }
    }

    #[test]
    fn fallback_data_parses_and_is_marked_unrefreshed() {
        let s = Snapshot::fallback();
        assert!(s.refreshed_at.is_none());
        assert!(!s.core.is_empty());
    }

    #[test]
    fn publish_replaces_wholesale() {
        let store = SnapshotStore::with_fallback();
        let before = store.current();

        let ts = Utc::now();
        store.publish(empty(Some(ts)));
        let after = store.current();

        assert_eq!(after.refreshed_at, Some(ts));
        assert!(after.core.is_empty());
        // The reader that grabbed the old snapshot still holds it intact.
        assert!(before.refreshed_at.is_none());
        assert!(!before.core.is_empty());
    }

    #[test]
    fn readers_share_the_same_published_instance() {
        let store = SnapshotStore::new(empty(None));
        let a = store.current();
        let b = store.current();
        assert!(Arc::ptr_eq(&a, &b));
    }
}

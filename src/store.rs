//! In-memory store for produced downloads
//!
//! Results are kept under random ids until they are evicted by the entry
//! count or the byte budget, least recently downloaded first.

use crate::ops::Artifact;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

struct StoreInner {
    lru: LruCache<String, Artifact>,
    total_bytes: usize,
}

/// Download store with entry count and byte budget limits
pub struct ArtifactStore {
    inner: Mutex<StoreInner>,
    max_bytes: usize,
}

impl ArtifactStore {
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(StoreInner {
                lru: LruCache::new(capacity),
                total_bytes: 0,
            }),
            max_bytes,
        }
    }

    /// Store an artifact and return its download id.
    ///
    /// Returns `None` when the artifact alone exceeds the byte budget.
    pub fn put(&self, artifact: Artifact) -> Option<String> {
        let size = artifact.size();
        if size > self.max_bytes {
            tracing::warn!(
                file = %artifact.file_name,
                size,
                budget = self.max_bytes,
                "artifact larger than store budget, not kept"
            );
            return None;
        }

        let mut inner = self.inner.lock();

        while inner.total_bytes + size > self.max_bytes {
            match inner.lru.pop_lru() {
                Some((_, evicted)) => {
                    inner.total_bytes = inner.total_bytes.saturating_sub(evicted.size());
                }
                None => break,
            }
        }

        let id = loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if !inner.lru.contains(&candidate) {
                break candidate;
            }
        };

        inner.total_bytes += size;
        if let Some((_, evicted)) = inner.lru.push(id.clone(), artifact) {
            inner.total_bytes = inner.total_bytes.saturating_sub(evicted.size());
        }
        Some(id)
    }

    pub fn get(&self, id: &str) -> Option<Artifact> {
        self.inner.lock().lru.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    /// Bytes currently held
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(name: &str, size: usize) -> Artifact {
        Artifact::new(name, vec![0u8; size])
    }

    #[test]
    fn test_store_basic_operations() {
        let store = ArtifactStore::new(10, 1024 * 1024);
        assert!(store.is_empty());

        let id = store.put(artifact("merged.pdf", 3)).unwrap();
        assert_eq!(id.len(), 36);
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 3);

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.file_name, "merged.pdf");
        assert_eq!(stored.content_type, "application/pdf");
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_ids_are_distinct() {
        let store = ArtifactStore::new(10, 1024);
        let a = store.put(artifact("part1.pdf", 1)).unwrap();
        let b = store.put(artifact("part1.pdf", 1)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entry_capacity_eviction_tracks_bytes() {
        let store = ArtifactStore::new(2, 1024);
        let first = store.put(artifact("a.pdf", 10)).unwrap();
        let second = store.put(artifact("b.pdf", 20)).unwrap();
        let third = store.put(artifact("c.pdf", 30)).unwrap();

        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
        assert!(store.get(&third).is_some());
        assert_eq!(store.total_bytes(), 50);
    }

    #[test]
    fn test_byte_budget_eviction() {
        let store = ArtifactStore::new(10, 100);
        let k1 = store.put(artifact("1.pdf", 30)).unwrap();
        let k2 = store.put(artifact("2.pdf", 30)).unwrap();
        let k3 = store.put(artifact("3.pdf", 30)).unwrap();
        assert_eq!(store.total_bytes(), 90);

        // Touch k1 so k2 becomes least recently used
        store.get(&k1);
        let k4 = store.put(artifact("4.pdf", 30)).unwrap();

        assert!(store.get(&k1).is_some());
        assert!(store.get(&k2).is_none());
        assert!(store.get(&k3).is_some());
        assert!(store.get(&k4).is_some());
        assert_eq!(store.total_bytes(), 90);
    }

    #[test]
    fn test_oversized_artifact_rejected() {
        let store = ArtifactStore::new(10, 50);
        assert!(store.put(artifact("huge.zip", 100)).is_none());
        assert!(store.is_empty());
        assert_eq!(store.total_bytes(), 0);
    }
}

//! Cached snapshot of a collection or item

use serde::{Deserialize, Serialize};

/// The latest cache-serialized form of one entity, plus its tombstone flag
///
/// Tombstoning is a logical delete: `cache_data` is kept as it was. An entry
/// tombstoned before anything was ever cached for its key has no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Base64 text of the SDK's cache bytes
    pub cache_data: Option<String>,
    /// Whether the entity is deleted
    pub deleted: bool,
}

impl CacheEntry {
    /// A live or deleted entry with a payload
    pub fn new(cache_data: impl Into<String>, deleted: bool) -> Self {
        Self {
            cache_data: Some(cache_data.into()),
            deleted,
        }
    }

    /// A tombstone for a key that was never cached
    pub fn tombstone() -> Self {
        Self {
            cache_data: None,
            deleted: true,
        }
    }

    /// Mark this entry deleted, keeping whatever payload it had
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Whether the entry is live (not tombstoned)
    pub fn is_live(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_deleted_keeps_payload() {
        let mut entry = CacheEntry::new("Y2FjaGU", false);
        entry.mark_deleted();
        assert!(entry.deleted);
        assert_eq!(entry.cache_data.as_deref(), Some("Y2FjaGU"));
    }

    #[test]
    fn test_tombstone_has_no_payload() {
        let entry = CacheEntry::tombstone();
        assert!(!entry.is_live());
        assert!(entry.cache_data.is_none());
    }
}

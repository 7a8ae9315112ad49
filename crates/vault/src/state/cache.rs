//! Collection and item cache
//!
//! Entries only ever move between live and tombstoned. Nothing here removes a
//! key; purging is left to whoever owns durable storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CacheEntry, CollectionUid, ItemUid};

/// Latest cached snapshot per collection and per item
///
/// Items are grouped by owning collection but managed independently of the
/// collection's own entry; tombstoning a collection leaves its items alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStore {
    collections: BTreeMap<CollectionUid, CacheEntry>,
    items: BTreeMap<CollectionUid, BTreeMap<ItemUid, CacheEntry>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cache entry for a collection
    pub fn collection(&self, col_uid: &CollectionUid) -> Option<&CacheEntry> {
        self.collections.get(col_uid)
    }

    /// Get the cache entry for an item
    pub fn item(&self, col_uid: &CollectionUid, item_uid: &ItemUid) -> Option<&CacheEntry> {
        self.items.get(col_uid).and_then(|items| items.get(item_uid))
    }

    /// All collection entries, tombstones included
    pub fn collections(&self) -> impl Iterator<Item = (&CollectionUid, &CacheEntry)> {
        self.collections.iter()
    }

    /// All item entries of one collection, tombstones included
    pub fn items(&self, col_uid: &CollectionUid) -> impl Iterator<Item = (&ItemUid, &CacheEntry)> {
        self.items.get(col_uid).into_iter().flat_map(|items| items.iter())
    }

    /// Replace a collection's entry in full
    pub fn put_collection(&mut self, col_uid: CollectionUid, entry: CacheEntry) {
        self.collections.insert(col_uid, entry);
    }

    /// Tombstone a collection, keeping its payload
    pub fn tombstone_collection(&mut self, col_uid: CollectionUid) {
        self.collections
            .entry(col_uid)
            .and_modify(CacheEntry::mark_deleted)
            .or_insert_with(CacheEntry::tombstone);
    }

    /// Replace an item's entry in full
    pub fn put_item(&mut self, col_uid: CollectionUid, item_uid: ItemUid, entry: CacheEntry) {
        self.items.entry(col_uid).or_default().insert(item_uid, entry);
    }

    /// Tombstone an item, keeping its payload
    pub fn tombstone_item(&mut self, col_uid: CollectionUid, item_uid: ItemUid) {
        self.items
            .entry(col_uid)
            .or_default()
            .entry(item_uid)
            .and_modify(CacheEntry::mark_deleted)
            .or_insert_with(CacheEntry::tombstone);
    }

    /// Number of collections that are not tombstoned
    pub fn live_collection_count(&self) -> usize {
        self.collections.values().filter(|e| e.is_live()).count()
    }

    /// Number of items in a collection that are not tombstoned
    pub fn live_item_count(&self, col_uid: &CollectionUid) -> usize {
        self.items(col_uid).filter(|(_, e)| e.is_live()).count()
    }
}

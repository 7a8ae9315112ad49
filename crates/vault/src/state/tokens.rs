//! Sync token ledger

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CollectionUid, GlobalToken, SyncToken};

/// High-water marks reached by sync
///
/// Writes always overwrite. The ledger never checks that a token moves
/// forward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncTokenLedger {
    collections: BTreeMap<CollectionUid, SyncToken>,
    #[serde(default)]
    global: GlobalToken,
}

impl SyncTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token reached for one collection's items
    pub fn collection(&self, col_uid: &CollectionUid) -> Option<&SyncToken> {
        self.collections.get(col_uid)
    }

    /// Token reached for the collection list
    pub fn global(&self) -> &GlobalToken {
        &self.global
    }

    pub fn set_collection(&mut self, col_uid: CollectionUid, token: SyncToken) {
        self.collections.insert(col_uid, token);
    }

    pub fn set_global(&mut self, token: Option<SyncToken>) {
        self.global = GlobalToken::from(token);
    }

    /// Number of collections with a recorded token
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }
}

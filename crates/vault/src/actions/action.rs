//! The action vocabulary
//!
//! Every state change in the vault is one of these values. Each carries its
//! full payload, and [`Action::summary`] derives the lightweight indexing key
//! from that same payload, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::error::ErrorRecord;
use crate::models::{CollectionUid, ItemUid, SerializedSession, SettingsPatch, SyncRunId, SyncToken};

/// A named state transition
///
/// Serializes as `{"type": "SET_CACHE_COLLECTION", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Drop the stored session without contacting the server
    ResetKey,
    /// The server accepted a logout
    Logout,
    /// Login succeeded with this saved session
    Login(SerializedSession),

    SetCacheCollection {
        col_uid: CollectionUid,
        cache_data: String,
        deleted: bool,
    },
    UnsetCacheCollection {
        col_uid: CollectionUid,
    },
    /// A collection was pushed to the server and then cached
    CollectionUpload {
        col_uid: CollectionUid,
        cache_data: String,
        deleted: bool,
    },
    SetCacheItem {
        col_uid: CollectionUid,
        item_uid: ItemUid,
        cache_data: String,
        deleted: bool,
    },
    UnsetCacheItem {
        col_uid: CollectionUid,
        item_uid: ItemUid,
    },
    /// An item was pushed to the server and then cached
    ItemUpload {
        col_uid: CollectionUid,
        item_uid: ItemUid,
        cache_data: String,
        deleted: bool,
    },

    SetSyncCollection {
        col_uid: CollectionUid,
        token: SyncToken,
    },
    /// `None` records "no progress yet"
    SetSyncGeneral(Option<SyncToken>),

    /// A sync pass started and is now the tracked one
    #[serde(rename = "PERFORM_SYNC")]
    SyncStarted { run: SyncRunId },
    /// A sync pass finished, with its error if it failed
    #[serde(rename = "PERFORM_SYNC_SETTLED")]
    SyncSettled {
        run: SyncRunId,
        error: Option<ErrorRecord>,
    },

    AppendError(Vec<ErrorRecord>),
    ClearErrors,

    SetSettings(SettingsPatch),
}

/// Identity of the entity an action touches
///
/// Lets consumers route or deduplicate actions without decoding payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub col_uid: CollectionUid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_uid: Option<ItemUid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Action {
    /// Wire name of this action
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ResetKey => "RESET_KEY",
            Action::Logout => "LOGOUT",
            Action::Login(_) => "LOGIN",
            Action::SetCacheCollection { .. } => "SET_CACHE_COLLECTION",
            Action::UnsetCacheCollection { .. } => "UNSET_CACHE_COLLECTION",
            Action::CollectionUpload { .. } => "COLLECTION_UPLOAD",
            Action::SetCacheItem { .. } => "SET_CACHE_ITEM",
            Action::UnsetCacheItem { .. } => "UNSET_CACHE_ITEM",
            Action::ItemUpload { .. } => "ITEM_UPLOAD",
            Action::SetSyncCollection { .. } => "SET_SYNC_COLLECTION",
            Action::SetSyncGeneral(_) => "SET_SYNC_GENERAL",
            Action::SyncStarted { .. } => "PERFORM_SYNC",
            Action::SyncSettled { .. } => "PERFORM_SYNC_SETTLED",
            Action::AppendError(_) => "APPEND_ERROR",
            Action::ClearErrors => "CLEAR_ERRORS",
            Action::SetSettings(_) => "SET_SETTINGS",
        }
    }

    /// Indexing key for actions scoped to a collection or item
    pub fn summary(&self) -> Option<ActionSummary> {
        match self {
            Action::SetCacheCollection {
                col_uid, deleted, ..
            }
            | Action::CollectionUpload {
                col_uid, deleted, ..
            } => Some(ActionSummary {
                col_uid: col_uid.clone(),
                item_uid: None,
                deleted: Some(*deleted),
            }),
            Action::UnsetCacheCollection { col_uid } => Some(ActionSummary {
                col_uid: col_uid.clone(),
                item_uid: None,
                deleted: Some(true),
            }),
            Action::SetCacheItem {
                col_uid,
                item_uid,
                deleted,
                ..
            }
            | Action::ItemUpload {
                col_uid,
                item_uid,
                deleted,
                ..
            } => Some(ActionSummary {
                col_uid: col_uid.clone(),
                item_uid: Some(item_uid.clone()),
                deleted: Some(*deleted),
            }),
            Action::UnsetCacheItem { col_uid, item_uid } => Some(ActionSummary {
                col_uid: col_uid.clone(),
                item_uid: Some(item_uid.clone()),
                deleted: Some(true),
            }),
            Action::SetSyncCollection { col_uid, .. } => Some(ActionSummary {
                col_uid: col_uid.clone(),
                item_uid: None,
                deleted: None,
            }),
            Action::ResetKey
            | Action::Logout
            | Action::Login(_)
            | Action::SetSyncGeneral(_)
            | Action::SyncStarted { .. }
            | Action::SyncSettled { .. }
            | Action::AppendError(_)
            | Action::ClearErrors
            | Action::SetSettings(_) => None,
        }
    }

    /// Whether this action changes the sync run tracker
    pub fn touches_sync_run(&self) -> bool {
        matches!(self, Action::SyncStarted { .. } | Action::SyncSettled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_for_collection_cache() {
        let action = Action::SetCacheCollection {
            col_uid: CollectionUid::new("c1"),
            cache_data: "abc".to_string(),
            deleted: false,
        };
        let summary = action.summary().unwrap();
        assert_eq!(summary.col_uid.as_str(), "c1");
        assert_eq!(summary.item_uid, None);
        assert_eq!(summary.deleted, Some(false));
    }

    #[test]
    fn test_unset_summary_is_deleted() {
        let action = Action::UnsetCacheItem {
            col_uid: CollectionUid::new("c1"),
            item_uid: ItemUid::new("i1"),
        };
        let summary = action.summary().unwrap();
        assert_eq!(summary.item_uid, Some(ItemUid::new("i1")));
        assert_eq!(summary.deleted, Some(true));
    }

    #[test]
    fn test_global_actions_have_no_summary() {
        assert!(Action::ResetKey.summary().is_none());
        assert!(Action::SetSyncGeneral(None).summary().is_none());
        assert!(Action::ClearErrors.summary().is_none());
    }

    #[test]
    fn test_wire_format() {
        let action = Action::SetSyncCollection {
            col_uid: CollectionUid::new("c1"),
            token: SyncToken::new("t1"),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "SET_SYNC_COLLECTION",
                "payload": { "col_uid": "c1", "token": "t1" }
            })
        );
        assert_eq!(action.kind(), "SET_SYNC_COLLECTION");
    }

    #[test]
    fn test_serde_name_matches_kind() {
        let actions = [
            Action::ResetKey,
            Action::SyncStarted { run: SyncRunId(1) },
            Action::SetSyncGeneral(None),
            Action::AppendError(Vec::new()),
        ];
        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], action.kind());
        }
    }

    #[test]
    fn test_summary_omits_absent_fields() {
        let summary = ActionSummary {
            col_uid: CollectionUid::new("c1"),
            item_uid: None,
            deleted: None,
        };
        assert_eq!(serde_json::to_value(&summary).unwrap(), json!({ "col_uid": "c1" }));
    }
}

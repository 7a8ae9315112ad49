//! Vault state and the reducer that applies actions to it
//!
//! [`VaultState::apply`] is the only way state changes. It is synchronous and
//! cannot fail, which is what makes every transition atomic with respect to
//! the others.

mod cache;
mod errors;
mod sync_run;
mod tokens;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::models::{CacheEntry, SerializedSession, Settings};

pub use cache::CacheStore;
pub use errors::ErrorLog;
pub use sync_run::{SyncRunTracker, cooldown_elapsed};
pub use tokens::SyncTokenLedger;

/// Everything the vault tracks
///
/// Snapshots keep the time of the last successful sync run but never a run
/// in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultState {
    #[serde(default)]
    pub session: Option<SerializedSession>,
    #[serde(default)]
    pub cache: CacheStore,
    #[serde(default)]
    pub tokens: SyncTokenLedger,
    #[serde(default)]
    pub sync_run: SyncRunTracker,
    #[serde(default)]
    pub errors: ErrorLog,
    #[serde(default)]
    pub settings: Settings,
}

impl VaultState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is stored
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Whether an automatic sync may start, given the configured cooldown
    pub fn sync_due(&self, cooldown_secs: u64) -> bool {
        !self.sync_run.is_syncing() && self.sync_run.cooldown_elapsed(cooldown_secs)
    }

    /// Apply one action
    pub fn apply(&mut self, action: Action) {
        match action.summary() {
            Some(summary) => debug!("Applying {} {:?}", action.kind(), summary),
            None => debug!("Applying {}", action.kind()),
        }

        match action {
            Action::ResetKey => {
                if self.session.take().is_some() {
                    info!("Session key reset");
                }
            }
            Action::Logout => {
                self.session = None;
            }
            Action::Login(session) => {
                self.session = Some(session);
            }

            Action::SetCacheCollection {
                col_uid,
                cache_data,
                deleted,
            }
            | Action::CollectionUpload {
                col_uid,
                cache_data,
                deleted,
            } => {
                self.cache
                    .put_collection(col_uid, CacheEntry::new(cache_data, deleted));
            }
            Action::UnsetCacheCollection { col_uid } => {
                self.cache.tombstone_collection(col_uid);
            }
            Action::SetCacheItem {
                col_uid,
                item_uid,
                cache_data,
                deleted,
            }
            | Action::ItemUpload {
                col_uid,
                item_uid,
                cache_data,
                deleted,
            } => {
                self.cache
                    .put_item(col_uid, item_uid, CacheEntry::new(cache_data, deleted));
            }
            Action::UnsetCacheItem { col_uid, item_uid } => {
                self.cache.tombstone_item(col_uid, item_uid);
            }

            Action::SetSyncCollection { col_uid, token } => {
                self.tokens.set_collection(col_uid, token);
            }
            Action::SetSyncGeneral(token) => {
                self.tokens.set_global(token);
            }

            Action::SyncStarted { run } => {
                info!("Sync run {} started", run);
                self.sync_run.start(run);
            }
            Action::SyncSettled { run, error } => {
                let failed = error.is_some();
                if !self.sync_run.settle(run, error) {
                    warn!("Ignoring settlement of superseded sync run {}", run);
                } else if failed {
                    info!("Sync run {} rejected", run);
                } else {
                    info!("Sync run {} resolved", run);
                }
            }

            Action::AppendError(records) => {
                self.errors.append(records);
            }
            Action::ClearErrors => {
                self.errors.clear();
            }

            Action::SetSettings(patch) => {
                self.settings.merge(&patch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorRecord, VaultError};
    use crate::models::{CollectionUid, GlobalToken, ItemUid, SettingsPatch, SyncRunId, SyncToken};
    use serde_json::json;

    fn set_collection(uid: &str, data: &str, deleted: bool) -> Action {
        Action::SetCacheCollection {
            col_uid: CollectionUid::new(uid),
            cache_data: data.to_string(),
            deleted,
        }
    }

    #[test]
    fn test_set_cache_then_read() {
        let mut state = VaultState::new();
        state.apply(set_collection("c1", "payload", false));

        let entry = state.cache.collection(&CollectionUid::new("c1")).unwrap();
        assert!(!entry.deleted);
        assert_eq!(entry.cache_data.as_deref(), Some("payload"));
    }

    #[test]
    fn test_set_cache_is_idempotent() {
        let mut state = VaultState::new();
        state.apply(set_collection("c1", "payload", true));
        let once = state.clone();
        state.apply(set_collection("c1", "payload", true));

        assert_eq!(state, once);
    }

    #[test]
    fn test_unset_cache_twice() {
        let mut state = VaultState::new();
        state.apply(set_collection("c1", "payload", false));

        let unset = Action::UnsetCacheCollection {
            col_uid: CollectionUid::new("c1"),
        };
        state.apply(unset.clone());
        let once = state.clone();
        state.apply(unset);

        assert_eq!(state, once);
        let entry = state.cache.collection(&CollectionUid::new("c1")).unwrap();
        assert!(entry.deleted);
        assert_eq!(entry.cache_data.as_deref(), Some("payload"));
    }

    #[test]
    fn test_item_cache_lifecycle() {
        let mut state = VaultState::new();
        let col = CollectionUid::new("c1");
        let item = ItemUid::new("i1");

        state.apply(Action::SetCacheItem {
            col_uid: col.clone(),
            item_uid: item.clone(),
            cache_data: "v1".to_string(),
            deleted: false,
        });
        state.apply(Action::UnsetCacheItem {
            col_uid: col.clone(),
            item_uid: item.clone(),
        });
        assert!(state.cache.item(&col, &item).unwrap().deleted);

        state.apply(Action::ItemUpload {
            col_uid: col.clone(),
            item_uid: item.clone(),
            cache_data: "v2".to_string(),
            deleted: false,
        });
        assert_eq!(state.cache.item(&col, &item), Some(&CacheEntry::new("v2", false)));
    }

    #[test]
    fn test_login_logout_reset() {
        let mut state = VaultState::new();
        state.apply(Action::Login(SerializedSession::new("blob")));
        assert!(state.is_logged_in());

        state.apply(Action::Logout);
        assert!(!state.is_logged_in());

        state.apply(Action::Login(SerializedSession::new("blob")));
        state.apply(Action::ResetKey);
        assert!(!state.is_logged_in());
    }

    #[test]
    fn test_reset_key_without_session() {
        let mut state = VaultState::new();
        state.apply(Action::ResetKey);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_tokens() {
        let mut state = VaultState::new();
        state.apply(Action::SetSyncCollection {
            col_uid: CollectionUid::new("X"),
            token: SyncToken::new("t1"),
        });
        state.apply(Action::SetSyncCollection {
            col_uid: CollectionUid::new("X"),
            token: SyncToken::new("t2"),
        });
        state.apply(Action::SetSyncGeneral(None));

        assert_eq!(
            state.tokens.collection(&CollectionUid::new("X")),
            Some(&SyncToken::new("t2"))
        );
        assert_eq!(state.tokens.global(), &GlobalToken::Null);
    }

    #[test]
    fn test_errors_append_and_clear() {
        let mut state = VaultState::new();
        let e1 = ErrorRecord::from(VaultError::SyncTransport("e1".into()));
        let e2 = ErrorRecord::from(VaultError::Serialization("e2".into()));
        let e3 = ErrorRecord::from(VaultError::Auth("e3".into()));

        state.apply(Action::AppendError(vec![e1.clone(), e2.clone()]));
        state.apply(Action::AppendError(vec![e3.clone()]));
        assert_eq!(state.errors.records(), &[e1, e2, e3]);

        state.apply(Action::ClearErrors);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_settings_merge() {
        let mut state = VaultState::new();
        state.apply(Action::SetSettings(SettingsPatch::new().set("a", 1).set("b", 2)));
        state.apply(Action::SetSettings(SettingsPatch::new().set("b", 3).set("c", 4)));

        assert_eq!(
            serde_json::to_value(&state.settings).unwrap(),
            json!({ "a": 1, "b": 3, "c": 4 })
        );
    }

    #[test]
    fn test_sync_rejection_does_not_touch_error_log() {
        let mut state = VaultState::new();
        state.apply(Action::SyncStarted { run: SyncRunId(1) });
        state.apply(Action::SyncSettled {
            run: SyncRunId(1),
            error: Some(ErrorRecord::from(VaultError::SyncTransport("down".into()))),
        });

        assert!(!state.sync_run.is_syncing());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_snapshot_skips_sync_run() {
        let mut state = VaultState::new();
        state.apply(Action::Login(SerializedSession::new("blob")));
        state.apply(Action::SetSyncGeneral(None));
        state.apply(Action::SyncStarted { run: SyncRunId(1) });

        let json = serde_json::to_string(&state).unwrap();
        let restored: VaultState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.session, state.session);
        assert_eq!(restored.tokens.global(), &GlobalToken::Null);
        assert!(restored.sync_run.current().is_none());
    }

    #[test]
    fn test_snapshot_keeps_cooldown() {
        let mut state = VaultState::new();
        state.apply(Action::SyncStarted { run: SyncRunId(1) });
        state.apply(Action::SyncSettled {
            run: SyncRunId(1),
            error: None,
        });
        assert!(!state.sync_due(60));

        let json = serde_json::to_string(&state).unwrap();
        let restored: VaultState = serde_json::from_str(&json).unwrap();

        assert!(!restored.sync_due(60));
        assert!(restored.sync_due(0));
    }
}

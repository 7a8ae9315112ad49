//! The vault store
//!
//! Owns a [`VaultState`] and applies actions to it one at a time. Async work
//! happens outside the lock: a creator's future is awaited first and only its
//! resulting action is dispatched, so concurrent creators land in the order
//! they finish.

use log::warn;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use crate::actions::{Action, append_error, reset_key};
use crate::config::VaultConfig;
use crate::error::{ErrorRecord, VaultError, VaultResult};
use crate::models::{SyncRun, SyncRunId};
use crate::sdk::{Account, Authenticator};
use crate::state::VaultState;

/// Single owner of vault state
pub struct Store {
    state: RwLock<VaultState>,
    next_run: AtomicU64,
    sync_tx: watch::Sender<Option<SyncRun>>,
}

impl Store {
    /// Create a store with empty state
    pub fn new() -> Self {
        Self::from_state(VaultState::default())
    }

    /// Create a store from a previously saved snapshot
    pub fn from_state(state: VaultState) -> Self {
        let (sync_tx, _) = watch::channel(state.sync_run.current().cloned());
        Self {
            state: RwLock::new(state),
            next_run: AtomicU64::new(0),
            sync_tx,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, VaultState> {
        // apply() cannot panic midway, so a poisoned lock still holds whole state
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, VaultState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read from the current state
    pub fn read<R>(&self, f: impl FnOnce(&VaultState) -> R) -> R {
        f(&self.read_state())
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> VaultState {
        self.read_state().clone()
    }

    /// Apply an action
    pub fn dispatch(&self, action: Action) {
        let touches_sync_run = action.touches_sync_run();
        let mut state = self.write_state();
        state.apply(action);
        if touches_sync_run {
            self.sync_tx.send_replace(state.sync_run.current().cloned());
        }
    }

    /// Await a creator and apply its action
    ///
    /// On failure nothing is applied and the error is returned.
    pub async fn dispatch_async<F>(&self, creator: F) -> VaultResult<()>
    where
        F: Future<Output = VaultResult<Action>>,
    {
        let action = creator.await?;
        self.dispatch(action);
        Ok(())
    }

    /// Await a creator and apply its action, logging a failure instead
    ///
    /// Returns whether the creator succeeded. A failure is appended to the
    /// error log rather than returned.
    pub async fn dispatch_or_record<A, F>(&self, account: &A, creator: F) -> bool
    where
        A: Account + ?Sized,
        F: Future<Output = VaultResult<Action>>,
    {
        match creator.await {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(e) => {
                warn!("Recording failed action: {}", e);
                self.dispatch(append_error(account, e));
                false
            }
        }
    }

    /// Run a sync pass as the tracked sync run
    ///
    /// The run supersedes any run already tracked. Its outcome is recorded on
    /// the tracker and returned; a failure is not added to the error log.
    pub async fn perform_sync<F, T>(&self, sync: F) -> VaultResult<T>
    where
        F: Future<Output = VaultResult<T>>,
    {
        let run = SyncRunId(self.next_run.fetch_add(1, Ordering::SeqCst) + 1);
        self.dispatch(Action::SyncStarted { run });

        let result = sync.await;
        let error = result.as_ref().err().map(ErrorRecord::from);
        self.dispatch(Action::SyncSettled { run, error });
        result
    }

    /// The tracked sync run, if any
    pub fn sync_run(&self) -> Option<SyncRun> {
        self.read(|s| s.sync_run.current().cloned())
    }

    /// Whether the tracked sync run is in progress
    pub fn is_syncing(&self) -> bool {
        self.read(|s| s.sync_run.is_syncing())
    }

    /// Whether an automatic sync should start now
    ///
    /// False while a run is in progress or within `sync_cooldown_secs` of the
    /// last successful run.
    pub fn sync_due(&self, cfg: &VaultConfig) -> bool {
        self.read(|s| s.sync_due(cfg.sync_cooldown_secs))
    }

    /// Watch the tracked sync run
    pub fn subscribe_sync(&self) -> watch::Receiver<Option<SyncRun>> {
        self.sync_tx.subscribe()
    }

    /// Reopen the stored session through the SDK
    ///
    /// Returns `Ok(None)` when logged out. If the SDK cannot decode or no
    /// longer accepts the stored session, the session is reset and the error
    /// returned. Network failures leave the session alone, as does a session
    /// replaced while the restore was in flight.
    pub async fn restore_account<T>(&self, authenticator: &T) -> VaultResult<Option<T::Account>>
    where
        T: Authenticator + ?Sized,
    {
        let Some(session) = self.read(|s| s.session.clone()) else {
            return Ok(None);
        };

        match authenticator.restore(&session).await {
            Ok(account) => Ok(Some(account)),
            Err(e) => {
                let e = VaultError::from(e);
                if matches!(e, VaultError::Auth(_) | VaultError::Serialization(_)) {
                    let mut state = self.write_state();
                    if state.session.as_ref() == Some(&session) {
                        warn!("Stored session unusable, resetting key: {}", e);
                        state.apply(reset_key());
                    } else {
                        warn!("Session changed during restore, keeping it: {}", e);
                    }
                }
                Err(e)
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

//! Sync run tracker
//!
//! A single slot holding the most recent sync pass. Starting a run replaces
//! whatever was there; a replaced run may still settle later, but that
//! settlement is ignored. This is bookkeeping for observers, not a gate: it
//! never stops two passes from running at once.
//!
//! Only the time of the last successful run is persisted, for the cooldown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorRecord;
use crate::models::{SyncRun, SyncRunId, SyncRunStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncRunTracker {
    #[serde(skip)]
    current: Option<SyncRun>,
    /// When the last tracked run resolved successfully
    #[serde(default)]
    last_resolved_at: Option<DateTime<Utc>>,
}

impl SyncRunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked run, if any
    pub fn current(&self) -> Option<&SyncRun> {
        self.current.as_ref()
    }

    /// Whether the tracked run is still in progress
    pub fn is_syncing(&self) -> bool {
        self.current.as_ref().is_some_and(SyncRun::is_pending)
    }

    pub fn last_resolved_at(&self) -> Option<DateTime<Utc>> {
        self.last_resolved_at
    }

    /// Track a newly started run, dropping the previous one
    pub fn start(&mut self, run: SyncRunId) {
        self.current = Some(SyncRun::pending(run));
    }

    /// Record how a run ended
    ///
    /// Returns `false` without changing anything if `run` is not the tracked
    /// run or has already settled.
    pub fn settle(&mut self, run: SyncRunId, error: Option<ErrorRecord>) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.id != run || !current.is_pending() {
            return false;
        }

        let now = Utc::now();
        current.finished_at = Some(now);
        current.status = match error {
            Some(record) => SyncRunStatus::Rejected(record),
            None => {
                self.last_resolved_at = Some(now);
                SyncRunStatus::Resolved
            }
        };
        true
    }

    /// Whether `cooldown_secs` have passed since the last successful run
    pub fn cooldown_elapsed(&self, cooldown_secs: u64) -> bool {
        cooldown_elapsed(self.last_resolved_at, cooldown_secs, Utc::now())
    }
}

/// Whether `cooldown_secs` separate `last_resolved_at` from `now`
///
/// With no successful run on record the cooldown is always over.
pub fn cooldown_elapsed(
    last_resolved_at: Option<DateTime<Utc>>,
    cooldown_secs: u64,
    now: DateTime<Utc>,
) -> bool {
    let Some(last) = last_resolved_at else {
        return true;
    };
    let cooldown = i64::try_from(cooldown_secs).unwrap_or(i64::MAX);
    (now - last).num_seconds() >= cooldown
}

//! Sync run bookkeeping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ErrorRecord;

/// Identifier for one sync pass, unique within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyncRunId(pub u64);

impl fmt::Display for SyncRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a sync pass ended, or that it hasn't yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum SyncRunStatus {
    Pending,
    Resolved,
    Rejected(ErrorRecord),
}

/// The tracked sync pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRun {
    pub id: SyncRunId,
    pub started_at: DateTime<Utc>,
    pub status: SyncRunStatus,
    /// Set once the run settles
    pub finished_at: Option<DateTime<Utc>>,
}

impl SyncRun {
    /// A run that has just started
    pub fn pending(id: SyncRunId) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            status: SyncRunStatus::Pending,
            finished_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, SyncRunStatus::Pending)
    }
}

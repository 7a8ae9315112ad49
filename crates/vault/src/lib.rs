//! Vault crate - sync and local-cache state for encrypted collections
//!
//! This crate provides the client-side state model of an encrypted-collection
//! sync client:
//! - Domain models (collection/item ids, cache entries, sync tokens, settings)
//! - The action vocabulary and the creators that produce actions
//! - A reducer-style state with cache, token ledger, sync run tracker and error log
//! - A store that applies actions one at a time
//! - SDK traits for authentication, caching and upload, plus an in-memory SDK
//!
//! Encryption, network transport and durable storage belong to the SDK and
//! the host application.

pub mod actions;
pub mod config;
pub mod error;
pub mod models;
pub mod sdk;
pub mod state;
mod store;

pub use actions::{Action, ActionSummary};
pub use config::VaultConfig;
pub use error::{ErrorBatch, ErrorKind, ErrorRecord, VaultError, VaultResult};
pub use models::{
    CacheEntry, CollectionUid, GlobalToken, ItemUid, SerializedSession, Settings, SettingsPatch,
    SyncRun, SyncRunId, SyncRunStatus, SyncToken,
};
pub use sdk::{
    Account, Authenticator, CollectionManager, Entity, ItemManager, SdkError, SdkResult,
};
pub use state::{CacheStore, ErrorLog, SyncRunTracker, SyncTokenLedger, VaultState};
pub use store::Store;

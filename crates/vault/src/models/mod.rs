//! Domain models for vault entities

mod cache_entry;
mod ids;
mod session;
mod settings;
mod sync_run;
mod sync_token;

pub use cache_entry::CacheEntry;
pub use ids::{CollectionUid, ItemUid};
pub use session::SerializedSession;
pub use settings::{Settings, SettingsPatch};
pub use sync_run::{SyncRun, SyncRunId, SyncRunStatus};
pub use sync_token::{GlobalToken, SyncToken};

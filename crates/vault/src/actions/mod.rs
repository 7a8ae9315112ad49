//! Vault actions
//!
//! The [`Action`] vocabulary plus the creators that build actions, calling
//! into the SDK where a transition depends on it.

mod action;
mod creators;

pub use action::{Action, ActionSummary};
pub use creators::{
    append_error, clear_errors, collection_upload, item_upload, login, logout, reset_key,
    set_cache_collection, set_cache_item, set_settings, set_sync_collection, set_sync_general,
    unset_cache_collection, unset_cache_item,
};

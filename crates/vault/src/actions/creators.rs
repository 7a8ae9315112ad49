//! Action creators
//!
//! Creators that need the SDK are async and return the action only once the
//! SDK call has settled. A failed call returns the error and produces no
//! action, so the state is never touched by a half-finished operation.
//! Account and manager handles are always passed in explicitly.
//!
//! Only the upload creators reach the network. The cache creators may still
//! wait on SDK serialization work.

use log::{info, warn};

use crate::error::{ErrorBatch, VaultError, VaultResult};
use crate::models::{CollectionUid, ItemUid, SerializedSession, SettingsPatch, SyncToken};
use crate::sdk::{
    Account, Authenticator, CollectionManager, Entity, ItemManager, SdkError, to_base64,
};

use super::Action;

/// Forget the stored session without contacting the server
///
/// For when the local credential is known to be unusable.
pub fn reset_key() -> Action {
    Action::ResetKey
}

/// Log out on the server, then clear the stored session
///
/// If the server call fails the error is returned and the session stays in
/// place, so the logout can be retried.
pub async fn logout<A: Account + ?Sized>(account: &A) -> VaultResult<Action> {
    account.logout().await.map_err(|e| {
        warn!("Logout failed, keeping session: {}", e);
        VaultError::from(e)
    })?;
    info!("Logged out");
    Ok(Action::Logout)
}

/// Authenticate and capture the saved session
pub async fn login<T: Authenticator + ?Sized>(
    authenticator: &T,
    username: &str,
    password: &str,
    server: Option<&str>,
) -> VaultResult<Action> {
    let account = authenticator.login(username, password, server).await?;
    let saved = account.save().await.map_err(serialization)?;
    info!("Logged in as {}", username);
    Ok(Action::Login(SerializedSession::new(saved)))
}

/// Cache the current state of a collection
pub async fn set_cache_collection<M: CollectionManager + ?Sized>(
    manager: &M,
    collection: &M::Collection,
) -> VaultResult<Action> {
    let cache_data = cache_collection(manager, collection).await?;
    Ok(Action::SetCacheCollection {
        col_uid: CollectionUid::new(collection.uid()),
        cache_data,
        deleted: collection.is_deleted(),
    })
}

/// Tombstone a cached collection
pub fn unset_cache_collection<M: CollectionManager + ?Sized>(
    _manager: &M,
    col_uid: impl Into<CollectionUid>,
) -> Action {
    Action::UnsetCacheCollection {
        col_uid: col_uid.into(),
    }
}

/// Push a collection to the server, then cache it
///
/// Nothing is cached unless the push succeeds.
pub async fn collection_upload<M: CollectionManager + ?Sized>(
    manager: &M,
    collection: &M::Collection,
) -> VaultResult<Action> {
    manager.upload(collection).await?;
    let cache_data = cache_collection(manager, collection).await?;
    Ok(Action::CollectionUpload {
        col_uid: CollectionUid::new(collection.uid()),
        cache_data,
        deleted: collection.is_deleted(),
    })
}

/// Cache the current state of an item in `col_uid`
pub async fn set_cache_item<M: ItemManager + ?Sized>(
    col_uid: impl Into<CollectionUid>,
    manager: &M,
    item: &M::Item,
) -> VaultResult<Action> {
    let cache_data = cache_item(manager, item).await?;
    Ok(Action::SetCacheItem {
        col_uid: col_uid.into(),
        item_uid: ItemUid::new(item.uid()),
        cache_data,
        deleted: item.is_deleted(),
    })
}

/// Tombstone a cached item
pub fn unset_cache_item<M: ItemManager + ?Sized>(
    col_uid: impl Into<CollectionUid>,
    _manager: &M,
    item_uid: impl Into<ItemUid>,
) -> Action {
    Action::UnsetCacheItem {
        col_uid: col_uid.into(),
        item_uid: item_uid.into(),
    }
}

/// Push an item to the server, then cache it
pub async fn item_upload<M: ItemManager + ?Sized>(
    col_uid: impl Into<CollectionUid>,
    manager: &M,
    item: &M::Item,
) -> VaultResult<Action> {
    manager.upload(item).await?;
    let cache_data = cache_item(manager, item).await?;
    Ok(Action::ItemUpload {
        col_uid: col_uid.into(),
        item_uid: ItemUid::new(item.uid()),
        cache_data,
        deleted: item.is_deleted(),
    })
}

/// Record the sync token reached for one collection
pub fn set_sync_collection(col_uid: impl Into<CollectionUid>, token: impl Into<SyncToken>) -> Action {
    Action::SetSyncCollection {
        col_uid: col_uid.into(),
        token: token.into(),
    }
}

/// Record the collection-list sync token, or `None` for no progress
pub fn set_sync_general(token: Option<SyncToken>) -> Action {
    Action::SetSyncGeneral(token)
}

/// Append one or more errors to the log
pub fn append_error<A: Account + ?Sized>(_account: &A, errors: impl Into<ErrorBatch>) -> Action {
    Action::AppendError(errors.into().into_records())
}

/// Empty the error log
///
/// The account is accepted for scoping but every error is cleared.
pub fn clear_errors<A: Account + ?Sized>(_account: &A) -> Action {
    Action::ClearErrors
}

/// Merge a partial settings update
pub fn set_settings(patch: SettingsPatch) -> Action {
    Action::SetSettings(patch)
}

async fn cache_collection<M: CollectionManager + ?Sized>(
    manager: &M,
    collection: &M::Collection,
) -> VaultResult<String> {
    let bytes = manager.cache_save(collection).await.map_err(serialization)?;
    Ok(to_base64(&bytes))
}

async fn cache_item<M: ItemManager + ?Sized>(manager: &M, item: &M::Item) -> VaultResult<String> {
    let bytes = manager.cache_save(item).await.map_err(serialization)?;
    Ok(to_base64(&bytes))
}

/// Any failure while producing a cache representation is a serialization error
fn serialization(e: SdkError) -> VaultError {
    match e {
        SdkError::Encoding(msg) => VaultError::Serialization(msg),
        other => VaultError::Serialization(other.to_string()),
    }
}

//! In-memory SDK implementation
//!
//! Backs the SDK traits with plain maps instead of a remote service. Used by
//! tests and as a stub backend. Cache payloads are the JSON form of the
//! entity, and saved sessions are base64-wrapped JSON, so both decode the
//! same way a real SDK's output would be handled by the vault.
//!
//! Failures can be injected with [`MemoryServer::set_offline`] and
//! [`MemoryServer::set_encoding_broken`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::{
    Account, Authenticator, CollectionManager, Entity, ItemManager, SdkError, SdkResult,
    from_base64, to_base64,
};
use crate::models::SerializedSession;

#[derive(Default)]
struct ServerInner {
    /// username -> password
    users: RwLock<HashMap<String, String>>,
    collections: RwLock<HashMap<String, MemoryCollection>>,
    /// (collection uid, item uid) -> item
    items: RwLock<HashMap<(String, String), MemoryItem>>,
    offline: AtomicBool,
    encoding_broken: AtomicBool,
    logouts: AtomicUsize,
}

/// A fake remote service holding users and uploaded entities
///
/// Cloning shares the same underlying state.
#[derive(Clone, Default)]
pub struct MemoryServer {
    inner: Arc<ServerInner>,
}

impl MemoryServer {
    /// Create an empty server with no users
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user that can log in
    pub fn add_user(&self, username: impl Into<String>, password: impl Into<String>) {
        let mut users = self.inner.users.write().unwrap();
        users.insert(username.into(), password.into());
    }

    /// Make every network call fail until switched back
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Make every `cache_save` fail until switched back
    pub fn set_encoding_broken(&self, broken: bool) {
        self.inner.encoding_broken.store(broken, Ordering::SeqCst);
    }

    /// Number of successful logouts
    pub fn logout_count(&self) -> usize {
        self.inner.logouts.load(Ordering::SeqCst)
    }

    /// The last uploaded version of a collection
    pub fn uploaded_collection(&self, uid: &str) -> Option<MemoryCollection> {
        let collections = self.inner.collections.read().unwrap();
        collections.get(uid).cloned()
    }

    /// The last uploaded version of an item
    pub fn uploaded_item(&self, collection_uid: &str, item_uid: &str) -> Option<MemoryItem> {
        let items = self.inner.items.read().unwrap();
        items
            .get(&(collection_uid.to_string(), item_uid.to_string()))
            .cloned()
    }

    fn check_online(&self) -> SdkResult<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(SdkError::Network("server unreachable".to_string()));
        }
        Ok(())
    }

    fn encode<T: Serialize>(&self, value: &T) -> SdkResult<Vec<u8>> {
        if self.inner.encoding_broken.load(Ordering::SeqCst) {
            return Err(SdkError::Encoding("cache encoder unavailable".to_string()));
        }
        serde_json::to_vec(value).map_err(|e| SdkError::Encoding(e.to_string()))
    }

    fn account_for(&self, username: &str, server: Option<&str>) -> MemoryAccount {
        MemoryAccount {
            server: self.clone(),
            saved: SavedAccount {
                username: username.to_string(),
                server: server.map(str::to_string),
            },
        }
    }
}

#[async_trait]
impl Authenticator for MemoryServer {
    type Account = MemoryAccount;

    async fn login(
        &self,
        username: &str,
        password: &str,
        server: Option<&str>,
    ) -> SdkResult<MemoryAccount> {
        self.check_online()?;
        let users = self.inner.users.read().unwrap();
        match users.get(username) {
            Some(expected) if expected == password => Ok(self.account_for(username, server)),
            _ => Err(SdkError::Unauthorized(format!(
                "invalid credentials for {}",
                username
            ))),
        }
    }

    async fn restore(&self, session: &SerializedSession) -> SdkResult<MemoryAccount> {
        self.check_online()?;
        let bytes = from_base64(session.as_str())?;
        let saved: SavedAccount =
            serde_json::from_slice(&bytes).map_err(|e| SdkError::Encoding(e.to_string()))?;
        let known = self.inner.users.read().unwrap().contains_key(&saved.username);
        if !known {
            return Err(SdkError::Unauthorized(format!(
                "unknown user {}",
                saved.username
            )));
        }
        Ok(self.account_for(&saved.username, saved.server.as_deref()))
    }
}

/// Saved form of a [`MemoryAccount`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SavedAccount {
    username: String,
    server: Option<String>,
}

/// An account logged in to a [`MemoryServer`]
#[derive(Clone)]
pub struct MemoryAccount {
    server: MemoryServer,
    saved: SavedAccount,
}

impl MemoryAccount {
    pub fn username(&self) -> &str {
        &self.saved.username
    }

    /// The server URL given at login, if any
    pub fn server_url(&self) -> Option<&str> {
        self.saved.server.as_deref()
    }

    /// Collection operations for this account
    pub fn collection_manager(&self) -> MemoryCollectionManager {
        MemoryCollectionManager {
            server: self.server.clone(),
        }
    }
}

#[async_trait]
impl Account for MemoryAccount {
    async fn save(&self) -> SdkResult<String> {
        let json = serde_json::to_vec(&self.saved).map_err(|e| SdkError::Encoding(e.to_string()))?;
        Ok(to_base64(&json))
    }

    async fn logout(&self) -> SdkResult<()> {
        self.server.check_online()?;
        self.server.inner.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A collection as the in-memory SDK sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCollection {
    pub uid: String,
    pub content: String,
    pub deleted: bool,
}

impl MemoryCollection {
    pub fn new(uid: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            content: content.into(),
            deleted: false,
        }
    }

    /// Mark the collection deleted
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }
}

impl Entity for MemoryCollection {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// An item as the in-memory SDK sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub uid: String,
    pub content: String,
    pub deleted: bool,
}

impl MemoryItem {
    pub fn new(uid: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            content: content.into(),
            deleted: false,
        }
    }

    /// Mark the item deleted
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }
}

impl Entity for MemoryItem {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// Collection manager backed by a [`MemoryServer`]
#[derive(Clone)]
pub struct MemoryCollectionManager {
    server: MemoryServer,
}

impl MemoryCollectionManager {
    /// Item operations within `collection`
    pub fn item_manager(&self, collection: &MemoryCollection) -> MemoryItemManager {
        MemoryItemManager {
            server: self.server.clone(),
            collection_uid: collection.uid.clone(),
        }
    }
}

#[async_trait]
impl CollectionManager for MemoryCollectionManager {
    type Collection = MemoryCollection;

    async fn cache_save(&self, collection: &MemoryCollection) -> SdkResult<Vec<u8>> {
        self.server.encode(collection)
    }

    async fn upload(&self, collection: &MemoryCollection) -> SdkResult<()> {
        self.server.check_online()?;
        let mut collections = self.server.inner.collections.write().unwrap();
        collections.insert(collection.uid.clone(), collection.clone());
        Ok(())
    }
}

/// Item manager for one collection, backed by a [`MemoryServer`]
#[derive(Clone)]
pub struct MemoryItemManager {
    server: MemoryServer,
    collection_uid: String,
}

#[async_trait]
impl ItemManager for MemoryItemManager {
    type Item = MemoryItem;

    async fn cache_save(&self, item: &MemoryItem) -> SdkResult<Vec<u8>> {
        self.server.encode(item)
    }

    async fn upload(&self, item: &MemoryItem) -> SdkResult<()> {
        self.server.check_online()?;
        let mut items = self.server.inner.items.write().unwrap();
        items.insert((self.collection_uid.clone(), item.uid.clone()), item.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_with_user() -> MemoryServer {
        let server = MemoryServer::new();
        server.add_user("alice", "hunter2");
        server
    }

    #[tokio::test]
    async fn test_login_and_restore() {
        let server = server_with_user();
        let account = server
            .login("alice", "hunter2", Some("https://vault.example.com"))
            .await
            .unwrap();
        let saved = SerializedSession::new(account.save().await.unwrap());

        let restored = server.restore(&saved).await.unwrap();
        assert_eq!(restored.username(), "alice");
        assert_eq!(restored.server_url(), Some("https://vault.example.com"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let server = server_with_user();
        let err = server.login("alice", "wrong", None).await.err().unwrap();
        assert!(matches!(err, SdkError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_restore_garbage_session() {
        let server = server_with_user();
        let err = server
            .restore(&SerializedSession::new("%%%"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SdkError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_offline_upload_stores_nothing() {
        let server = server_with_user();
        let account = server.login("alice", "hunter2", None).await.unwrap();
        let manager = account.collection_manager();

        server.set_offline(true);
        let err = manager
            .upload(&MemoryCollection::new("c1", "calendar"))
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Network(_)));
        assert!(server.uploaded_collection("c1").is_none());
    }

    #[tokio::test]
    async fn test_item_upload_is_scoped_to_collection() {
        let server = server_with_user();
        let account = server.login("alice", "hunter2", None).await.unwrap();
        let collection = MemoryCollection::new("c1", "calendar");
        let items = account.collection_manager().item_manager(&collection);

        items.upload(&MemoryItem::new("i1", "event")).await.unwrap();

        assert!(server.uploaded_item("c1", "i1").is_some());
        assert!(server.uploaded_item("c2", "i1").is_none());
    }
}

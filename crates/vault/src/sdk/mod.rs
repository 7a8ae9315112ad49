//! Interfaces consumed from the encrypted-collection SDK
//!
//! The vault never encrypts, decrypts or talks to the network itself. Every
//! such step goes through these traits, so any SDK binding (or the in-memory
//! one in [`memory`]) can drive the same action creators.

mod codec;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::SerializedSession;

pub use codec::{from_base64, to_base64};

/// Result type for SDK calls
pub type SdkResult<T> = Result<T, SdkError>;

/// Failures reported by the SDK
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// The service rejected the credentials or session
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The service could not be reached or the request failed in transit
    #[error("network: {0}")]
    Network(String),

    /// Encoding or decoding an encrypted payload failed
    #[error("encoding: {0}")]
    Encoding(String),
}

/// Anything the vault caches: a collection or an item
pub trait Entity: Send + Sync {
    /// Stable identifier assigned by the service
    fn uid(&self) -> &str;

    /// Whether the entity has been deleted
    fn is_deleted(&self) -> bool;
}

/// An authenticated account handle
#[async_trait]
pub trait Account: Send + Sync {
    /// Serialize the account so it can be reopened later
    async fn save(&self) -> SdkResult<String>;

    /// Invalidate the session on the server
    async fn logout(&self) -> SdkResult<()>;
}

/// Entry point for obtaining accounts
#[async_trait]
pub trait Authenticator: Send + Sync {
    type Account: Account;

    /// Log in with a username and password, optionally against a custom server
    async fn login(
        &self,
        username: &str,
        password: &str,
        server: Option<&str>,
    ) -> SdkResult<Self::Account>;

    /// Reopen an account from its saved form
    async fn restore(&self, session: &SerializedSession) -> SdkResult<Self::Account>;
}

/// Collection operations for one account
#[async_trait]
pub trait CollectionManager: Send + Sync {
    type Collection: Entity;

    /// Produce the cache representation of a collection
    async fn cache_save(&self, collection: &Self::Collection) -> SdkResult<Vec<u8>>;

    /// Push a collection to the server
    async fn upload(&self, collection: &Self::Collection) -> SdkResult<()>;
}

/// Item operations within one collection
#[async_trait]
pub trait ItemManager: Send + Sync {
    type Item: Entity;

    /// Produce the cache representation of an item
    async fn cache_save(&self, item: &Self::Item) -> SdkResult<Vec<u8>>;

    /// Push an item to the server
    async fn upload(&self, item: &Self::Item) -> SdkResult<()>;
}

//! Error types for vault transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sdk::SdkError;

/// Result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Failures surfaced by asynchronous action creators
///
/// Local transitions (tombstones, tokens, settings, error log) cannot fail;
/// only creators that call into the SDK return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Credentials were rejected, or a stored session could not be opened
    #[error("authentication error: {0}")]
    Auth(String),

    /// Network failure talking to the remote service
    #[error("sync transport error: {0}")]
    SyncTransport(String),

    /// The SDK failed to produce or decode a cache representation
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VaultError {
    /// The category of this error, as recorded in the error log
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Auth(_) => ErrorKind::Auth,
            VaultError::SyncTransport(_) => ErrorKind::SyncTransport,
            VaultError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl From<SdkError> for VaultError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Unauthorized(msg) => VaultError::Auth(msg),
            SdkError::Network(msg) => VaultError::SyncTransport(msg),
            SdkError::Encoding(msg) => VaultError::Serialization(msg),
        }
    }
}

/// Error category, kept alongside the message in [`ErrorRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    SyncTransport,
    Serialization,
}

/// A logged error, in the shape that survives a state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&VaultError> for ErrorRecord {
    fn from(e: &VaultError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
            recorded_at: Utc::now(),
        }
    }
}

impl From<VaultError> for ErrorRecord {
    fn from(e: VaultError) -> Self {
        Self::from(&e)
    }
}

/// One or more errors headed for the error log, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBatch(Vec<ErrorRecord>);

impl ErrorBatch {
    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<VaultError> for ErrorBatch {
    fn from(e: VaultError) -> Self {
        Self(vec![e.into()])
    }
}

impl From<&VaultError> for ErrorBatch {
    fn from(e: &VaultError) -> Self {
        Self(vec![e.into()])
    }
}

impl From<Vec<VaultError>> for ErrorBatch {
    fn from(errors: Vec<VaultError>) -> Self {
        Self(errors.into_iter().map(ErrorRecord::from).collect())
    }
}

impl From<ErrorRecord> for ErrorBatch {
    fn from(record: ErrorRecord) -> Self {
        Self(vec![record])
    }
}

impl From<Vec<ErrorRecord>> for ErrorBatch {
    fn from(records: Vec<ErrorRecord>) -> Self {
        Self(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_becomes_one_element_batch() {
        let batch = ErrorBatch::from(VaultError::Auth("expired".into()));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_batch_preserves_order() {
        let batch = ErrorBatch::from(vec![
            VaultError::SyncTransport("first".into()),
            VaultError::Serialization("second".into()),
        ]);
        let messages: Vec<_> = batch
            .into_records()
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(
            messages,
            vec!["sync transport error: first", "serialization error: second"]
        );
    }

    #[test]
    fn test_sdk_error_mapping() {
        assert_eq!(
            VaultError::from(SdkError::Unauthorized("bad password".into())),
            VaultError::Auth("bad password".into())
        );
        assert_eq!(
            VaultError::from(SdkError::Network("timeout".into())),
            VaultError::SyncTransport("timeout".into())
        );
        assert_eq!(
            VaultError::from(SdkError::Encoding("truncated".into())),
            VaultError::Serialization("truncated".into())
        );
    }

    #[test]
    fn test_record_keeps_kind_and_message() {
        let record = ErrorRecord::from(VaultError::SyncTransport("connection reset".into()));
        assert_eq!(record.kind, ErrorKind::SyncTransport);
        assert_eq!(record.message, "sync transport error: connection reset");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::SyncTransport).unwrap();
        assert_eq!(json, "\"sync_transport\"");
    }
}

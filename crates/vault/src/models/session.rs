//! Serialized account session

use serde::{Deserialize, Serialize};
use std::fmt;

/// The saved form of an authenticated account
///
/// Produced by the SDK after a successful login and handed back to it to
/// reopen the account later. The contents are an opaque credential blob, so
/// `Debug` never prints them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedSession(String);

impl SerializedSession {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SerializedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializedSession(<{} bytes redacted>)", self.0.len())
    }
}

//! Identifiers for collections and items
//!
//! Both are assigned by the remote service and stable for the life of the
//! entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionUid(pub String);

impl CollectionUid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CollectionUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CollectionUid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an item within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemUid(pub String);

impl ItemUid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemUid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

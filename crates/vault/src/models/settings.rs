//! User preference overlay

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Setting name to value mapping
///
/// Only ever updated through [`Settings::merge`], so a partial update can
/// never drop keys it doesn't mention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow-merge a patch, key by key
    pub fn merge(&mut self, patch: &SettingsPatch) {
        for (key, value) in &patch.0 {
            if let Some(value) = value {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A partial settings update
///
/// A key mapped to `None` is carried but left untouched by the merge; it is
/// not a delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsPatch(BTreeMap<String, Option<Value>>);

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    /// Mention `key` without changing it
    pub fn skip(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

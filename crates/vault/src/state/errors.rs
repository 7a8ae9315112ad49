//! Error log

use serde::{Deserialize, Serialize};

use crate::error::ErrorRecord;

/// Errors collected during sync, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog(Vec<ErrorRecord>);

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = ErrorRecord>) {
        self.0.extend(records);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

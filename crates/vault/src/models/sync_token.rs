//! Sync progress tokens

use serde::{Deserialize, Serialize};

/// Opaque progress token issued by the remote service
///
/// Tokens are compared by nothing but equality; ordering is the protocol's
/// business. An empty string is still a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncToken(String);

impl SyncToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SyncToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SyncToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The token for enumerating newly visible collections
///
/// `NeverSet` is the initial state. `Null` means a caller explicitly recorded
/// "no progress yet", which a fresh vault has not done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "token", rename_all = "snake_case")]
pub enum GlobalToken {
    #[default]
    NeverSet,
    Null,
    Token(SyncToken),
}

impl GlobalToken {
    /// The token, if one is present
    pub fn token(&self) -> Option<&SyncToken> {
        match self {
            GlobalToken::Token(t) => Some(t),
            GlobalToken::NeverSet | GlobalToken::Null => None,
        }
    }

    /// Whether any value, including null, was ever written
    pub fn is_written(&self) -> bool {
        !matches!(self, GlobalToken::NeverSet)
    }
}

impl From<Option<SyncToken>> for GlobalToken {
    fn from(token: Option<SyncToken>) -> Self {
        match token {
            Some(t) => GlobalToken::Token(t),
            None => GlobalToken::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_not_never_set() {
        let written = GlobalToken::from(None);
        assert_eq!(written, GlobalToken::Null);
        assert!(written.is_written());
        assert!(!GlobalToken::default().is_written());
        assert!(written.token().is_none());
    }

    #[test]
    fn test_empty_token_is_a_token() {
        let token = GlobalToken::from(Some(SyncToken::new("")));
        assert_eq!(token.token().map(SyncToken::as_str), Some(""));
    }

    #[test]
    fn test_serialization_keeps_states_apart() {
        for token in [
            GlobalToken::NeverSet,
            GlobalToken::Null,
            GlobalToken::Token(SyncToken::new("")),
        ] {
            let json = serde_json::to_string(&token).unwrap();
            let back: GlobalToken = serde_json::from_str(&json).unwrap();
            assert_eq!(back, token);
        }
    }
}

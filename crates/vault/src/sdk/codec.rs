//! Byte/text codec for cache payloads
//!
//! Cache bytes are stored as URL-safe base64 without padding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::{SdkError, SdkResult};

/// Encode cache bytes as text
pub fn to_base64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode text produced by [`to_base64`]
pub fn from_base64(text: &str) -> SdkResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| SdkError::Encoding(format!("invalid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_without_padding() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        assert_eq!(to_base64(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = from_base64("not base64!").unwrap_err();
        assert!(matches!(err, SdkError::Encoding(_)));
    }

    #[test]
    fn test_decode_round_trip() {
        let text = to_base64(b"collection cache");
        assert_eq!(from_base64(&text).unwrap(), b"collection cache");
    }
}

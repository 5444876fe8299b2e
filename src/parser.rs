//! JSON decoding for FIDS feed bodies.

use serde_json::Value;

use crate::error::FeedError;

/// Decodes a raw feed body into a JSON value.
///
/// No shape checks happen here; the normalizer validates the payload layout.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the bytes are not valid JSON.
pub fn parse_payload(bytes: &[u8]) -> Result<Value, FeedError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_bytes_fails() {
        let result = parse_payload(&[]);
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_payload(b"{\"Items\": [");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let parsed = parse_payload(br#"{"Zulu": [1], "Alpha": [2]}"#).unwrap();
        let first_key = parsed.as_object().unwrap().keys().next().unwrap();
        assert_eq!(first_key, "Zulu");
    }
}

//! Base64 encoding for secret fields and embedded ignition payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{PatchError, Result};

/// Encode UTF-8 text with the standard, padded base64 alphabet
pub fn encode(plaintext: &str) -> String {
    STANDARD.encode(plaintext.as_bytes())
}

/// Encode raw bytes, rejecting input that is not UTF-8
pub fn encode_bytes(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| PatchError::encoding(e.to_string()).with_source(e))?;
    Ok(encode(text))
}

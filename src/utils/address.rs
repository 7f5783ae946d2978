//! Account address helpers: base58 encoding of raw 32-byte keys and the
//! short form used in alerts.

use thiserror::Error;

/// Length of a raw account key.
pub const ADDRESS_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Encode a raw 32-byte account key as a base58 address string.
pub fn decode_address(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.len() != ADDRESS_LEN {
        return Err(CodecError::InvalidLength {
            expected: ADDRESS_LEN,
            actual: bytes.len(),
        });
    }
    Ok(bs58::encode(bytes).into_string())
}

/// `ABCD...WXYZ` for long addresses, unchanged for short ones.
pub fn shorten(addr: Option<&str>) -> String {
    let Some(addr) = addr else {
        return "Unknown".to_string();
    };

    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 10 {
        return addr.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

use alloy_primitives::B256;
use hex::{decode, encode, FromHexError};

/// Strips a single, lowercase `0x` prefix if present.
pub fn strip_hex_prefix(hex_string: &str) -> &str {
    hex_string.strip_prefix("0x").unwrap_or(hex_string)
}

pub fn hex_decode(hex_string: &str) -> Result<Vec<u8>, FromHexError> {
    decode(strip_hex_prefix(hex_string))
}

/// Lowercase hex without a prefix.
pub fn hex_encode<T: AsRef<[u8]>>(data: T) -> String {
    encode(data)
}

/// Copies the raw bytes of `s` into a 32 byte word: left aligned, truncated
/// after 32 bytes and zero padded on the right.
pub fn string_to_bytes32(s: &str) -> B256 {
    let mut word = B256::ZERO;
    let bytes = s.as_bytes();
    let len = bytes.len().min(word.len());
    word[..len].copy_from_slice(&bytes[..len]);
    word
}

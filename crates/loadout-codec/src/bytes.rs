//! Text-to-bytes stage: base64 build string decoding.
//!
//! Build strings use the standard 64-symbol alphabet but are frequently
//! shared with their trailing `=` padding stripped, so padding is restored
//! before decoding. Characters outside the alphabet are a hard failure;
//! silently dropping them would shift every subsequent bit.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use loadout_core::{Error, Result};

/// Decode a build string into its raw byte sequence.
///
/// Surrounding whitespace is stripped and `=` padding restored to a
/// multiple of 4 symbols. An empty (or all-whitespace) input yields an
/// empty buffer, which is a valid degenerate input to the bit reader.
///
/// # Errors
///
/// [`Error::MalformedInput`] when the text contains characters outside
/// the base64 alphabet or is otherwise structurally undecodable.
pub fn decode_code(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut padded = trimmed.to_owned();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| Error::malformed(format!("base64 decode failed: {e}")))
}

//! HTTP-Redirect binding message encoding (DEFLATE + base64)

use crate::error::{SamlError, SamlResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

/// Encode a protocol message for the `SAMLRequest` parameter of the
/// HTTP-Redirect binding: raw DEFLATE, then standard base64.
pub fn encode_redirect(xml: &str) -> SamlResult<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .map_err(|e| SamlError::Synthesis(format!("Deflate encode failed: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SamlError::Synthesis(format!("Deflate encode failed: {e}")))?;
    Ok(STANDARD.encode(compressed))
}

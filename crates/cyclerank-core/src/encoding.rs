//! Detection of graph file encodings from their leading bytes.
//!
//! Checked in order: zstd frame magic, the CBOR self-describing tag 55799,
//! then a JSON object opener after optional whitespace.

/// Serialization encoding of a graph document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// JSON object.
    Json,
    /// CBOR, identified by self-describing tag 55799.
    Cbor,
    /// zstd-compressed payload; decompress then detect the inner encoding.
    Zstd,
}

/// The leading bytes match no known encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingDetectionError {
    /// Up to four of the inspected bytes.
    pub first_bytes: Vec<u8>,
}

impl std::fmt::Display for EncodingDetectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized encoding: first bytes are {:02X?}",
            self.first_bytes
        )
    }
}

impl std::error::Error for EncodingDetectionError {}

pub(crate) const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
pub(crate) const CBOR_TAG: [u8; 3] = [0xD9, 0xD9, 0xF7];
const JSON_OPEN_BRACE: u8 = b'{';
const JSON_WHITESPACE: [u8; 4] = [b'\t', b'\n', b'\r', b' '];

/// Detects the encoding of `bytes`.
///
/// # Errors
///
/// [`EncodingDetectionError`] if none of the known prefixes match.
pub fn detect_encoding(bytes: &[u8]) -> Result<Encoding, EncodingDetectionError> {
    if bytes.starts_with(&ZSTD_MAGIC) {
        return Ok(Encoding::Zstd);
    }

    if bytes.starts_with(&CBOR_TAG) {
        return Ok(Encoding::Cbor);
    }

    if let Some(&byte) = bytes.iter().find(|b| !JSON_WHITESPACE.contains(b)) {
        if byte == JSON_OPEN_BRACE {
            return Ok(Encoding::Json);
        }
    }

    Err(EncodingDetectionError {
        first_bytes: bytes.iter().copied().take(4).collect(),
    })
}

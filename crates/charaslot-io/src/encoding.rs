//! Byte encodings of persisted text

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Encoding of a persisted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// Little-endian UTF-16, written without a byte order mark
    Utf16Le,
}

impl TextEncoding {
    /// Name used in the document prolog
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16",
        }
    }

    /// Encode text
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

/// Decode persisted text, detecting UTF-16LE and UTF-8 with or without BOM
pub fn decode(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&UTF16LE_BOM) {
        return decode_utf16le(rest);
    }
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return decode_utf8(rest);
    }
    // ASCII markup in UTF-16LE leaves every second byte zero
    if bytes.len() >= 2 && bytes[0] != 0 && bytes[1] == 0 {
        return decode_utf16le(bytes);
    }
    decode_utf8(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
}

fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Encoding(format!(
            "odd byte count {} for UTF-16",
            bytes.len()
        )));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Error::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16le_has_no_bom() {
        let bytes = TextEncoding::Utf16Le.encode("<a>");
        assert_eq!(bytes, vec![b'<', 0, b'a', 0, b'>', 0]);
    }

    #[test]
    fn test_decode_detects_encoding() {
        let text = "<title>Princesse ✿</title>";
        assert_eq!(decode(&TextEncoding::Utf16Le.encode(text)).unwrap(), text);
        assert_eq!(decode(&TextEncoding::Utf8.encode(text)).unwrap(), text);

        let mut with_bom = UTF16LE_BOM.to_vec();
        with_bom.extend(TextEncoding::Utf16Le.encode(text));
        assert_eq!(decode(&with_bom).unwrap(), text);

        let mut with_bom = UTF8_BOM.to_vec();
        with_bom.extend(text.as_bytes());
        assert_eq!(decode(&with_bom).unwrap(), text);
    }

    #[test]
    fn test_decode_rejects_truncated_utf16() {
        let mut bytes = TextEncoding::Utf16Le.encode("<x>");
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(Error::Encoding(_))));
    }
}

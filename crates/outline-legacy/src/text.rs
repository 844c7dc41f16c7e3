//! Single-byte text decoding.
//!
//! Legacy files store text in the Windows "ANSI" code page.

use encoding_rs::WINDOWS_1252;

/// Decode Windows-1252 bytes, dropping trailing spaces and NUL padding.
pub fn decode_ansi(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.trim_end_matches([' ', '\0']).to_string()
}

/// Decode a little-endian signed 16-bit field. Zero means "unset" and
/// decodes to an empty string.
pub fn decode_int16(bytes: [u8; 2]) -> String {
    match i16::from_le_bytes(bytes) {
        0 => String::new(),
        value => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_spaces_and_nul() {
        assert_eq!(decode_ansi(b"Hazel   "), "Hazel");
        assert_eq!(decode_ansi(b"Hazel\0\0 \0"), "Hazel");
        assert_eq!(decode_ansi(b"  lead"), "  lead");
        assert_eq!(decode_ansi(b"    "), "");
        assert_eq!(decode_ansi(b""), "");
    }

    #[test]
    fn decodes_windows_1252() {
        assert_eq!(decode_ansi(&[b'c', b'a', b'f', 0xe9]), "café");
        assert_eq!(decode_ansi(&[0x93, b'x', 0x94]), "\u{201c}x\u{201d}");
    }

    #[test]
    fn zero_integer_is_unset() {
        assert_eq!(decode_int16([0, 0]), "");
        assert_eq!(decode_int16(42i16.to_le_bytes()), "42");
        assert_eq!(decode_int16((-3i16).to_le_bytes()), "-3");
    }
}

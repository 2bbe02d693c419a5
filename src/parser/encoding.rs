// file: src/parser/encoding.rs
// description: fixed Latin-1 text decoding for raw email files

/// Decodes ISO-8859-1 bytes. Every byte is the code point of the same
/// value, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Translates `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(decode_latin1(b"Subject: hi"), "Subject: hi");
    }

    #[test]
    fn test_high_bytes_map_to_code_points() {
        assert_eq!(decode_latin1(&[0x63, 0x61, 0x66, 0xE9]), "café");
        assert_eq!(decode_latin1(&[0xA9, 0xFF]), "©ÿ");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_newlines("plain"), "plain");
    }
}

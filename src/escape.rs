//! Backslash escape decoding for backtick literals and quoted lexemes.

/// Decode `\a \b \f \n \r \t \v \' \\`, scanning left to right.
///
/// Any other backslash sequence, including a trailing lone backslash, is
/// kept verbatim.
pub fn unescape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();

    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            out.push(byte);
            continue;
        }
        let decoded = match iter.peek() {
            Some(b'a') => 0x07,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'v') => 0x0b,
            Some(b'\'') => b'\'',
            Some(b'\\') => b'\\',
            _ => {
                out.push(byte);
                continue;
            }
        };
        iter.next();
        out.push(decoded);
    }
    out
}

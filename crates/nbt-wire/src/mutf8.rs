//! Modified UTF-8, the string encoding of the tag stream.
//!
//! This is the encoding produced by Java's `DataOutput::writeUTF`. It differs
//! from standard UTF-8 in two ways:
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┬─────────────────────────┐
//! │ Code point           │ Standard UTF-8       │ Modified UTF-8          │
//! ├──────────────────────┼──────────────────────┼─────────────────────────┤
//! │ U+0000               │ 00                   │ C0 80                   │
//! │ U+10000..=U+10FFFF   │ 4 bytes              │ 2 × 3-byte surrogates   │
//! └──────────────────────┴──────────────────────┴─────────────────────────┘
//! ```
//!
//! Everything else is byte-identical, so plain ASCII and BMP text decode the
//! same either way. A raw `00` byte is accepted on input, as Java's reader
//! does.

/// Decode a modified UTF-8 byte sequence into a `String`.
///
/// # Errors
///
/// Returns the byte index of the first offending sequence when the input
/// contains a malformed lead/continuation byte, a 4-byte sequence, or a
/// surrogate half without its partner.
pub fn decode(bytes: &[u8]) -> Result<String, usize> {
    let mut out = String::with_capacity(bytes.len());
    // High surrogate waiting for its low half, with the byte index it started at.
    let mut pending: Option<(u16, usize)> = None;
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let (unit, width) = decode_unit(bytes, i)?;
        i += width;

        match (pending.take(), unit) {
            (None, 0xD800..=0xDBFF) => pending = Some((unit, start)),
            (None, 0xDC00..=0xDFFF) => return Err(start),
            (None, _) => out.push(char::from_u32(u32::from(unit)).ok_or(start)?),
            (Some((high, _)), 0xDC00..=0xDFFF) => {
                let code =
                    0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                out.push(char::from_u32(code).ok_or(start)?);
            }
            (Some((_, at)), _) => return Err(at),
        }
    }

    match pending {
        Some((_, at)) => Err(at),
        None => Ok(out),
    }
}

/// Decode one UTF-16 code unit starting at `at`. Returns `(unit, width)`.
fn decode_unit(bytes: &[u8], at: usize) -> Result<(u16, usize), usize> {
    let lead = bytes[at];
    match lead {
        0x00..=0x7F => Ok((u16::from(lead), 1)),
        0xC0..=0xDF => {
            let b1 = continuation(bytes, at, 1)?;
            Ok(((u16::from(lead & 0x1F) << 6) | b1, 2))
        }
        0xE0..=0xEF => {
            let b1 = continuation(bytes, at, 1)?;
            let b2 = continuation(bytes, at, 2)?;
            Ok(((u16::from(lead & 0x0F) << 12) | (b1 << 6) | b2, 3))
        }
        _ => Err(at),
    }
}

/// The 6 payload bits of the continuation byte `at + n`, or the lead's
/// index if that byte is missing or is not a continuation byte.
fn continuation(bytes: &[u8], at: usize, n: usize) -> Result<u16, usize> {
    match bytes.get(at + n) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
        _ => Err(at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode(b"regular_key").unwrap(), "regular_key");
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode(&[]).unwrap(), "");
    }

    #[test]
    fn two_and_three_byte_sequences() {
        // é = C3 A9, € = E2 82 AC
        assert_eq!(decode(&[0xC3, 0xA9, 0xE2, 0x82, 0xAC]).unwrap(), "é€");
    }

    #[test]
    fn encoded_nul() {
        assert_eq!(decode(&[b'a', 0xC0, 0x80, b'b']).unwrap(), "a\0b");
    }

    #[test]
    fn raw_nul_accepted() {
        assert_eq!(decode(&[0x00]).unwrap(), "\0");
    }

    #[test]
    fn surrogate_pair_combines() {
        // U+1D518 (𝔘) = D835 DD18
        let bytes = [0xED, 0xA0, 0xB5, 0xED, 0xB4, 0x98];
        assert_eq!(decode(&bytes).unwrap(), "𝔘");
    }

    #[test]
    fn four_byte_utf8_rejected() {
        assert_eq!(decode(&[0xF0, 0x9D, 0x94, 0x98]), Err(0));
    }

    #[test]
    fn lone_low_surrogate_rejected() {
        assert_eq!(decode(&[b'x', 0xED, 0xB4, 0x98]), Err(1));
    }

    #[test]
    fn trailing_high_surrogate_rejected() {
        assert_eq!(decode(&[0xED, 0xA0, 0xB5]), Err(0));
    }

    #[test]
    fn high_surrogate_followed_by_plain_char_rejected() {
        assert_eq!(decode(&[0xED, 0xA0, 0xB5, b'a']), Err(0));
    }

    #[test]
    fn truncated_sequence_rejected() {
        assert_eq!(decode(&[b'a', b'b', 0xE2, 0x82]), Err(2));
    }

    #[test]
    fn bad_continuation_rejected() {
        assert_eq!(decode(&[0xC3, 0x41]), Err(0));
    }
}

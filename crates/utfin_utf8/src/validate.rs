//! Lead-byte classification and the prefix validator.
//!
//! # Leniency
//!
//! Only two structural rules are enforced beyond lead-byte shape:
//! continuation bytes must match `10xxxxxx`, and a 2-byte sequence must not
//! be overlong (lead byte `0xC0` or `0xC1`). Overlong 3/4-byte forms,
//! encoded surrogates, and code points above U+10FFFF are accepted. The
//! validator only has to tell UTF-8 apart from legacy single-byte text, and
//! those encodings almost never produce the rarer malformed shapes.

/// Declared length of a UTF-8 sequence, derived from its lead byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lead {
    /// `0xxxxxxx`
    Ascii,
    /// `110xxxxx`, `1110xxxx` or `11110xxx`, carrying the total length.
    Multi(usize),
    /// Continuation byte or `11111xxx`: cannot start a sequence.
    Invalid,
}

#[inline]
fn classify(byte: u8) -> Lead {
    if byte & 0x80 == 0 {
        Lead::Ascii
    } else if byte & 0xE0 == 0xC0 {
        Lead::Multi(2)
    } else if byte & 0xF0 == 0xE0 {
        Lead::Multi(3)
    } else if byte & 0xF8 == 0xF0 {
        Lead::Multi(4)
    } else {
        Lead::Invalid
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Length (1-4) of the UTF-8 sequence introduced by `first_byte`.
///
/// Bytes that cannot start a sequence (continuation bytes and `0xF8..=0xFF`)
/// report 1, so callers stepping through text always make progress.
pub fn sequence_length(first_byte: u8) -> usize {
    match classify(first_byte) {
        Lead::Multi(len) => len,
        Lead::Ascii | Lead::Invalid => 1,
    }
}

/// Returns `true` if `bytes` looks like UTF-8.
///
/// A multi-byte sequence that runs past the end of the slice ends the scan
/// with `true`; the bytes after its lead byte are not inspected. As a
/// consequence, truncating an invalid slice can make it valid.
pub fn is_valid(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let len = match classify(lead) {
            Lead::Ascii => {
                i += 1;
                continue;
            }
            Lead::Multi(len) => len,
            Lead::Invalid => return false,
        };

        let Some(tail) = bytes.get(i + 1..i + len) else {
            // Sequence straddles the end of the slice.
            return true;
        };

        if !tail.iter().all(|&b| is_continuation(b)) {
            return false;
        }

        if len == 2 && lead < 0xC2 {
            return false;
        }

        i += len;
    }
    true
}

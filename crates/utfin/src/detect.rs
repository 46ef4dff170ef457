//! One-shot encoding detection from a file prefix.
//!
//! The decision order is fixed:
//!
//! 1. `FF FE` → UTF-16LE, `FE FF` → UTF-16BE (byte-order marks win outright)
//! 2. empty prefix → UTF-8
//! 3. prefix passes [`utfin_utf8::is_valid`] → UTF-8
//! 4. anything else → the system legacy encoding
//!
//! A prefix cut in the middle of a UTF-8 sequence still counts as UTF-8.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use utfin_decode::TextEncoding;

use crate::OpenError;

/// Bytes inspected from the start of a file before deciding.
pub const DEFAULT_PREFIX_LEN: usize = 4096;

/// Decide the encoding of a stream from its first bytes.
pub fn detect_encoding(prefix: &[u8]) -> TextEncoding {
    match prefix {
        [0xFF, 0xFE, ..] => TextEncoding::Utf16Le,
        [0xFE, 0xFF, ..] => TextEncoding::Utf16Be,
        [] => TextEncoding::Utf8,
        _ if utfin_utf8::is_valid(prefix) => TextEncoding::Utf8,
        _ => TextEncoding::SystemLegacy,
    }
}

/// Read up to `limit` bytes from the start of `path`.
///
/// The handle is closed before returning.
pub(crate) fn read_prefix(path: &Path, limit: usize) -> Result<Vec<u8>, OpenError> {
    let file = File::open(path).map_err(|e| OpenError::from_io(path, e))?;
    let mut prefix = Vec::with_capacity(limit);
    file.take(u64::try_from(limit).unwrap_or(u64::MAX))
        .read_to_end(&mut prefix)
        .map_err(|e| OpenError::from_io(path, e))?;
    Ok(prefix)
}

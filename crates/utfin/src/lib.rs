//! Open a text file of unknown encoding as a stream of UTF-8.
//!
//! # Pipeline
//!
//! ```text
//! path ──► read_prefix() ──► first 4 KiB ──► detect_encoding()
//!                                                  │
//!          UTF-8 ◄─────────────────────────────────┤
//!            │                                     │ UTF-16LE, UTF-16BE, legacy
//!            ▼                                     ▼
//!   raw file, passed through           DecodeFilter over a reopened file
//! ```
//!
//! Detection happens once. The sniffing handle is closed before the file is
//! reopened for the real read, so the stream always starts at byte 0 and no
//! seeking is required.
//!
//! ```text
//! let mut stream = utfin::open_text_stream("notes.txt")?;
//! let mut text = String::new();
//! stream.read_to_string(&mut text)?;
//! ```

pub mod commands;
mod detect;
mod error;
mod open;
mod options;

pub use detect::{detect_encoding, DEFAULT_PREFIX_LEN};
pub use error::{OpenError, ReadTextError};
pub use open::TextStream;
pub use options::OpenOptions;

// Re-export the building blocks so callers need only this crate.
pub use utfin_decode::{
    ByteSource, ConversionError, Converter, DecodeFilter, EncodingRsConverter, LegacyEncoding,
    RawRead, TextEncoding, DEFAULT_CHUNK_SIZE,
};
pub use utfin_utf8::{is_valid, sequence_length};

use std::path::Path;

/// Open `path` as a UTF-8 stream using [`OpenOptions::default`].
///
/// The legacy fallback encoding is resolved from the process locale.
pub fn open_text_stream(path: impl AsRef<Path>) -> Result<TextStream, OpenError> {
    OpenOptions::default().open(path)
}

/// Detect the encoding of `path` without building a stream.
pub fn detect_file(path: impl AsRef<Path>) -> Result<TextEncoding, OpenError> {
    OpenOptions::default().detect(path)
}

/// Read all of `path` into a `String` through the decoding pipeline.
pub fn read_text(path: impl AsRef<Path>) -> Result<String, ReadTextError> {
    OpenOptions::default().read_text(path)
}

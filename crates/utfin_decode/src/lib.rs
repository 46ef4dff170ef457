//! Streaming conversion of non-UTF-8 text into UTF-8.
//!
//! # Architecture
//!
//! ```text
//! ByteSource (raw bytes, any io::Read)
//!     │
//!     ▼
//! DecodeFilter ── carry_over: odd trailing byte of a UTF-16 chunk
//!     │        └─ pending:    converted bytes not yet handed out
//!     ▼
//! Converter (encoding_rs by default) ──► UTF-8 bytes
//! ```
//!
//! The filter never fails on malformed input. A chunk the converter rejects
//! contributes a single `?` to the output and decoding carries on with the
//! next chunk. Only I/O errors from the underlying source are returned.

mod convert;
mod encoding;
mod filter;
mod locale;
mod source;

pub use convert::{ConversionError, Converter, EncodingRsConverter};
pub use encoding::TextEncoding;
pub use filter::{DecodeFilter, DEFAULT_CHUNK_SIZE};
pub use locale::LegacyEncoding;
pub use source::{ByteSource, RawRead};

//! Boundary-tolerant UTF-8 validation.
//!
//! This crate answers one question for the encoding detector: "could this
//! prefix of a file be UTF-8?" It is not a conformance validator. A
//! multi-byte sequence cut off by the end of the slice is accepted, because
//! the slice is usually the first few kilobytes of a larger file and the cut
//! is a read boundary, not corruption.
//!
//! ```text
//! is_valid(b"hello")              == true
//! is_valid(&[0xE4, 0xBD])         == true   // truncated 3-byte sequence
//! is_valid(&[0xC0, 0x80])         == false  // overlong 2-byte sequence
//! is_valid(&[0x80])               == false  // stray continuation byte
//! ```

mod validate;

pub use validate::{is_valid, sequence_length};

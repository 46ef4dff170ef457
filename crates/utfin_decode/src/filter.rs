//! Pull-based decoding filter.
//!
//! # Buffers
//!
//! ```text
//! source ──read──► [carry_over | fresh bytes] ──convert──► pending ──pull──► caller
//!                   └ odd UTF-16 byte kept ┘
//! ```
//!
//! `carry_over` holds raw bytes that cannot be converted on their own yet:
//! a partial code unit, plus for UTF-16 a high surrogate still waiting for
//! its partner. It is dropped without a trace when the source ends. `pending` holds converted UTF-8 that the
//! caller has not asked for yet. Both are evicted from the front.
//!
//! # Failure Policy
//!
//! A chunk the converter rejects becomes a single `?` in the output. The
//! stream keeps going; only I/O errors from the source reach the caller.

use std::io::{self, Read};

use crate::{ByteSource, Converter, EncodingRsConverter, RawRead, TextEncoding};

/// Raw bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Emitted once per chunk the converter rejects.
const PLACEHOLDER: u8 = b'?';

/// U+FEFF encoded as UTF-8.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Converts a raw byte source into UTF-8, one chunk at a time.
#[derive(Debug)]
pub struct DecodeFilter<S, C = EncodingRsConverter> {
    source: S,
    converter: C,
    encoding: TextEncoding,
    /// Scratch buffer for raw reads, sized to the chunk size.
    chunk: Box<[u8]>,
    /// Converted bytes not yet handed to the caller.
    pending: Vec<u8>,
    /// Trailing partial code unit and unpaired high surrogate.
    carry_over: Vec<u8>,
    /// Drop a leading U+FEFF from the first conversion (UTF-16 only).
    strip_bom: bool,
}

impl<S: ByteSource> DecodeFilter<S> {
    /// Decode `source` as `encoding` using the default `encoding_rs` converter.
    ///
    /// The default converter decodes `SystemLegacy` as `windows-1252`; use
    /// [`with_converter`](Self::with_converter) to pick another legacy
    /// encoding.
    pub fn new(source: S, encoding: TextEncoding) -> Self {
        Self::with_converter(source, encoding, EncodingRsConverter::default())
    }
}

impl<S: ByteSource, C: Converter> DecodeFilter<S, C> {
    pub fn with_converter(source: S, encoding: TextEncoding, converter: C) -> Self {
        DecodeFilter {
            source,
            converter,
            encoding,
            chunk: vec![0; DEFAULT_CHUNK_SIZE].into_boxed_slice(),
            pending: Vec::new(),
            carry_over: Vec::new(),
            strip_bom: encoding.is_utf16(),
        }
    }

    /// Set how many raw bytes are requested per read. Zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk = vec![0; chunk_size.max(1)].into_boxed_slice();
        self
    }

    /// The encoding this filter decodes from.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The underlying raw source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Pull up to `max_bytes` of UTF-8.
    ///
    /// Returns `Ok(None)` at end of stream. A request for zero bytes returns
    /// an empty vector without reading. Otherwise the result is never empty
    /// and never longer than `max_bytes`.
    pub fn pull(&mut self, max_bytes: usize) -> io::Result<Option<Vec<u8>>> {
        if max_bytes == 0 {
            return Ok(Some(Vec::new()));
        }
        if !self.fill()? {
            return Ok(None);
        }
        let n = max_bytes.min(self.pending.len());
        Ok(Some(self.pending.drain(..n).collect()))
    }

    /// Make sure `pending` has at least one byte.
    ///
    /// Returns `false` once the source is exhausted and nothing is pending.
    fn fill(&mut self) -> io::Result<bool> {
        while self.pending.is_empty() {
            let read = match self.source.read_raw(&mut self.chunk[..])? {
                RawRead::Data(n) => n,
                RawRead::End => {
                    if !self.carry_over.is_empty() {
                        tracing::debug!(
                            encoding = %self.encoding,
                            bytes = self.carry_over.len(),
                            "dropping incomplete trailing bytes at end of stream"
                        );
                        self.carry_over.clear();
                    }
                    return Ok(false);
                }
            };

            let mut work = std::mem::take(&mut self.carry_over);
            work.extend_from_slice(&self.chunk[..read]);

            let mut convertible = work.len() - work.len() % self.encoding.unit_size();
            if ends_with_high_surrogate(&work[..convertible], self.encoding) {
                convertible -= 2;
            }
            self.carry_over.extend_from_slice(&work[convertible..]);
            work.truncate(convertible);

            tracing::trace!(
                read,
                convertible,
                carried = self.carry_over.len(),
                "read raw chunk"
            );

            // Nothing convertible on its own yet; read more before converting.
            if work.is_empty() {
                continue;
            }

            self.convert(&work);
        }
        Ok(true)
    }

    fn convert(&mut self, raw: &[u8]) {
        match self.converter.convert(raw, self.encoding) {
            Ok(decoded) => {
                let decoded = match decoded.strip_prefix(UTF8_BOM) {
                    Some(rest) if self.strip_bom => rest,
                    _ => &decoded[..],
                };
                self.pending.extend_from_slice(decoded);
            }
            Err(err) => {
                tracing::debug!(%err, "substituting placeholder for undecodable chunk");
                self.pending.push(PLACEHOLDER);
            }
        }
        self.strip_bom = false;
    }
}

/// Whether the last UTF-16 code unit of `units` opens a surrogate pair.
fn ends_with_high_surrogate(units: &[u8], encoding: TextEncoding) -> bool {
    let [.., a, b] = units else {
        return false;
    };
    let unit = match encoding {
        TextEncoding::Utf16Le => u16::from_le_bytes([*a, *b]),
        TextEncoding::Utf16Be => u16::from_be_bytes([*a, *b]),
        TextEncoding::Utf8 | TextEncoding::SystemLegacy => return false,
    };
    (0xD800..=0xDBFF).contains(&unit)
}

impl<S: ByteSource, C: Converter> Read for DecodeFilter<S, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || !self.fill()? {
            return Ok(0);
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

#[cfg(test)]
mod tests;

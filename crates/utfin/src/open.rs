//! The UTF-8 stream handed back to callers.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use utfin_decode::{ByteSource, DecodeFilter, EncodingRsConverter, RawRead, TextEncoding};

use crate::{OpenError, OpenOptions};

/// A readable stream of UTF-8 bytes over a file of any supported encoding.
///
/// Owns the underlying file handle; dropping the stream closes it. Wrap in
/// [`io::BufReader`] for line-oriented access.
#[derive(Debug)]
pub struct TextStream {
    encoding: TextEncoding,
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    /// Already UTF-8: bytes are served as stored, at most `read_limit` per pull.
    Passthrough { file: File, read_limit: usize },
    Decoded(DecodeFilter<File>),
}

impl TextStream {
    /// Open `path` from byte 0 and build the pipeline for `encoding`.
    pub(crate) fn open(
        path: &Path,
        encoding: TextEncoding,
        options: &OpenOptions,
    ) -> Result<Self, OpenError> {
        let file = File::open(path).map_err(|e| OpenError::from_io(path, e))?;
        let inner = match encoding {
            TextEncoding::Utf8 => Inner::Passthrough {
                file,
                read_limit: options.chunk_size.max(1),
            },
            _ => {
                let converter = EncodingRsConverter::new(options.legacy);
                Inner::Decoded(
                    DecodeFilter::with_converter(file, encoding, converter)
                        .with_chunk_size(options.chunk_size),
                )
            }
        };
        Ok(TextStream { encoding, inner })
    }

    /// The encoding detected for the file.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Pull up to `max_bytes` of UTF-8; `Ok(None)` at end of stream.
    ///
    /// Same contract as [`DecodeFilter::pull`], for either pipeline.
    pub fn pull(&mut self, max_bytes: usize) -> io::Result<Option<Vec<u8>>> {
        match &mut self.inner {
            Inner::Decoded(filter) => filter.pull(max_bytes),
            Inner::Passthrough { file, read_limit } => {
                if max_bytes == 0 {
                    return Ok(Some(Vec::new()));
                }
                let mut buf = vec![0u8; max_bytes.min(*read_limit)];
                match file.read_raw(&mut buf[..])? {
                    RawRead::Data(n) => {
                        buf.truncate(n);
                        Ok(Some(buf))
                    }
                    RawRead::End => Ok(None),
                }
            }
        }
    }
}

impl Read for TextStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Passthrough { file, .. } => file.read(buf),
            Inner::Decoded(filter) => filter.read(buf),
        }
    }
}

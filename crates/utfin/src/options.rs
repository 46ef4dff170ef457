//! Tunables for opening a text stream.

use std::io::Read;
use std::path::Path;

use utfin_decode::{LegacyEncoding, TextEncoding, DEFAULT_CHUNK_SIZE};

use crate::detect::{detect_encoding, read_prefix, DEFAULT_PREFIX_LEN};
use crate::{OpenError, ReadTextError, TextStream};

/// How a file is sniffed and decoded.
///
/// ```text
/// let options = OpenOptions {
///     legacy: LegacyEncoding::from_label("koi8-r").unwrap_or_default(),
///     ..OpenOptions::default()
/// };
/// let stream = options.open("report.txt")?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OpenOptions {
    /// Bytes read from the start of the file to decide the encoding.
    pub prefix_len: usize,
    /// Raw bytes the decode filter reads at a time.
    pub chunk_size: usize,
    /// Encoding used when the file is neither UTF-16 with a BOM nor UTF-8.
    pub legacy: LegacyEncoding,
}

impl Default for OpenOptions {
    /// 4 KiB prefix and chunks, legacy encoding taken from the locale.
    fn default() -> Self {
        OpenOptions {
            prefix_len: DEFAULT_PREFIX_LEN,
            chunk_size: DEFAULT_CHUNK_SIZE,
            legacy: LegacyEncoding::from_locale(),
        }
    }
}

impl OpenOptions {
    /// Detect the encoding of `path` from its prefix.
    pub fn detect(&self, path: impl AsRef<Path>) -> Result<TextEncoding, OpenError> {
        let path = path.as_ref();
        let prefix = read_prefix(path, self.prefix_len)?;
        let encoding = detect_encoding(&prefix);
        tracing::debug!(
            path = %path.display(),
            prefix_len = prefix.len(),
            %encoding,
            "detected encoding"
        );
        Ok(encoding)
    }

    /// Detect the encoding of `path` and open it as a UTF-8 stream.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<TextStream, OpenError> {
        let path = path.as_ref();
        let encoding = self.detect(path)?;
        TextStream::open(path, encoding, self)
    }

    /// Read all of `path` into a `String`.
    pub fn read_text(&self, path: impl AsRef<Path>) -> Result<String, ReadTextError> {
        let path = path.as_ref();
        let mut stream = self.open(path)?;
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|source| ReadTextError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        String::from_utf8(bytes).map_err(|source| ReadTextError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })
    }
}

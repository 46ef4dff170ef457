//! Whole-chunk conversion into UTF-8.

use encoding_rs::Encoding;

use crate::{LegacyEncoding, TextEncoding};

/// A chunk was not well-formed in its declared encoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{len}-byte chunk is not valid {encoding}")]
pub struct ConversionError {
    /// Name of the encoding the chunk was decoded as.
    pub encoding: &'static str,
    /// Length of the rejected chunk in bytes.
    pub len: usize,
}

/// Converts a complete chunk of encoded text into UTF-8.
///
/// Each call is independent. The decode filter only hands over chunks whose
/// length is a multiple of [`TextEncoding::unit_size`], but a chunk may still
/// end in the middle of a character (a split UTF-16 surrogate pair, say);
/// implementations report that as an error rather than guessing.
pub trait Converter {
    fn convert(&self, bytes: &[u8], encoding: TextEncoding) -> Result<Vec<u8>, ConversionError>;
}

/// [`Converter`] backed by `encoding_rs`, with replacement disabled.
///
/// Byte-order marks are not interpreted: a leading `FF FE` in a UTF-16LE
/// chunk decodes to U+FEFF like any other code unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodingRsConverter {
    legacy: LegacyEncoding,
}

impl EncodingRsConverter {
    /// Create a converter that decodes `SystemLegacy` text as `legacy`.
    pub fn new(legacy: LegacyEncoding) -> Self {
        EncodingRsConverter { legacy }
    }

    /// The encoding used for [`TextEncoding::SystemLegacy`].
    pub fn legacy(&self) -> LegacyEncoding {
        self.legacy
    }

    fn resolve(&self, encoding: TextEncoding) -> &'static Encoding {
        match encoding {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
            TextEncoding::SystemLegacy => self.legacy.encoding(),
        }
    }
}

impl Converter for EncodingRsConverter {
    fn convert(&self, bytes: &[u8], encoding: TextEncoding) -> Result<Vec<u8>, ConversionError> {
        let resolved = self.resolve(encoding);
        resolved
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned().into_bytes())
            .ok_or(ConversionError {
                encoding: resolved.name(),
                len: bytes.len(),
            })
    }
}

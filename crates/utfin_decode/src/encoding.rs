//! The encoding tag chosen for a stream.

use std::fmt;

/// Source encoding of a text stream.
///
/// Picked once per file by the detector and fixed for the lifetime of the
/// stream. `SystemLegacy` is a placeholder: the concrete legacy encoding is
/// resolved by the [`Converter`](crate::Converter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    SystemLegacy,
}

impl TextEncoding {
    /// Human-readable name, as printed by `utfin detect`.
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::SystemLegacy => "system-legacy",
        }
    }

    /// Smallest number of bytes that can be converted on its own.
    ///
    /// Chunks handed to the converter are always a multiple of this.
    pub fn unit_size(self) -> usize {
        match self {
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
            TextEncoding::Utf8 | TextEncoding::SystemLegacy => 1,
        }
    }

    /// Returns `true` for the two UTF-16 byte orders.
    pub fn is_utf16(self) -> bool {
        self.unit_size() == 2
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

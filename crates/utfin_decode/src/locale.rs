//! Resolution of the system legacy encoding.
//!
//! Text that is neither UTF-16 with a BOM nor valid UTF-8 is decoded with
//! the encoding named by the POSIX locale. Locale strings look like
//! `language_TERRITORY.codeset@modifier`; only the codeset matters here.
//!
//! Nothing in the decode path calls [`LegacyEncoding::from_locale`] on its
//! own. Callers resolve the encoding once and pass it to the converter.

use encoding_rs::Encoding;

/// Locale variables consulted in order; the first non-empty one wins.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// The concrete encoding standing in for [`TextEncoding::SystemLegacy`].
///
/// Always an ASCII-compatible encoding other than UTF-8. Text reaching the
/// legacy path already failed UTF-8 validation, so a UTF-8 locale resolves
/// to the fallback instead.
///
/// [`TextEncoding::SystemLegacy`]: crate::TextEncoding::SystemLegacy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyEncoding(&'static Encoding);

impl LegacyEncoding {
    /// `windows-1252`, the superset of ISO-8859-1 used when the locale
    /// names nothing usable.
    pub fn fallback() -> Self {
        LegacyEncoding(encoding_rs::WINDOWS_1252)
    }

    /// Resolve from the process locale (`LC_ALL`, `LC_CTYPE`, `LANG`).
    pub fn from_locale() -> Self {
        Self::from_locale_vars(|name| std::env::var(name).ok())
    }

    /// Resolve from locale variables supplied by `lookup`.
    pub fn from_locale_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locale = LOCALE_VARS
            .into_iter()
            .find_map(|name| lookup(name).filter(|value| !value.is_empty()));

        let resolved = locale.as_deref().and_then(codeset).and_then(Self::from_label);

        match resolved {
            Some(legacy) => {
                tracing::debug!(
                    locale = locale.as_deref().unwrap_or_default(),
                    encoding = legacy.name(),
                    "resolved legacy encoding from locale"
                );
                legacy
            }
            None => {
                tracing::debug!(
                    locale = locale.as_deref().unwrap_or_default(),
                    "locale names no legacy encoding, using windows-1252"
                );
                Self::fallback()
            }
        }
    }

    /// Resolve an explicit WHATWG encoding label such as `koi8-r` or
    /// `iso-8859-15`.
    ///
    /// Returns `None` for unknown labels and for encodings that cannot act as
    /// a legacy fallback (UTF-8, UTF-16, the replacement encoding).
    pub fn from_label(label: &str) -> Option<Self> {
        let encoding = Encoding::for_label_no_replacement(label.trim().as_bytes())?;
        if encoding == encoding_rs::UTF_8 || !encoding.is_ascii_compatible() {
            return None;
        }
        Some(LegacyEncoding(encoding))
    }

    /// The resolved `encoding_rs` encoding.
    pub fn encoding(self) -> &'static Encoding {
        self.0
    }

    /// Canonical name, e.g. `windows-1252`.
    pub fn name(self) -> &'static str {
        self.0.name()
    }
}

impl Default for LegacyEncoding {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Extract the codeset from `language_TERRITORY.codeset@modifier`.
fn codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split('@').next().unwrap_or(rest);
    (!codeset.is_empty()).then_some(codeset)
}

//! Codepage conversion between directory wire bytes and canonical UTF-8.
//!
//! Directory values arrive as length-delimited byte buffers, never
//! null-terminated — embedded zero bytes are legal in directory values,
//! so every conversion here works on explicit slices.
//!
//! # Supported codepages
//!
//! | Codepage | Encoding | Typical deployment |
//! |----------|----------|--------------------|
//! | 1250 | Windows-1250 | Central/Eastern European |
//! | 1251 | Windows-1251 | Cyrillic |
//! | 1252 | Windows-1252 | Western European |
//! | 1253 | Windows-1253 | Greek |
//! | 1254 | Windows-1254 | Turkish |
//! | 1255 | Windows-1255 | Hebrew |
//! | 1256 | Windows-1256 | Arabic |
//! | 1257 | Windows-1257 | Baltic |
//! | 874 | Windows-874 | Thai |
//! | 932 | Shift_JIS | Japanese |
//! | 936 | GB18030 | Simplified Chinese |
//! | 949 | EUC-KR | Korean |
//! | 950 | Big5 | Traditional Chinese |
//! | 20866 | KOI8-R | Russian (Unix legacy) |
//! | 28591 | ISO-8859-1 | Western European (Unix legacy) |
//!
//! Directories that already speak UTF-8 use [`Codepage::Utf8`], which
//! skips transcoding entirely and only validates.

use bytes::Bytes;
use encoding_rs::Encoding;

use crate::error::CodecError;

/// A directory server codepage.
///
/// Selects how [`CodecBridge`] converts between wire bytes and UTF-8
/// text. `Utf8` is the passthrough mode for modern servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Codepage {
    /// Canonical UTF-8; validate only, no transcoding.
    Utf8,
    /// Windows-1250, Central/Eastern European.
    Windows1250,
    /// Windows-1251, Cyrillic.
    Windows1251,
    /// Windows-1252, Western European.
    Windows1252,
    /// Windows-1253, Greek.
    Windows1253,
    /// Windows-1254, Turkish.
    Windows1254,
    /// Windows-1255, Hebrew.
    Windows1255,
    /// Windows-1256, Arabic.
    Windows1256,
    /// Windows-1257, Baltic.
    Windows1257,
    /// Windows-874, Thai.
    Windows874,
    /// Shift_JIS, Japanese.
    ShiftJis,
    /// GB18030, Simplified Chinese.
    Gb18030,
    /// Big5, Traditional Chinese.
    Big5,
    /// EUC-KR, Korean.
    EucKr,
    /// KOI8-R, Russian.
    Koi8R,
    /// ISO-8859-1 / Latin-1.
    Latin1,
}

impl Codepage {
    /// Returns the `encoding_rs` encoding backing this codepage, or
    /// `None` for the UTF-8 passthrough mode.
    #[must_use]
    pub fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Self::Utf8 => None,
            Self::Windows1250 => Some(encoding_rs::WINDOWS_1250),
            Self::Windows1251 => Some(encoding_rs::WINDOWS_1251),
            Self::Windows1252 => Some(encoding_rs::WINDOWS_1252),
            Self::Windows1253 => Some(encoding_rs::WINDOWS_1253),
            Self::Windows1254 => Some(encoding_rs::WINDOWS_1254),
            Self::Windows1255 => Some(encoding_rs::WINDOWS_1255),
            Self::Windows1256 => Some(encoding_rs::WINDOWS_1256),
            Self::Windows1257 => Some(encoding_rs::WINDOWS_1257),
            Self::Windows874 => Some(encoding_rs::WINDOWS_874),
            Self::ShiftJis => Some(encoding_rs::SHIFT_JIS),
            Self::Gb18030 => Some(encoding_rs::GB18030),
            Self::Big5 => Some(encoding_rs::BIG5),
            Self::EucKr => Some(encoding_rs::EUC_KR),
            Self::Koi8R => Some(encoding_rs::KOI8_R),
            Self::Latin1 => Some(encoding_rs::WINDOWS_1252),
        }
    }

    /// Returns the encoding name for display/logging purposes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.encoding() {
            Some(enc) => enc.name(),
            None => "UTF-8",
        }
    }
}

/// Bidirectional bytes↔text converter for one configured codepage.
///
/// Construction is the only fallible step; once built, `decode` and
/// `encode` never fail per call.
///
/// # Permissive decode
///
/// In passthrough (UTF-8) mode, a buffer that fails UTF-8 validation
/// decodes to the **empty string** rather than an error. This matches
/// the permissive behavior of legacy clients but masks corruption: a
/// suspicious run of empty attribute values on a supposedly-UTF-8
/// directory is worth investigating before blaming the server.
#[derive(Debug, Clone, Copy)]
pub struct CodecBridge {
    encoding: Option<&'static Encoding>,
}

impl CodecBridge {
    /// Create a bridge for the given codepage.
    #[must_use]
    pub fn new(codepage: Codepage) -> Self {
        Self {
            encoding: codepage.encoding(),
        }
    }

    /// Create a UTF-8 passthrough bridge.
    #[must_use]
    pub fn utf8() -> Self {
        Self { encoding: None }
    }

    /// Create a bridge from a WHATWG encoding label (e.g. `"windows-1251"`,
    /// `"shift_jis"`).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedCodepage`] when the label is not
    /// a known encoding, or names one `encoding_rs` cannot encode *to*
    /// (UTF-16 and the replacement encoding).
    pub fn for_label(label: &str) -> Result<Self, CodecError> {
        if label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8") {
            return Ok(Self::utf8());
        }
        let enc = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| CodecError::UnsupportedCodepage(label.to_owned()))?;
        // encoding_rs output encoders exist for every encoding except
        // UTF-16 and replacement; those cannot carry directory values.
        if enc == encoding_rs::UTF_16LE || enc == encoding_rs::UTF_16BE || enc == encoding_rs::REPLACEMENT {
            return Err(CodecError::UnsupportedCodepage(label.to_owned()));
        }
        if enc == encoding_rs::UTF_8 {
            return Ok(Self::utf8());
        }
        Ok(Self { encoding: Some(enc) })
    }

    /// Whether this bridge is in UTF-8 passthrough mode.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.encoding.is_none()
    }

    /// Convert a length-delimited wire buffer to canonical text.
    ///
    /// Passthrough mode validates the buffer as UTF-8 and yields `""`
    /// on invalid input (see the type-level note on permissive decode).
    /// Conversion mode transcodes, substituting U+FFFD for bytes the
    /// codepage table does not cover.
    #[must_use]
    pub fn decode(&self, raw: &[u8]) -> String {
        match self.encoding {
            None => match std::str::from_utf8(raw) {
                Ok(text) => text.to_owned(),
                Err(_) => {
                    tracing::trace!(len = raw.len(), "invalid UTF-8 in passthrough decode, yielding empty string");
                    String::new()
                }
            },
            Some(enc) => {
                let (text, had_errors) = enc.decode_without_bom_handling(raw);
                if had_errors {
                    tracing::trace!(encoding = enc.name(), "unmappable bytes replaced during decode");
                }
                text.into_owned()
            }
        }
    }

    /// Convert canonical text to wire bytes.
    ///
    /// The returned buffer is owned by the caller; it crosses into
    /// length/pointer wire structures whose lifetime the caller manages
    /// (see [`crate::ValueArrayBuilder`]).
    #[must_use]
    pub fn encode(&self, text: &str) -> Bytes {
        match self.encoding {
            None => Bytes::copy_from_slice(text.as_bytes()),
            Some(enc) => {
                let (bytes, _, had_errors) = enc.encode(text);
                if had_errors {
                    tracing::trace!(encoding = enc.name(), "unrepresentable characters substituted during encode");
                }
                Bytes::from(bytes.into_owned())
            }
        }
    }
}

impl Default for CodecBridge {
    fn default() -> Self {
        Self::utf8()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_accepts_valid_utf8() {
        let bridge = CodecBridge::utf8();
        assert_eq!(bridge.decode("cn=admin,dc=example".as_bytes()), "cn=admin,dc=example");
    }

    #[test]
    fn passthrough_yields_empty_on_invalid_utf8() {
        let bridge = CodecBridge::utf8();
        assert_eq!(bridge.decode(&[0xFF, 0xFE, 0x41]), "");
    }

    #[test]
    fn passthrough_preserves_embedded_nul() {
        let bridge = CodecBridge::utf8();
        assert_eq!(bridge.decode(b"a\0b"), "a\0b");
        assert_eq!(bridge.encode("a\0b").as_ref(), b"a\0b");
    }

    #[test]
    fn cyrillic_decode() {
        let bridge = CodecBridge::new(Codepage::Windows1251);
        // "Привет" in Windows-1251
        let raw = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        assert_eq!(bridge.decode(&raw), "Привет");
    }

    #[test]
    fn cyrillic_encode() {
        let bridge = CodecBridge::new(Codepage::Windows1251);
        assert_eq!(bridge.encode("Привет").as_ref(), &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
    }

    #[test]
    fn japanese_round_trip() {
        let bridge = CodecBridge::new(Codepage::ShiftJis);
        let encoded = bridge.encode("日本語");
        assert_eq!(encoded.as_ref(), &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA]);
        assert_eq!(bridge.decode(&encoded), "日本語");
    }

    #[test]
    fn label_lookup() {
        assert!(CodecBridge::for_label("windows-1251").is_ok());
        assert!(CodecBridge::for_label("shift_jis").is_ok());
        assert!(CodecBridge::for_label("utf-8").unwrap().is_passthrough());
        assert!(matches!(
            CodecBridge::for_label("ebcdic-37"),
            Err(CodecError::UnsupportedCodepage(_))
        ));
        assert!(matches!(
            CodecBridge::for_label("utf-16le"),
            Err(CodecError::UnsupportedCodepage(_))
        ));
    }

    #[test]
    fn codepage_names() {
        assert_eq!(Codepage::Utf8.name(), "UTF-8");
        assert_eq!(Codepage::Windows1251.name(), "windows-1251");
        assert_eq!(Codepage::ShiftJis.name(), "Shift_JIS");
    }
}

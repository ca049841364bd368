use crate::AbcError;
use encoding_rs::{Encoding, ISO_8859_15, ISO_8859_2, UTF_8, WINDOWS_1251};
use std::borrow::Cow;
use std::fmt;

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Candidate text encodings for tunebook files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1251,
    Latin2,
    Latin9,
}

impl TextEncoding {
    /// Tried in order when loading a tunebook, ordered by prevalence on the web
    /// with an emphasis on Western languages.
    pub const CANDIDATES: [Self; 5] = [
        Self::Utf8,
        Self::Latin1,
        Self::Windows1251,
        Self::Latin2,
        Self::Latin9,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Windows1251 => "Windows-1251",
            Self::Latin2 => "ISO-8859-2",
            Self::Latin9 => "ISO-8859-15",
        }
    }

    // Latin-1 has no `Encoding` of its own, WHATWG aliases it to windows-1252
    const fn encoding(self) -> Option<&'static Encoding> {
        match self {
            Self::Utf8 => Some(UTF_8),
            Self::Latin1 => None,
            Self::Windows1251 => Some(WINDOWS_1251),
            Self::Latin2 => Some(ISO_8859_2),
            Self::Latin9 => Some(ISO_8859_15),
        }
    }

    /// Strict decoding, `None` on the first malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let bytes = match self {
            Self::Utf8 => bytes.strip_prefix(UTF_8_BOM).unwrap_or(bytes),
            _ => bytes,
        };
        match self.encoding() {
            Some(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            // every byte is the code point of the same value
            None => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decode `bytes` with the first candidate that accepts them.
pub fn decode_with_fallback(
    bytes: &[u8],
    candidates: &[TextEncoding],
) -> Result<(String, TextEncoding), AbcError> {
    for &candidate in candidates {
        match candidate.decode(bytes) {
            Some(text) => return Ok((text, candidate)),
            None => log::debug!("Could not decode tunebook as {candidate}"),
        }
    }
    let tried = candidates
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");
    Err(AbcError::LoadError(format!(
        "unable to determine file encoding. Tried: {tried}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_first() {
        let (text, encoding) =
            decode_with_fallback("T:Fáilte".as_bytes(), &TextEncoding::CANDIDATES).unwrap();
        assert_eq!(text, "T:Fáilte");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_utf8_bom_removed() {
        let (text, encoding) =
            decode_with_fallback(b"\xEF\xBB\xBFX:1", &TextEncoding::CANDIDATES).unwrap();
        assert_eq!(text, "X:1");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_latin1_fallback() {
        // "Fáilte" in ISO-8859-1, the lone 0xE1 is malformed UTF-8
        let bytes = b"T:F\xE1ilte";
        let (text, encoding) = decode_with_fallback(bytes, &TextEncoding::CANDIDATES).unwrap();
        assert_eq!(text, "T:Fáilte");
        assert_eq!(encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_latin1_c1_range() {
        // 0x80 and 0x9D are C1 controls in ISO-8859-1, not windows-1252 `€` and a hole
        let (text, encoding) =
            decode_with_fallback(b"T:\x80\x9D\xE9", &TextEncoding::CANDIDATES).unwrap();
        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(text, "T:\u{80}\u{9D}é");
    }

    #[test]
    fn test_skips_to_later_candidate() {
        let bytes = b"T:\xCF\xF0\xE8\xE2\xE5\xF2 \xFF";
        let (text, encoding) = decode_with_fallback(
            bytes,
            &[TextEncoding::Utf8, TextEncoding::Windows1251],
        )
        .unwrap();
        assert_eq!(text, "T:Привет я");
        assert_eq!(encoding, TextEncoding::Windows1251);
    }

    #[test]
    fn test_exhausted_candidates() {
        let err = decode_with_fallback(b"T:\xFF\xFE\xC3", &[TextEncoding::Utf8]).unwrap_err();
        assert!(matches!(err, AbcError::LoadError(_)));
        assert_eq!(
            err.to_string(),
            "load error: unable to determine file encoding. Tried: UTF-8"
        );

        let err = decode_with_fallback(b"X:1", &[]).unwrap_err();
        assert!(matches!(err, AbcError::LoadError(_)));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = TextEncoding::CANDIDATES
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            labels,
            ["UTF-8", "ISO-8859-1", "Windows-1251", "ISO-8859-2", "ISO-8859-15"]
        );
    }
}

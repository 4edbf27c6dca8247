use crate::source_encoding::SourceEncoding;
use log::warn;
use std::borrow::Cow;

/// Default ceiling, in output bytes, for transcoded Windows-1251 text.
pub const DEFAULT_MAX_TEXT_SIZE: usize = 512;

/// Turns zero-terminated card text into a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDecoder {
    encoding: SourceEncoding,
    max_size: usize,
}

impl TextDecoder {
    /// A decoder for `encoding` with the default size ceiling.
    pub fn new(encoding: SourceEncoding) -> Self {
        TextDecoder {
            encoding,
            max_size: DEFAULT_MAX_TEXT_SIZE,
        }
    }

    /// Sets the output ceiling for transcoded text. Text past it is dropped.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// The source encoding text is decoded from.
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// The output ceiling, in bytes, for transcoded text.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Decodes `bytes` up to the first zero byte, at the byte level.
    ///
    /// In ASCII mode the input is returned as is, high bytes included, so a
    /// terminal set to the source code page still shows it.
    pub fn decode_bytes<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        let text = until_nul(bytes);
        match self.encoding {
            SourceEncoding::Ascii => Cow::Borrowed(text),
            SourceEncoding::Windows1251 => Cow::Owned(win1251_to_utf8(text, self.max_size)),
        }
    }

    /// Decodes `bytes` up to the first zero byte into a `String`.
    ///
    /// ASCII-mode bytes that are not valid UTF-8 show as U+FFFD here; use
    /// [`TextDecoder::decode_bytes`] for the exact bytes.
    pub fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(&self.decode_bytes(bytes)).into_owned()
    }
}

/// Decodes zero-terminated `bytes` with the default size ceiling.
pub fn decode_text(bytes: &[u8], encoding: SourceEncoding) -> String {
    TextDecoder::new(encoding).decode(bytes)
}

/// Converts Windows-1251 bytes to UTF-8.
///
/// Only the contiguous Cyrillic letters `А..я` (0xC0..=0xFF) are mapped; the
/// rest of the upper half (quotes, `Ё`, `№` and friends) becomes `*`. Stops at
/// the first zero byte, and before any character that would take the output
/// past `max_size` bytes.
pub fn win1251_to_utf8(bytes: &[u8], max_size: usize) -> Vec<u8> {
    let text = until_nul(bytes);
    let mut out = Vec::with_capacity(std::cmp::min(text.len() * 2, max_size));

    for (i, &c) in text.iter().enumerate() {
        let (buf, len) = match c {
            0xC0..=0xEF => ([0xD0, 0x90 + (c - 0xC0)], 2),
            0xF0..=0xFF => ([0xD1, 0x80 + (c - 0xF0)], 2),
            0x80..=0xBF => ([b'*', 0], 1),
            _ => ([c, 0], 1),
        };
        let encoded = &buf[..len];

        if out.len() + encoded.len() > max_size {
            warn!(
                "Text truncated at {} of {} source bytes ({max_size} byte limit)",
                i,
                text.len()
            );
            break;
        }
        out.extend_from_slice(encoded);
    }

    out
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case(0xC0, &[0xD0, 0x90])]
    #[case(0xDF, &[0xD0, 0xAF])]
    #[case(0xE0, &[0xD0, 0xB0])]
    #[case(0xEF, &[0xD0, 0xBF])]
    #[case(0xF0, &[0xD1, 0x80])]
    #[case(0xFF, &[0xD1, 0x8F])]
    #[case(0x80, b"*")]
    #[case(0xA8, b"*")]
    #[case(0xB9, b"*")]
    #[case(0xBF, b"*")]
    #[case(b'A', b"A")]
    #[case(0x7F, &[0x7F])]
    fn maps_single_bytes(#[case] input: u8, #[case] expected: &[u8]) {
        assert_eq!(win1251_to_utf8(&[input], DEFAULT_MAX_TEXT_SIZE), expected);
    }

    #[test]
    fn maps_every_byte() {
        for b in 1..=0xFFu8 {
            let expected: Vec<u8> = match b {
                0xC0..=0xEF => vec![0xD0, 0x90 + (b - 0xC0)],
                0xF0..=0xFF => vec![0xD1, 0x80 + (b - 0xF0)],
                0x80..=0xBF => vec![b'*'],
                _ => vec![b],
            };
            let out = win1251_to_utf8(&[b], DEFAULT_MAX_TEXT_SIZE);
            assert_eq!(out, expected, "byte {b:#04x}");
        }
    }

    #[test]
    fn cyrillic_letters_agree_with_encoding_rs() {
        let letters: Vec<u8> = (0xC0..=0xFFu8).collect();
        let (expected, _, _) = encoding_rs::WINDOWS_1251.decode(&letters);
        assert_eq!(decode_text(&letters, SourceEncoding::Windows1251), expected);
    }

    #[test]
    fn stops_at_first_nul() {
        let bytes = b"\xcf\xf0\xe8\xe2\xe5\xf2\0\xcc\xe8\xf0";
        assert_eq!(decode_text(bytes, SourceEncoding::Windows1251), "Привет");
        assert_eq!(decode_text(b"Test\0garbage", SourceEncoding::Ascii), "Test");
    }

    #[test]
    fn caps_output_size() {
        let bytes = vec![0xC0u8; 1000];
        let out = win1251_to_utf8(&bytes, DEFAULT_MAX_TEXT_SIZE);
        assert_eq!(out.len(), DEFAULT_MAX_TEXT_SIZE);

        // A two-byte character that would straddle the limit is dropped whole.
        let out = win1251_to_utf8(b"a\xc0\xc0", 4);
        assert_eq!(out, vec![b'a', 0xD0, 0x90]);

        let decoder = TextDecoder::new(SourceEncoding::Windows1251).with_max_size(3);
        assert_eq!(decoder.decode(b"\xc0\xc0"), "А");
    }

    #[test]
    fn ascii_is_not_capped() {
        let bytes = vec![b'x'; 1000];
        let decoder = TextDecoder::new(SourceEncoding::Ascii).with_max_size(8);
        assert_eq!(decoder.decode(&bytes).len(), 1000);
    }

    #[quickcheck]
    fn ascii_mode_is_identity_until_nul(data: Vec<u8>) -> bool {
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        let decoder = TextDecoder::new(SourceEncoding::Ascii);
        decoder.decode_bytes(&data)[..] == data[..end]
    }

    #[quickcheck]
    fn ascii_text_matches_bytes_for_seven_bit_input(data: Vec<u8>) -> bool {
        let data: Vec<u8> = data.into_iter().map(|b| b & 0x7F).collect();
        let decoder = TextDecoder::new(SourceEncoding::Ascii);
        decoder.decode(&data).as_bytes() == &decoder.decode_bytes(&data)[..]
    }

    #[test]
    fn ascii_mode_keeps_high_bytes() {
        let decoder = TextDecoder::new(SourceEncoding::Ascii);
        let out = decoder.decode_bytes(b"\xcf\xe5\xf2\0\xff");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&out[..], b"\xcf\xe5\xf2");

        let decoder = TextDecoder::new(SourceEncoding::Windows1251);
        let out = decoder.decode_bytes(b"\xcf\xe5\xf2");
        assert_eq!(&out[..], "Пет".as_bytes());
    }

    #[quickcheck]
    fn cyrillic_output_is_valid_utf8(data: Vec<u8>, max_size: u16) -> bool {
        let out = win1251_to_utf8(&data, max_size as usize);
        out.len() <= max_size as usize && std::str::from_utf8(&out).is_ok()
    }
}

use crate::card_cursor::CardCursor;
use crate::error::CardError;
use crate::text_decoder::TextDecoder;
use log::trace;
use std::io::{Read, Seek};

/// Size in bytes of one index table entry (0x34).
pub const INDEX_ENTRY_SIZE: usize = 6 + 4 + 1 + INDEX_TEXT_SIZE;

/// Index line text, 40 bytes plus the terminating zero.
pub const INDEX_TEXT_SIZE: usize = 41;

/// One entry of the index table: the card's index line and where its body lives.
///
/// ```text
/// 0 - 5   reserved, zero
/// 6 - 9   absolute position of the card body
/// A       flag byte, zero
/// B - 33  index line text, zero-terminated
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardIndex {
    /// 0-based position in the index table.
    pub ordinal: u16,
    /// Absolute offset of the card body, `None` for an empty slot.
    pub offset: Option<u32>,
    /// Index line bytes as stored, up to the terminating zero. Empty for an empty slot.
    pub raw: Vec<u8>,
    /// Decoded index line. Empty for an empty slot.
    pub text: String,
}

impl CardIndex {
    /// Reads the next index entry.
    ///
    /// Always consumes exactly [`INDEX_ENTRY_SIZE`] bytes and never seeks. A
    /// zero offset or a non-zero flag marks the slot empty.
    pub fn read<R: Read + Seek>(
        cursor: &mut CardCursor<R>,
        decoder: &TextDecoder,
        ordinal: u16,
    ) -> Result<Self, CardError> {
        let _reserved = cursor.read_array::<6>()?;
        let offset = cursor.read_u32()?;
        let flag = cursor.read_u8()?;
        let text = cursor.read_array::<INDEX_TEXT_SIZE>()?;

        if offset == 0 || flag != 0 {
            trace!("Card {ordinal}: empty slot (offset {offset:#x}, flag {flag:#x})");
            return Ok(CardIndex {
                ordinal,
                offset: None,
                raw: Vec::new(),
                text: String::new(),
            });
        }

        trace!("Card {ordinal}: body at {offset:#x}");
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        Ok(CardIndex {
            ordinal,
            offset: Some(offset),
            raw: text[..end].to_vec(),
            text: decoder.decode(&text),
        })
    }

    /// 1-based card number, as shown to users.
    pub fn number(&self) -> u32 {
        u32::from(self.ordinal) + 1
    }

    /// Whether the slot holds no card.
    pub fn is_empty(&self) -> bool {
        self.offset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_encoding::SourceEncoding;
    use rstest::*;
    use std::io::Cursor;

    fn entry(offset: u32, flag: u8, text: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; 6];
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes.push(flag);
        let mut label = [0u8; INDEX_TEXT_SIZE];
        label[..text.len()].copy_from_slice(text);
        bytes.extend_from_slice(&label);
        bytes
    }

    fn read_one(bytes: Vec<u8>, encoding: SourceEncoding) -> (CardIndex, u64) {
        let mut cursor = CardCursor::new(Cursor::new(bytes));
        let index = CardIndex::read(&mut cursor, &TextDecoder::new(encoding), 0).unwrap();
        (index, cursor.position().unwrap())
    }

    #[test]
    fn entry_size_is_0x34() {
        assert_eq!(INDEX_ENTRY_SIZE, 0x34);
        assert_eq!(entry(1, 0, b"").len(), INDEX_ENTRY_SIZE);
    }

    #[test]
    fn reads_valid_entry() {
        let (index, pos) = read_one(entry(0x1234, 0, b"Smith, John"), SourceEncoding::Ascii);
        assert_eq!(index.offset, Some(0x1234));
        assert_eq!(index.text, "Smith, John");
        assert_eq!(index.number(), 1);
        assert_eq!(pos, INDEX_ENTRY_SIZE as u64);
    }

    #[test]
    fn keeps_label_bytes_in_ascii_mode() {
        let (index, _) = read_one(entry(64, 0, b"\xcf\xe5\xf2"), SourceEncoding::Ascii);
        assert_eq!(index.raw, b"\xcf\xe5\xf2");
        let decoder = TextDecoder::new(SourceEncoding::Ascii);
        assert_eq!(&decoder.decode_bytes(&index.raw)[..], b"\xcf\xe5\xf2");
    }

    #[test]
    fn transcodes_label() {
        let bytes = entry(64, 0, b"\xc8\xe2\xe0\xed");
        let (index, _) = read_one(bytes, SourceEncoding::Windows1251);
        assert_eq!(index.text, "Иван");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 1)]
    #[case(0, 0xff)]
    #[case(0x100, 1)]
    #[case(0x100, 0x80)]
    fn empty_slots(#[case] offset: u32, #[case] flag: u8) {
        let (index, pos) = read_one(entry(offset, flag, b"Label"), SourceEncoding::Ascii);
        assert!(index.is_empty());
        assert_eq!(index.offset, None);
        assert!(index.raw.is_empty());
        assert_eq!(index.text, "");
        assert_eq!(pos, INDEX_ENTRY_SIZE as u64);
    }

    #[test]
    fn label_without_terminator_stays_in_bounds() {
        let mut bytes = entry(8, 0, b"");
        for b in &mut bytes[11..] {
            *b = b'x';
        }
        let (index, _) = read_one(bytes, SourceEncoding::Ascii);
        assert_eq!(index.text.len(), INDEX_TEXT_SIZE);
    }

    #[test]
    fn truncated_entry_is_an_io_error() {
        let mut bytes = entry(8, 0, b"Short");
        bytes.truncate(30);
        let mut cursor = CardCursor::new(Cursor::new(bytes));
        let decoder = TextDecoder::new(SourceEncoding::Ascii);
        assert!(matches!(
            CardIndex::read(&mut cursor, &decoder, 0),
            Err(CardError::Io(_))
        ));
    }
}

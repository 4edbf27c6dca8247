use crate::card_cursor::CardCursor;
use crate::card_file_type::CardFileType;
use crate::error::CardError;
use log::debug;
use std::io::{Read, Seek};

/// The fixed header at the start of a card file.
///
/// Layout after the 3-byte signature:
/// - `RRG`: last object id (u32), card count (u16)
/// - `MGC`: card count (u16)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFileHeader {
    /// Which of the two formats the file uses.
    pub file_type: CardFileType,
    /// Id of the last OLE object, present only in `RRG` files.
    pub last_object_id: Option<u32>,
    /// Number of entries in the index table.
    pub total_cards: u16,
}

impl CardFileHeader {
    /// Reads the signature and the header that follows it.
    ///
    /// Nothing past the signature is read when it is not recognised.
    pub fn read<R: Read + Seek>(cursor: &mut CardCursor<R>) -> Result<Self, CardError> {
        let signature = cursor.read_array::<3>()?;
        let file_type = CardFileType::from_signature(&signature)
            .ok_or(CardError::UnrecognizedSignature(signature))?;

        let header = match file_type {
            CardFileType::Rrg => {
                let last_object_id = cursor.read_u32()?;
                let total_cards = cursor.read_u16()?;
                CardFileHeader {
                    file_type,
                    last_object_id: Some(last_object_id),
                    total_cards,
                }
            }
            CardFileType::Mgc => CardFileHeader {
                file_type,
                last_object_id: None,
                total_cards: cursor.read_u16()?,
            },
        };

        debug!(
            "{} card file, total cards: {}",
            file_type.name(),
            header.total_cards
        );
        Ok(header)
    }

    /// Size in bytes of the header, signature included.
    pub fn size(&self) -> u64 {
        match self.file_type {
            CardFileType::Rrg => 9,
            CardFileType::Mgc => 5,
        }
    }
}

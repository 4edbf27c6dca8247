use crate::card_cursor::CardCursor;
use crate::card_file_type::CardFileType;
use crate::error::CardError;
use crate::text_decoder::TextDecoder;
use log::trace;
use std::io::{Read, Seek};

/// Added to the stored text length of an `RRG` card without an object.
pub const RRG_TEXT_LENGTH_ADJUSTMENT: usize = 3;

/// Bytes of bitmap geometry that precede an `MGC` bitmap.
pub const MGC_BITMAP_GEOMETRY_SIZE: i64 = 10;

/// Clipboard format id of a metafile picture (`CF_METAFILEPICT`).
pub const CF_METAFILEPICT: u32 = 3;

/// The decoded body of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    /// An `RRG` card with no embedded object.
    PlainText { raw: Vec<u8>, text: String },
    /// An `RRG` card carrying an OLE object.
    ///
    /// Only the object header is read; the object data, its placement and the
    /// card text that follow it are left untouched.
    UnsupportedObject {
        uid: u32,
        format_id: u32,
        class_name_length: u32,
    },
    /// An `MGC` card. Any bitmap is skipped.
    BitmapThenText { raw: Vec<u8>, text: String },
}

impl CardBody {
    /// Decodes the body at `offset`, leaving the cursor where it was.
    ///
    /// Returns `Ok(None)` without touching the cursor when `offset` is `None`.
    /// The cursor position is restored on error as well.
    pub fn read<R: Read + Seek>(
        cursor: &mut CardCursor<R>,
        file_type: CardFileType,
        decoder: &TextDecoder,
        offset: Option<u32>,
    ) -> Result<Option<Self>, CardError> {
        let Some(offset) = offset else {
            return Ok(None);
        };

        cursor
            .with_saved_position(|cursor| {
                cursor.seek_absolute(u64::from(offset))?;
                match file_type {
                    CardFileType::Rrg => Self::read_rrg(cursor, decoder),
                    CardFileType::Mgc => Self::read_mgc(cursor, decoder),
                }
            })
            .map(Some)
    }

    fn read_rrg<R: Read + Seek>(
        cursor: &mut CardCursor<R>,
        decoder: &TextDecoder,
    ) -> Result<Self, CardError> {
        let object_flag = cursor.read_u16()?;

        if object_flag == 0 {
            let text_length = usize::from(cursor.read_u16()?) + RRG_TEXT_LENGTH_ADJUSTMENT;
            let raw = cursor.read_exact(text_length)?;
            let text = decoder.decode(&raw);
            return Ok(CardBody::PlainText { raw, text });
        }

        // 2 - 5     UID
        // 6 - x     OLE object, starting with version, format and class name
        // x+1 - x+14  DIB size, placement, object kind
        // x+15 - x+16 text length, then text
        let uid = cursor.read_u32()?;
        let _ole_version = cursor.read_u32()?;
        let format_id = cursor.read_u32()?;
        let class_name_length = cursor.read_u32()?;
        trace!("OLE object {uid}, format {format_id}, class name length {class_name_length}");

        Ok(CardBody::UnsupportedObject {
            uid,
            format_id,
            class_name_length,
        })
    }

    fn read_mgc<R: Read + Seek>(
        cursor: &mut CardCursor<R>,
        decoder: &TextDecoder,
    ) -> Result<Self, CardError> {
        let bitmap_length = cursor.read_u16()?;
        if bitmap_length > 0 {
            trace!("Skipping {bitmap_length} byte bitmap");
            cursor.seek_relative(MGC_BITMAP_GEOMETRY_SIZE + i64::from(bitmap_length))?;
        }

        let text_length = cursor.read_u16()?;
        let raw = cursor.read_exact(usize::from(text_length))?;
        let text = decoder.decode(&raw);
        Ok(CardBody::BitmapThenText { raw, text })
    }

    /// The card text, if this body carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            CardBody::PlainText { text, .. } | CardBody::BitmapThenText { text, .. } => Some(text),
            CardBody::UnsupportedObject { .. } => None,
        }
    }

    /// The card text bytes as stored, if this body carries any.
    pub fn raw(&self) -> Option<&[u8]> {
        match self {
            CardBody::PlainText { raw, .. } | CardBody::BitmapThenText { raw, .. } => Some(raw),
            CardBody::UnsupportedObject { .. } => None,
        }
    }

    /// Whether this is an OLE object holding a metafile picture.
    pub fn is_metafile_picture(&self) -> bool {
        matches!(
            self,
            CardBody::UnsupportedObject { format_id, .. } if *format_id == CF_METAFILEPICT
        )
    }
}

use crate::card_body::CardBody;
use crate::card_cursor::CardCursor;
use crate::card_file_header::CardFileHeader;
use crate::card_index::CardIndex;
use crate::decode_options::DecodeOptions;
use crate::error::CardError;
use crate::text_decoder::TextDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// A card: its index entry and, for occupied slots, its decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub index: CardIndex,
    /// `None` when the index slot is empty.
    pub body: Option<CardBody>,
}

/// A fully decoded card file.
///
/// ```rust,no_run
/// use crd_rs::{CardFile, DecodeOptions, SourceEncoding};
///
/// let options = DecodeOptions::default().with_encoding(SourceEncoding::Windows1251);
/// let file = CardFile::open("contacts.crd", &options).unwrap();
///
/// for card in &file.cards {
///     println!("{}: {}", card.index.number(), card.index.text);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFile {
    pub header: CardFileHeader,
    /// One entry per index slot, in file order.
    pub cards: Vec<Card>,
}

impl CardFile {
    /// Opens and decodes the card file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self, CardError> {
        let path = path.as_ref();
        debug!("Opening card file {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Decodes a whole card file from any seekable source.
    ///
    /// The first error aborts the decode; no partial result is returned.
    pub fn from_reader<R: Read + Seek>(
        reader: R,
        options: &DecodeOptions,
    ) -> Result<Self, CardError> {
        let mut reader = CardReader::new(reader, options)?;
        let header = *reader.header();
        let cards = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
        Ok(CardFile { header, cards })
    }

    /// Cards whose index slot is in use.
    pub fn occupied(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| !card.index.is_empty())
    }
}

/// Streams cards out of a card file one index entry at a time.
///
/// The header is read by [`CardReader::new`]. Iteration yields exactly
/// `total_cards` items and stops after the first error.
#[derive(Debug)]
pub struct CardReader<R> {
    cursor: CardCursor<R>,
    header: CardFileHeader,
    decoder: TextDecoder,
    next_ordinal: u32,
    failed: bool,
}

impl<R: Read + Seek> CardReader<R> {
    /// Reads the file header and positions the reader at the index table.
    pub fn new(reader: R, options: &DecodeOptions) -> Result<Self, CardError> {
        let mut cursor = CardCursor::new(reader);
        let header = CardFileHeader::read(&mut cursor)?;
        debug!("Index table at {:#x}", header.size());
        Ok(CardReader {
            cursor,
            header,
            decoder: options.text_decoder(),
            next_ordinal: 0,
            failed: false,
        })
    }

    /// The header read when the reader was created.
    pub fn header(&self) -> &CardFileHeader {
        &self.header
    }

    fn read_card(&mut self, ordinal: u16) -> Result<Card, CardError> {
        let index = CardIndex::read(&mut self.cursor, &self.decoder, ordinal)?;
        let body = CardBody::read(
            &mut self.cursor,
            self.header.file_type,
            &self.decoder,
            index.offset,
        )?;
        Ok(Card { index, body })
    }
}

impl<R: Read + Seek> Iterator for CardReader<R> {
    type Item = Result<Card, CardError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_ordinal >= u32::from(self.header.total_cards) {
            return None;
        }
        // Bounded by `total_cards`, which is a u16.
        let ordinal = self.next_ordinal as u16;
        self.next_ordinal += 1;

        let card = self.read_card(ordinal);
        if card.is_err() {
            self.failed = true;
        }
        Some(card)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (u32::from(self.header.total_cards) - self.next_ordinal) as usize;
        (0, Some(remaining))
    }
}

impl<R: Read + Seek> std::iter::FusedIterator for CardReader<R> {}

//! # crd-rs
//!
//! `crd-rs` is a pure Rust reader for Windows Cardfile (`.crd`) contact card files.
//! It decodes both on-disk formats, `RRG` and `MGC`, into index lines and card text.
//!
//! ## Features
//! - Detects the format from the file signature
//! - Walks the index table and decodes each card body
//! - Skips bitmaps (`MGC`) and recognises OLE objects (`RRG`) without decoding them
//! - Optional Windows-1251 to UTF-8 transcoding of Cyrillic text
//! - Read-only, single pass over the index table
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! crd-rs = "0.1"
//! ```
//!
//! ### Example: Listing Cards
//! ```rust,no_run
//! use crd_rs::{CardFile, DecodeOptions, SourceEncoding};
//!
//! let options = DecodeOptions::default().with_encoding(SourceEncoding::Windows1251);
//! let file = CardFile::open("path/to/contacts.crd", &options).unwrap();
//!
//! println!("{} card file, {} cards", file.header.file_type.name(), file.header.total_cards);
//! for card in file.occupied() {
//!     println!("{}. {}", card.index.number(), card.index.text);
//!     if let Some(text) = card.body.as_ref().and_then(|body| body.text()) {
//!         println!("{text}");
//!     }
//! }
//! ```

pub mod card_body;
pub mod card_cursor;
pub mod card_file;
pub mod card_file_header;
pub mod card_file_type;
pub mod card_index;
pub mod decode_options;
pub mod error;
mod ext;
pub mod source_encoding;
pub mod text_decoder;

pub use card_body::CardBody;
pub use card_file::{Card, CardFile, CardReader};
pub use card_file_header::CardFileHeader;
pub use card_file_type::CardFileType;
pub use card_index::CardIndex;
pub use decode_options::DecodeOptions;
pub use error::CardError;
pub use source_encoding::SourceEncoding;

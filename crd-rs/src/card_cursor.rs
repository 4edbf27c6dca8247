use crate::error::CardError;
use crate::ext::io_ext::{ByteReadExt, SeekExt};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// A read position captured by [`CardCursor::save_position`].
///
/// Restoring it puts the cursor back exactly where it was when it was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPosition(u64);

impl SavedPosition {
    /// The absolute byte offset this position refers to.
    pub fn offset(self) -> u64 {
        self.0
    }
}

/// Random-access reader over a card file.
///
/// The cursor owns its byte source for the whole decode. Every position change
/// goes through one of the explicit seek methods; nothing seeks implicitly.
#[derive(Debug)]
pub struct CardCursor<R> {
    reader: R,
}

impl<R: Read + Seek> CardCursor<R> {
    /// Wraps a seekable byte source.
    pub fn new(reader: R) -> Self {
        CardCursor { reader }
    }

    /// Reads exactly `count` bytes.
    pub fn read_exact(&mut self, count: usize) -> Result<Vec<u8>, CardError> {
        Ok(self.reader.read_bytes(count)?)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CardError> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, CardError> {
        Ok(self.reader.read_u8()?)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, CardError> {
        Ok(self.reader.read_u16::<LittleEndian>()?)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, CardError> {
        Ok(self.reader.read_u32::<LittleEndian>()?)
    }

    /// Moves to `offset` bytes from the start of the file.
    pub fn seek_absolute(&mut self, offset: u64) -> Result<u64, CardError> {
        Ok(self.reader.seek(SeekFrom::Start(offset))?)
    }

    /// Moves `delta` bytes relative to the current position.
    pub fn seek_relative(&mut self, delta: i64) -> Result<u64, CardError> {
        Ok(self.reader.skip(delta)?)
    }

    /// Current absolute position.
    pub fn position(&mut self) -> Result<u64, CardError> {
        Ok(self.reader.stream_position()?)
    }

    /// Captures the current position for a later [`CardCursor::restore_position`].
    pub fn save_position(&mut self) -> Result<SavedPosition, CardError> {
        Ok(SavedPosition(self.position()?))
    }

    /// Moves back to a position captured by [`CardCursor::save_position`].
    pub fn restore_position(&mut self, saved: SavedPosition) -> Result<(), CardError> {
        self.seek_absolute(saved.offset())?;
        Ok(())
    }

    /// Runs `f` and then puts the cursor back where it was, whether `f`
    /// succeeded or not.
    ///
    /// If both `f` and the restore fail, the error from `f` is returned.
    pub fn with_saved_position<T, F>(&mut self, f: F) -> Result<T, CardError>
    where
        F: FnOnce(&mut Self) -> Result<T, CardError>,
    {
        let saved = self.save_position()?;
        let result = f(self);
        let restored = self.restore_position(saved);
        let value = result?;
        restored?;
        Ok(value)
    }
}

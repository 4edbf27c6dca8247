use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

/// A trait that reads length-prefixed byte runs from any `Read` type.
pub trait ByteReadExt: Read {
    /// Reads exactly `count` bytes, failing with `UnexpectedEof` on a short read.
    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>>;
}

impl<T> ByteReadExt for T
where
    T: Read,
{
    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut result: Vec<u8> = Vec::new();

        result
            .try_reserve_exact(count)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        result.resize(count, 0);

        self.read_exact(&mut result)?;

        Ok(result)
    }
}

/// Utility methods for working with seekable streams.
pub trait SeekExt: Seek {
    /// Skips over the given number of bytes from the current position.
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        i64: TryFrom<P>;
}

impl<T> SeekExt for T
where
    T: Seek,
{
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        i64: TryFrom<P>,
    {
        let size = i64::try_from(size).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;

        self.seek(SeekFrom::Current(size))
    }
}

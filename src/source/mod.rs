//! Seekable byte sources the parser reads from.
//!
//! A `ByteSource` is a finite byte stream with a cursor. The parser only ever asks for one byte
//! at a time, peeks one byte ahead to detect folded lines, and rewinds to the start when an
//! enumeration pass restarts.
//!
//! Two backends are provided:
//! - [`MemorySource`] over anything that derefs to a byte slice (`&[u8]`, `Vec<u8>`,
//!   `Arc<[u8]>`). This is what a fetcher hands over once a download completed.
//! - [`FileSource`] over a buffered file, mostly useful for local testing.

mod file;
pub use file::FileSource;

mod memory;
pub use memory::MemorySource;

/// Error arising when reading from a `ByteSource`
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("read past the end of the byte source")]
    EndOfStream,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PartialEq for SourceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EndOfStream, Self::EndOfStream) => true,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

pub trait ByteSource {
    /// Reposition the cursor to byte 0.
    fn seek_start(&mut self) -> Result<(), SourceError>;

    fn is_eof(&mut self) -> Result<bool, SourceError>;

    /// Fill `buf` completely, advancing the cursor.
    ///
    /// Fails with `SourceError::EndOfStream` if fewer than `buf.len()` bytes remain. The cursor
    /// position after such a failure is unspecified.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Return the next byte without advancing.
    fn peek(&mut self) -> Result<u8, SourceError>;

    #[inline]
    fn read_byte(&mut self) -> Result<u8, SourceError> {
        let mut byte = [0u8; 1];
        self.read(&mut byte)?;
        Ok(byte[0])
    }

    /// Read up to the next `\n`, returning the bytes before it.
    ///
    /// The newline itself is consumed but not returned. A last line without newline is returned
    /// as is. Fails with `SourceError::EndOfStream` if the source is already exhausted.
    fn read_line(&mut self) -> Result<Vec<u8>, SourceError> {
        if self.is_eof()? {
            return Err(SourceError::EndOfStream);
        }
        let mut line = vec![];
        while !self.is_eof()? {
            match self.read_byte()? {
                b'\n' => break,
                byte => line.push(byte),
            }
        }
        Ok(line)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn seek_start(&mut self) -> Result<(), SourceError> {
        (**self).seek_start()
    }

    #[inline]
    fn is_eof(&mut self) -> Result<bool, SourceError> {
        (**self).is_eof()
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        (**self).read(buf)
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, SourceError> {
        (**self).peek()
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, SourceError> {
        (**self).read_byte()
    }
}

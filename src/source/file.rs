use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek};
use std::path::Path;

use super::{ByteSource, SourceError};

/// Buffered file-backed byte source.
#[derive(Debug)]
pub struct FileSource {
    reader: BufReader<File>,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Ok(Self::new(File::open(path)?))
    }

    pub fn new(file: File) -> Self {
        Self {
            reader: BufReader::new(file),
        }
    }
}

impl ByteSource for FileSource {
    fn seek_start(&mut self) -> Result<(), SourceError> {
        // Discards the read buffer as well
        self.reader.rewind()?;
        Ok(())
    }

    fn is_eof(&mut self) -> Result<bool, SourceError> {
        Ok(self.reader.fill_buf()?.is_empty())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        self.reader.read_exact(buf).map_err(|err| match err.kind() {
            ErrorKind::UnexpectedEof => SourceError::EndOfStream,
            _ => SourceError::Io(err),
        })
    }

    fn peek(&mut self) -> Result<u8, SourceError> {
        self.reader
            .fill_buf()?
            .first()
            .copied()
            .ok_or(SourceError::EndOfStream)
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        let byte = self.peek()?;
        self.reader.consume(1);
        Ok(byte)
    }
}

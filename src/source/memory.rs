use super::{ByteSource, SourceError};

/// In-memory byte source.
///
/// The buffer is never mutated, so a fetcher can publish a fully downloaded `Arc<[u8]>` and keep
/// its own handle to it.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<B: AsRef<[u8]>> {
    buf: B,
    pos: usize,
}

impl<'a> MemorySource<&'a [u8]> {
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::new(slice)
    }
}

impl<B: AsRef<[u8]>> MemorySource<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn remaining(&self) -> &[u8] {
        // pos never exceeds len, see read()
        &self.buf.as_ref()[self.pos..]
    }
}

impl<B: AsRef<[u8]>> From<B> for MemorySource<B> {
    fn from(buf: B) -> Self {
        Self::new(buf)
    }
}

impl<B: AsRef<[u8]>> ByteSource for MemorySource<B> {
    #[inline]
    fn seek_start(&mut self) -> Result<(), SourceError> {
        self.pos = 0;
        Ok(())
    }

    #[inline]
    fn is_eof(&mut self) -> Result<bool, SourceError> {
        Ok(self.remaining().is_empty())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let Some(chunk) = self.remaining().get(..buf.len()) else {
            return Err(SourceError::EndOfStream);
        };
        buf.copy_from_slice(chunk);
        self.pos += buf.len();
        Ok(())
    }

    #[inline]
    fn peek(&mut self) -> Result<u8, SourceError> {
        self.remaining()
            .first()
            .copied()
            .ok_or(SourceError::EndOfStream)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, SourceError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }
}

//! Assemble logical lines from a `ByteSource`.
//!
//! A logical line is built from one or more physical lines:
//! - carriage returns are dropped,
//! - a newline followed by a space or tab is a fold and both bytes are elided,
//! - backslash escapes are decoded on the fly (see [`super::escape`]).
//!
//! The decoded bytes go into a [`LineBuffer`] of fixed capacity. Bytes beyond the capacity are
//! counted and dropped.
//!
//! # Examples
//!
//! ```rust
//! use icsfeed::parser::{LineBuffer, LineReader};
//! use icsfeed::source::MemorySource;
//!
//! let mut reader = LineReader::new(MemorySource::from_slice(b"SUMMARY:Long\r\n  title\r\n"));
//! let mut line = LineBuffer::with_capacity(64);
//! assert!(reader.read_into(&mut line).unwrap());
//! assert_eq!(line.as_str(), "SUMMARY:Long title");
//! assert!(!reader.read_into(&mut line).unwrap());
//! ```

use std::borrow::Cow;

use super::EscapeDecoder;
use crate::source::{ByteSource, SourceError};

const FOLD_MARKERS: [u8; 2] = [b' ', b'\t'];

/// Fixed-capacity decode buffer for one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
    dropped: usize,
    number: usize,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
            number: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.dropped = 0;
    }

    /// Append one byte, dropping it if the buffer is full.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if self.bytes.len() < self.capacity {
            self.bytes.push(byte);
        } else {
            self.dropped += 1;
        }
    }

    /// Number of bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of decoded bytes that did not fit.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }

    /// Physical line number (1-based) the logical line started on.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text. Invalid UTF-8, e.g. a character cut by truncation, is replaced.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Reads logical lines from a `ByteSource`.
#[derive(Debug)]
pub struct LineReader<S: ByteSource> {
    source: S,
    line: usize,
}

impl<S: ByteSource> LineReader<S> {
    pub fn new(source: S) -> Self {
        Self { source, line: 0 }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the byte source, returning the previous one. The reader starts over at line 0
    /// but the new source is not rewound.
    pub fn replace_source(&mut self, source: S) -> S {
        self.line = 0;
        std::mem::replace(&mut self.source, source)
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn rewind(&mut self) -> Result<(), SourceError> {
        self.source.seek_start()?;
        self.line = 0;
        Ok(())
    }

    /// Physical lines consumed since the last rewind.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn is_eof(&mut self) -> Result<bool, SourceError> {
        self.source.is_eof()
    }

    /// Decode the next logical line into `buf`.
    ///
    /// Returns `false` if the source had no byte left to start a line with. Any line, even an
    /// empty one, yields `true`.
    pub fn read_into(&mut self, buf: &mut LineBuffer) -> Result<bool, SourceError> {
        if self.source.is_eof()? {
            return Ok(false);
        }
        buf.clear();
        buf.number = self.line + 1;
        let mut decoder = EscapeDecoder::new();

        while !self.source.is_eof()? {
            let byte = self.source.read_byte()?;
            match byte {
                b'\r' => continue,
                b'\n' => {
                    self.line += 1;
                    if !self.source.is_eof()? && FOLD_MARKERS.contains(&self.source.peek()?) {
                        self.source.read_byte()?;
                        continue;
                    }
                    return Ok(true);
                }
                _ => {
                    if let Some(decoded) = decoder.decode(byte) {
                        buf.push(decoded);
                    }
                }
            }
        }

        // Last line without newline
        self.line += 1;
        Ok(true)
    }
}

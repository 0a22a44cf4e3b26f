//! Backslash escape decoding for content line bytes.
//!
//! `\n` and `\t` decode to newline and tab. Any other escaped byte is emitted as is, which covers
//! `\\`, `\,` and `\;`.

const ESCAPE: u8 = b'\\';

/// Byte-at-a-time escape decoder.
///
/// Keeps a single "escape pending" flag between calls, so it can be fed straight from a byte
/// source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapeDecoder {
    pending: bool,
}

impl EscapeDecoder {
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Decode one input byte, returning the output byte if any.
    #[inline]
    pub fn decode(&mut self, byte: u8) -> Option<u8> {
        if self.pending {
            self.pending = false;
            return Some(match byte {
                b'n' => b'\n',
                b't' => b'\t',
                other => other,
            });
        }
        if byte == ESCAPE {
            self.pending = true;
            return None;
        }
        Some(byte)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[inline]
    pub fn reset(&mut self) {
        self.pending = false;
    }
}

/// Decode a whole byte slice. A trailing lone backslash is dropped.
pub fn unescape(input: &[u8]) -> Vec<u8> {
    let mut decoder = EscapeDecoder::new();
    input
        .iter()
        .filter_map(|&byte| decoder.decode(byte))
        .collect()
}

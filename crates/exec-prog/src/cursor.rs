use crate::error::{DecodeError, Result};
use crate::format::{padded_len, WORD_SIZE};

/// Forward-only reader over an encoded exec program.
///
/// A failed read leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct WordCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> WordCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Byte offset of the next unread word.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn read_word(&mut self) -> Result<u64> {
        let bytes = self.take(WORD_SIZE as u64)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(bytes);
        Ok(u64::from_ne_bytes(word))
    }

    /// Reads `size` bytes and skips the padding up to the next word boundary.
    pub fn read_blob(&mut self, size: u64) -> Result<&'a [u8]> {
        let padded = padded_len(size).ok_or_else(|| self.overflow(u64::MAX))?;
        let start = self.pos;
        self.take(padded)?;
        // `take` succeeded, so `size <= padded` fits in the buffer.
        Ok(&self.bytes[start..start + size as usize])
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        let len_usize = match usize::try_from(len) {
            Ok(len) if len <= remaining => len,
            _ => return Err(self.overflow(len)),
        };
        let start = self.pos;
        self.pos += len_usize;
        Ok(&self.bytes[start..self.pos])
    }

    fn overflow(&self, needed: u64) -> DecodeError {
        DecodeError::Overflow {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }
}

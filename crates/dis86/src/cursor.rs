use crate::decoder::DecodeError;

/// Forward-only reader over an instruction byte stream.
///
/// Every read consumes what it returns; a read that would run past the end of the buffer fails
/// with [`DecodeError::UnexpectedEndOfInput`] and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pos < self.bytes.len()
    }

    pub fn next_u8(&mut self) -> Result<u8, DecodeError> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEndOfInput { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    /// Read a little-endian word (low byte first).
    pub fn next_u16_le(&mut self) -> Result<u16, DecodeError> {
        let end = self.pos + 2;
        let raw = self
            .bytes
            .get(self.pos..end)
            .ok_or(DecodeError::UnexpectedEndOfInput { offset: self.pos })?;
        let v = (u16::from(raw[1]) << 8) | u16::from(raw[0]);
        self.pos = end;
        Ok(v)
    }
}

//! Read cursor over an in-memory patch
//!
//! GF1 patches mix absolute offsets (header count fields) with implicit
//! offsets (each sample record starts where the previous payload ended).
//! The cursor keeps one position and exposes both kinds of movement.
//! Moving past the end is allowed; only reads can fail.

use crate::PatchError;

/// A read that ran past the end of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRead {
    /// Absolute offset of the failed read
    pub offset: usize,
    /// Bytes the read required
    pub needed: usize,
    /// Bytes left at `offset`
    pub available: usize,
}

impl ShortRead {
    /// Attribute the short read to the file header
    pub fn in_header(self) -> PatchError {
        PatchError::TruncatedHeader {
            offset: self.offset,
            needed: self.needed,
            available: self.available,
        }
    }

    /// Attribute the short read to sample record `sample`
    pub fn in_sample(self, sample: usize) -> PatchError {
        PatchError::TruncatedSample {
            sample,
            offset: self.offset,
            needed: self.needed,
            available: self.available,
        }
    }
}

/// Byte cursor with explicit seek and skip operations
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at offset 0
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    /// Current absolute position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    /// Advance by `count` bytes without reading them
    pub fn skip(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count);
    }

    /// Bytes between the cursor and the end of the source
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Read exactly `count` bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ShortRead> {
        let remaining = self.remaining();
        if remaining.len() < count {
            return Err(ShortRead {
                offset: self.pos,
                needed: count,
                available: remaining.len(),
            });
        }
        self.pos += count;
        Ok(&remaining[..count])
    }

    /// Read up to `count` bytes, returning fewer at end of source
    pub fn read_at_most(&mut self, count: usize) -> &'a [u8] {
        let remaining = self.remaining();
        let taken = &remaining[..count.min(remaining.len())];
        self.pos += taken.len();
        taken
    }

    /// Read one unsigned byte
    pub fn read_u8(&mut self) -> Result<u8, ShortRead> {
        self.read_bytes(1).map(|bytes| bytes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads_advance() {
        let data = [1u8, 2, 3, 4];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_seek_and_skip() {
        let data = [0u8, 10, 20, 30, 40];
        let mut cursor = ByteCursor::new(&data);
        cursor.seek(3);
        assert_eq!(cursor.read_u8().unwrap(), 30);
        cursor.seek(0);
        cursor.skip(1);
        assert_eq!(cursor.read_u8().unwrap(), 10);
    }

    #[test]
    fn test_skip_past_end_is_allowed() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(40);
        assert_eq!(cursor.position(), 40);
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn test_short_read_reports_offset() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        cursor.seek(2);
        let err = cursor.read_bytes(4).unwrap_err();
        assert_eq!(
            err,
            ShortRead {
                offset: 2,
                needed: 4,
                available: 2
            }
        );
        // Failed reads leave the cursor where it was
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_read_at_most_clamps() {
        let data = *b"GF1";
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_at_most(11), b"GF1");
        assert_eq!(cursor.position(), 3);
    }
}

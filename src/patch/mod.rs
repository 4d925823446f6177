//! GF1 Patch Format Parsing
//!
//! A patch is a fixed header (magic, instrument/layer/sample counts) followed
//! by `sample_count` sample records. [`PatchReader`] walks both with a single
//! [`ByteCursor`].

pub mod cursor;
pub mod header;
pub mod sample;

pub use cursor::{ByteCursor, ShortRead};
pub use header::{corrected_count, parse_header, HeaderInfo, MAGIC_STRINGS};
pub use sample::{decode_sample, record_header, SampleInfo, SampleMode, RECORD_HEADER_LEN};

use crate::observer::SampleObserver;
use crate::{AudioUnit, Result};

/// Sequential reader over one patch held in memory
pub struct PatchReader<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> PatchReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        PatchReader {
            cursor: ByteCursor::new(data),
        }
    }

    /// Validate the header and position the cursor at the first sample record
    pub fn read_header(&mut self) -> Result<HeaderInfo> {
        parse_header(&mut self.cursor)
    }

    /// Decode the sample record at the current position
    pub fn read_sample<O>(&mut self, index: usize, observer: &mut O) -> Result<AudioUnit>
    where
        O: SampleObserver + ?Sized,
    {
        decode_sample(&mut self.cursor, index, observer)
    }

    /// Decode the header and every sample, in file order.
    ///
    /// Any error discards the samples decoded so far.
    pub fn read_all<O>(&mut self, observer: &mut O) -> Result<Vec<AudioUnit>>
    where
        O: SampleObserver + ?Sized,
    {
        let header = self.read_header()?;
        observer.on_header(&header);

        let mut samples = Vec::with_capacity(header.sample_count as usize);
        for index in 0..header.sample_count as usize {
            samples.push(self.read_sample(index, observer)?);
        }
        Ok(samples)
    }
}

//! GF1 patch file header
//!
//! Only the magic identifier and the three count fields are decoded. The
//! instrument and layer records that follow them are not interpreted.

use super::cursor::ByteCursor;
use crate::{PatchError, Result};
use serde::Serialize;

/// Recognised magic identifiers (version 1.10 and 1.00)
pub const MAGIC_STRINGS: [&[u8; 11]; 2] = [b"GF1PATCH110", b"GF1PATCH100"];

/// Length of the magic identifier at offset 0
pub const MAGIC_LEN: usize = 11;

/// Absolute offset of the instrument count byte
pub const INSTRUMENT_COUNT_OFFSET: usize = 82;

/// Absolute offset of the layer count byte
pub const LAYER_COUNT_OFFSET: usize = 151;

/// Absolute offset of the sample count byte
pub const SAMPLE_COUNT_OFFSET: usize = 198;

/// Reserved bytes between the sample count and the first sample record
pub const LAYER_RESERVED_LEN: usize = 40;

/// Decoded header counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    /// Number of instruments, never zero
    pub instrument_count: u8,
    /// Number of layers, never zero
    pub layer_count: u8,
    /// Number of sample records that follow the header
    pub sample_count: u8,
}

/// Apply the "zero means one" rule some patch editors rely on.
///
/// Already-corrected values pass through unchanged.
pub fn corrected_count(raw: u8) -> u8 {
    if raw == 0 {
        1
    } else {
        raw
    }
}

/// Check whether `magic` is one of the recognised identifiers
pub fn is_valid_magic(magic: &[u8]) -> bool {
    MAGIC_STRINGS.iter().any(|m| m.as_slice() == magic)
}

/// Validate the header and leave the cursor at the first sample record.
pub fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<HeaderInfo> {
    cursor.seek(0);
    let magic = cursor.read_at_most(MAGIC_LEN);
    if !is_valid_magic(magic) {
        return Err(PatchError::BadHeader);
    }

    cursor.seek(INSTRUMENT_COUNT_OFFSET);
    let instrument_count = corrected_count(cursor.read_u8().map_err(|e| e.in_header())?);
    if instrument_count == 0 {
        return Err(PatchError::TooManyInstruments {
            count: instrument_count,
        });
    }

    cursor.seek(LAYER_COUNT_OFFSET);
    let layer_count = corrected_count(cursor.read_u8().map_err(|e| e.in_header())?);
    if layer_count == 0 {
        return Err(PatchError::TooManyLayers { count: layer_count });
    }

    cursor.seek(SAMPLE_COUNT_OFFSET);
    let sample_count = cursor.read_u8().map_err(|e| e.in_header())?;

    cursor.skip(LAYER_RESERVED_LEN);

    Ok(HeaderInfo {
        instrument_count,
        layer_count,
        sample_count,
    })
}

//! PCM normalisation helpers
//!
//! GF1 samples come in four encodings: signed or unsigned, 8 or 16 bits.
//! Decoded 16-bit output is always little-endian signed; 8-bit payloads are
//! passed through untouched and only converted when written to WAV.

/// Offset between unsigned and signed 16-bit PCM
const UNSIGNED_16_BIAS: i32 = 0x8000;

/// Offset between unsigned and signed 8-bit PCM
const UNSIGNED_8_BIAS: i16 = 0x80;

/// A 16-bit buffer that does not hold a whole number of frames
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("16-bit PCM buffer has odd length {length}")]
pub struct OddLength {
    /// Length of the rejected buffer in bytes
    pub length: usize,
}

/// Convert a 16-bit little-endian payload to little-endian signed PCM.
///
/// With `unsigned` set every frame is re-centred on zero (`u - 32768`),
/// otherwise frames are copied through unchanged. The output always has the
/// same length as the input.
pub fn to_signed_le16(data: &[u8], unsigned: bool) -> Result<Vec<u8>, OddLength> {
    if !data.len().is_multiple_of(2) {
        return Err(OddLength { length: data.len() });
    }

    let mut out = Vec::with_capacity(data.len());
    for frame in data.chunks_exact(2) {
        let value = if unsigned {
            (u16::from_le_bytes([frame[0], frame[1]]) as i32 - UNSIGNED_16_BIAS) as i16
        } else {
            i16::from_le_bytes([frame[0], frame[1]])
        };
        out.extend_from_slice(&value.to_le_bytes());
    }
    Ok(out)
}

/// View a little-endian signed 16-bit buffer as samples
pub fn samples_i16(data: &[u8]) -> Result<Vec<i16>, OddLength> {
    if !data.len().is_multiple_of(2) {
        return Err(OddLength { length: data.len() });
    }
    Ok(data
        .chunks_exact(2)
        .map(|frame| i16::from_le_bytes([frame[0], frame[1]]))
        .collect())
}

/// Interpret an 8-bit payload as signed samples
pub fn samples_i8(data: &[u8], unsigned: bool) -> Vec<i8> {
    data.iter()
        .map(|&byte| {
            if unsigned {
                (byte as i16 - UNSIGNED_8_BIAS) as i8
            } else {
                byte as i8
            }
        })
        .collect()
}

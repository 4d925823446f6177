//! GF1 sample records
//!
//! Each record is a fixed 96-byte block of metadata followed by
//! `data_length` bytes of PCM payload. Records are packed back to back with
//! no offset table, so decoding is strictly sequential.

use super::cursor::{ByteCursor, ShortRead};
use crate::observer::SampleObserver;
use crate::{pcm, AudioUnit, PatchError, Result};
use bitflags::bitflags;
use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u32, le_u8};
use nom::IResult;
use serde::Serialize;

/// Size of the metadata block preceding every payload
pub const RECORD_HEADER_LEN: usize = 96;

const WAVE_NAME_LEN: usize = 7;
const TUNING_LEN: usize = 2;
const ENVELOPE_TABLES_LEN: usize = 12;
const RECORD_RESERVED_LEN: usize = 36;

bitflags! {
    /// Sample mode flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct SampleMode: u8 {
        /// 16-bit samples (8-bit when clear)
        const SIXTEEN_BIT = 0x01;
        /// Unsigned samples (signed when clear)
        const UNSIGNED = 0x02;
        /// Loop enabled
        const LOOPING = 0x04;
        /// Bidirectional loop
        const PINGPONG = 0x08;
        /// Play backwards
        const REVERSE = 0x10;
        /// Hold at the sustain point
        const SUSTAIN = 0x20;
        /// Envelope enabled
        const ENVELOPE = 0x40;
        /// Clamped release
        const CLAMPED = 0x80;
    }
}

impl SampleMode {
    /// Create mode flags from the raw record byte
    pub fn from_byte(value: u8) -> Self {
        SampleMode::from_bits_retain(value)
    }

    /// Check if samples are 16 bits wide
    pub fn is_16bit(&self) -> bool {
        self.contains(SampleMode::SIXTEEN_BIT)
    }

    /// Check if samples are stored unsigned
    pub fn is_unsigned(&self) -> bool {
        self.contains(SampleMode::UNSIGNED)
    }

    /// Bytes per PCM frame (1 or 2)
    pub fn sample_width(&self) -> u8 {
        if self.is_16bit() {
            2
        } else {
            1
        }
    }
}

/// Metadata decoded from one sample record.
///
/// Loop fractions, envelope, tremolo, vibrato and scale fields are carried
/// as-is and never applied to the PCM data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleInfo {
    /// Loop point fractions: low nibble start, high nibble end (1/16ths)
    pub fractions: u8,
    /// Payload length in bytes
    pub data_length: u32,
    /// Loop start offset in bytes
    pub loop_start: u32,
    /// Loop end offset in bytes
    pub loop_end: u32,
    /// Sample rate in Hz
    pub sample_rate: u16,
    /// Lowest playable frequency (Hz * 1000)
    pub low_freq: u32,
    /// Highest playable frequency (Hz * 1000)
    pub high_freq: u32,
    /// Root frequency (Hz * 1000)
    pub root_freq: u32,
    /// Stereo balance, 0 (left) to 15 (right)
    pub stereo_balance: u8,
    /// Tremolo sweep
    pub tremolo_sweep: u8,
    /// Tremolo rate
    pub tremolo_rate: u8,
    /// Tremolo depth
    pub tremolo_depth: u8,
    /// Vibrato sweep
    pub vibrato_sweep: u8,
    /// Vibrato rate
    pub vibrato_rate: u8,
    /// Vibrato depth
    pub vibrato_depth: u8,
    /// Mode flags
    pub modes: SampleMode,
    /// Scale frequency
    pub scale_freq: u16,
    /// Scale factor
    pub scale_factor: u16,
}

impl SampleInfo {
    /// Loop start fraction in sixteenths
    pub fn loop_start_fraction(&self) -> u8 {
        self.fractions & 0x0F
    }

    /// Loop end fraction in sixteenths
    pub fn loop_end_fraction(&self) -> u8 {
        (self.fractions >> 4) & 0x0F
    }

    /// Bytes per PCM frame of the decoded output
    pub fn sample_width(&self) -> u8 {
        self.modes.sample_width()
    }
}

/// Parse the 96-byte metadata block of a sample record
pub fn record_header(input: &[u8]) -> IResult<&[u8], SampleInfo> {
    let (input, _wave_name) = take(WAVE_NAME_LEN)(input)?;
    let (input, fractions) = le_u8(input)?;
    let (input, data_length) = le_u32(input)?;
    let (input, loop_start) = le_u32(input)?;
    let (input, loop_end) = le_u32(input)?;
    let (input, sample_rate) = le_u16(input)?;
    let (input, low_freq) = le_u32(input)?;
    let (input, high_freq) = le_u32(input)?;
    let (input, root_freq) = le_u32(input)?;
    let (input, _tuning) = take(TUNING_LEN)(input)?;
    let (input, stereo_balance) = le_u8(input)?;
    let (input, _envelope_tables) = take(ENVELOPE_TABLES_LEN)(input)?;
    let (input, tremolo_sweep) = le_u8(input)?;
    let (input, tremolo_rate) = le_u8(input)?;
    let (input, tremolo_depth) = le_u8(input)?;
    let (input, vibrato_sweep) = le_u8(input)?;
    let (input, vibrato_rate) = le_u8(input)?;
    let (input, vibrato_depth) = le_u8(input)?;
    let (input, modes) = le_u8(input)?;
    let (input, scale_freq) = le_u16(input)?;
    let (input, scale_factor) = le_u16(input)?;
    let (input, _reserved) = take(RECORD_RESERVED_LEN)(input)?;

    Ok((
        input,
        SampleInfo {
            fractions,
            data_length,
            loop_start,
            loop_end,
            sample_rate,
            low_freq,
            high_freq,
            root_freq,
            stereo_balance,
            tremolo_sweep,
            tremolo_rate,
            tremolo_depth,
            vibrato_sweep,
            vibrato_rate,
            vibrato_depth,
            modes: SampleMode::from_byte(modes),
            scale_freq,
            scale_factor,
        },
    ))
}

/// Decode the sample record at the cursor into PCM.
///
/// `index` is only used for error reporting and the observer callback.
pub fn decode_sample<O>(
    cursor: &mut ByteCursor<'_>,
    index: usize,
    observer: &mut O,
) -> Result<AudioUnit>
where
    O: SampleObserver + ?Sized,
{
    let remaining = cursor.remaining();
    let (_, info) = record_header(remaining).map_err(|_| {
        ShortRead {
            offset: cursor.position(),
            needed: RECORD_HEADER_LEN,
            available: remaining.len(),
        }
        .in_sample(index)
    })?;
    cursor.skip(RECORD_HEADER_LEN);

    let length = info.data_length as usize;
    let payload = cursor
        .read_bytes(length)
        .map_err(|e| e.in_sample(index))?;

    observer.on_sample(index, &info);

    // LOOPING does not imply SUSTAIN here; some patch sets omit it on purpose.
    let pcm_data = if info.modes.is_16bit() {
        pcm::to_signed_le16(payload, info.modes.is_unsigned()).map_err(|e| {
            PatchError::OddSampleLength {
                sample: index,
                length: e.length,
            }
        })?
    } else {
        payload.to_vec()
    };

    Ok(AudioUnit {
        pcm_data,
        sample_width_in_bytes: info.sample_width(),
    })
}

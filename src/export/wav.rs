//! WAV file export functionality

use crate::patch::SampleInfo;
use crate::{pcm, AudioUnit, PatchError, Result};
use std::path::Path;

/// Check that `unit` can be written as WAV. `path` is only used in messages.
pub fn check_wav(path: &Path, unit: &AudioUnit, info: &SampleInfo) -> Result<()> {
    if info.sample_rate == 0 {
        return Err(PatchError::Export(format!(
            "cannot write {}: sample rate is 0",
            path.display()
        )));
    }
    if unit.sample_width_in_bytes == 2 && !unit.pcm_data.len().is_multiple_of(2) {
        return Err(PatchError::Export(format!(
            "cannot write {}: 16-bit data has odd length {}",
            path.display(),
            unit.pcm_data.len()
        )));
    }
    Ok(())
}

/// Write one decoded sample to a mono WAV file.
///
/// 16-bit units are already signed little-endian. 8-bit units still carry the
/// patch's own signedness, taken from `info.modes`.
pub fn write_wav(path: &Path, unit: &AudioUnit, info: &SampleInfo) -> Result<()> {
    check_wav(path, unit, info)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: u32::from(info.sample_rate),
        bits_per_sample: u16::from(unit.sample_width_in_bytes) * 8,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| PatchError::Export(format!("Failed to create WAV file: {}", e)))?;

    if unit.sample_width_in_bytes == 2 {
        let samples = pcm::samples_i16(&unit.pcm_data)
            .map_err(|e| PatchError::Export(e.to_string()))?;
        for sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| PatchError::Export(format!("Failed to write sample: {}", e)))?;
        }
    } else {
        for sample in pcm::samples_i8(&unit.pcm_data, info.modes.is_unsigned()) {
            writer
                .write_sample(sample)
                .map_err(|e| PatchError::Export(format!("Failed to write sample: {}", e)))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| PatchError::Export(format!("Failed to finalize WAV file: {}", e)))?;

    Ok(())
}

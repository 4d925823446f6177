//! Output of decoded samples
//!
//! Each [`AudioUnit`] is written to its own file named by sample index:
//! - Raw PCM (always available), byte-for-byte copy of `pcm_data`
//! - WAV (`export-wav` feature), mono at the sample's declared rate
//!
//! # Examples
//!
//! ```no_run
//! use gf1patch::export::{export_samples, ExportConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut infos = Vec::new();
//! let samples = gf1patch::read_with_observer("acpiano.pat", &mut infos)?;
//! let written = export_samples(&samples, &infos, &ExportConfig::default().output_dir("out"))?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

mod raw;
pub use raw::write_raw;

#[cfg(feature = "export-wav")]
mod wav;
#[cfg(feature = "export-wav")]
pub use wav::{check_wav, write_wav};

use crate::patch::SampleInfo;
use crate::{AudioUnit, PatchError, Result};
use std::path::PathBuf;

/// Default file stem prefix for exported samples
pub const DEFAULT_PREFIX: &str = "rawpcm";

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Headerless PCM bytes
    #[default]
    Raw,
    /// RIFF WAVE
    #[cfg(feature = "export-wav")]
    Wav,
}

impl ExportFormat {
    /// File extension including the dot, empty for raw output
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Raw => "",
            #[cfg(feature = "export-wav")]
            ExportFormat::Wav => ".wav",
        }
    }
}

/// Export configuration options
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving the output files (default: current directory)
    pub output_dir: PathBuf,
    /// File stem prefix, followed by the sample index (default: `rawpcm`)
    pub prefix: String,
    /// Output file format (default: raw)
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            format: ExportFormat::Raw,
        }
    }
}

impl ExportConfig {
    /// Create config for WAV export
    #[cfg(feature = "export-wav")]
    pub fn wav() -> Self {
        Self {
            format: ExportFormat::Wav,
            ..Default::default()
        }
    }

    /// Write files into `dir`
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Use `prefix` for file names
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Output path for sample `index`
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{}{}", self.prefix, index, self.format.extension()))
    }
}

/// Write one decoded sample according to `config`, returning the written path.
///
/// `info` is required for WAV output and ignored for raw output.
#[cfg_attr(not(feature = "export-wav"), allow(unused_variables))]
pub fn write_sample(
    index: usize,
    unit: &AudioUnit,
    info: Option<&SampleInfo>,
    config: &ExportConfig,
) -> Result<PathBuf> {
    let path = config.path_for(index);
    match config.format {
        ExportFormat::Raw => write_raw(&path, unit)?,
        #[cfg(feature = "export-wav")]
        ExportFormat::Wav => {
            let info = info.ok_or_else(|| {
                PatchError::Export(format!("no metadata for sample {index}, cannot write WAV"))
            })?;
            write_wav(&path, unit, info)?
        }
    }
    tracing::debug!(index, path = %path.display(), "exported sample");
    Ok(path)
}

/// Check that every sample can be written with `config`, without touching disk.
///
/// `infos` must be parallel to `samples` for WAV output; raw output accepts
/// an empty slice.
pub fn validate(
    samples: &[AudioUnit],
    infos: &[SampleInfo],
    config: &ExportConfig,
) -> Result<()> {
    if !infos.is_empty() && infos.len() != samples.len() {
        return Err(PatchError::Export(format!(
            "{} samples but {} metadata records",
            samples.len(),
            infos.len()
        )));
    }

    match config.format {
        ExportFormat::Raw => Ok(()),
        #[cfg(feature = "export-wav")]
        ExportFormat::Wav => {
            for (index, unit) in samples.iter().enumerate() {
                let info = infos.get(index).ok_or_else(|| {
                    PatchError::Export(format!("no metadata for sample {index}, cannot write WAV"))
                })?;
                check_wav(&config.path_for(index), unit, info)?;
            }
            Ok(())
        }
    }
}

/// Write every sample, in order, returning the written paths.
///
/// All samples are validated first; nothing is written if any of them
/// would fail.
pub fn export_samples(
    samples: &[AudioUnit],
    infos: &[SampleInfo],
    config: &ExportConfig,
) -> Result<Vec<PathBuf>> {
    validate(samples, infos, config)?;

    samples
        .iter()
        .enumerate()
        .map(|(index, unit)| write_sample(index, unit, infos.get(index), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::test_support;

    #[test]
    fn test_default_paths_match_rawpcm_naming() {
        let config = ExportConfig::default();
        assert_eq!(config.path_for(0), PathBuf::from("./rawpcm0"));
        assert_eq!(config.path_for(12), PathBuf::from("./rawpcm12"));
    }

    #[test]
    fn test_builder() {
        let config = ExportConfig::default().output_dir("out").prefix("piano_");
        assert_eq!(config.path_for(3), PathBuf::from("out/piano_3"));
    }

    #[cfg(feature = "export-wav")]
    #[test]
    fn test_wav_extension() {
        let config = ExportConfig::wav().output_dir("out");
        assert_eq!(config.path_for(1), PathBuf::from("out/rawpcm1.wav"));
    }

    #[test]
    fn test_metadata_count_mismatch() {
        let unit = AudioUnit {
            pcm_data: vec![0; 4],
            sample_width_in_bytes: 1,
        };
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().output_dir(dir.path());
        assert!(export_samples(std::slice::from_ref(&unit), &[], &config).is_ok());

        let err = export_samples(&[], &[test_support::sample_info(0x00, 4)], &config);
        assert!(matches!(err, Err(PatchError::Export(_))));
    }

    #[cfg(feature = "export-wav")]
    #[test]
    fn test_wav_export_writes_nothing_when_a_later_sample_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::wav().output_dir(dir.path());
        let unit = AudioUnit {
            pcm_data: vec![0; 4],
            sample_width_in_bytes: 1,
        };
        let good = test_support::sample_info(0x00, 4);
        let mut silent = test_support::sample_info(0x00, 4);
        silent.sample_rate = 0;

        let err = export_samples(&[unit.clone(), unit], &[good, silent], &config).unwrap_err();
        assert!(matches!(err, PatchError::Export(_)));
        assert!(!config.path_for(0).exists());
        assert!(!config.path_for(1).exists());
    }

    #[cfg(feature = "export-wav")]
    #[test]
    fn test_wav_validation_requires_metadata() {
        let config = ExportConfig::wav();
        let unit = AudioUnit {
            pcm_data: vec![0; 2],
            sample_width_in_bytes: 1,
        };
        assert!(matches!(
            validate(&[unit], &[], &config),
            Err(PatchError::Export(_))
        ));
    }

    #[test]
    fn test_raw_export_writes_every_sample() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::default().output_dir(dir.path());
        let units = [
            AudioUnit {
                pcm_data: vec![1, 2],
                sample_width_in_bytes: 1,
            },
            AudioUnit {
                pcm_data: vec![3, 4],
                sample_width_in_bytes: 2,
            },
        ];
        let written = export_samples(&units, &[], &config).unwrap();
        assert_eq!(written, vec![config.path_for(0), config.path_for(1)]);
        assert_eq!(std::fs::read(&written[1]).unwrap(), vec![3, 4]);
    }
}

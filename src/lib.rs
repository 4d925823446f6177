//! Gravis Ultrasound GF1 patch reader
//!
//! Decodes `.PAT` instrument patch files as written by the Gravis Ultrasound
//! toolchain and extracts the raw PCM data of every embedded waveform.
//!
//! # Features
//! - Header validation for `GF1PATCH110` and `GF1PATCH100` files
//! - Per-sample metadata decoding (loop points, frequencies, tremolo/vibrato, mode flags)
//! - 16-bit payload normalisation to little-endian signed PCM
//! - Raw PCM and WAV export of decoded samples
//!
//! # Crate feature flags
//! - `export-wav` (default): WAV output for decoded samples (enables `hound`)
//!
//! # Quick start
//! ```no_run
//! let samples = gf1patch::read("acpiano.pat").unwrap();
//! for (index, unit) in samples.iter().enumerate() {
//!     println!(
//!         "sample {index}: {} bytes, {}-bit",
//!         unit.pcm_data.len(),
//!         unit.sample_width_in_bytes * 8
//!     );
//! }
//! ```
//!
//! ## Inspecting sample metadata
//! ```no_run
//! use gf1patch::SampleInfo;
//!
//! let mut infos: Vec<SampleInfo> = Vec::new();
//! let samples = gf1patch::read_with_observer("acpiano.pat", &mut infos).unwrap();
//! assert_eq!(samples.len(), infos.len());
//! ```

#![warn(missing_docs)]

pub mod export; // Raw PCM / WAV output
pub mod observer; // Per-sample observability hook
pub mod patch; // GF1 patch format parsing
pub mod pcm; // 16-bit PCM normalisation

use std::path::Path;

/// Error types for patch decoding and export
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// Magic identifier is not one of the recognised GF1 patch strings
    #[error("Invalid Gravis patch file.")]
    BadHeader,

    /// Instrument count failed validation after zero correction
    #[error("Cannot handle patches with {count} instruments.")]
    TooManyInstruments {
        /// Corrected instrument count
        count: u8,
    },

    /// Layer count failed validation after zero correction
    #[error("Cannot handle patches with {count} layers.")]
    TooManyLayers {
        /// Corrected layer count
        count: u8,
    },

    /// Read past the end of the data inside the file header
    #[error("Patch header is truncated: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedHeader {
        /// Absolute offset of the failed read
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the source at `offset`
        available: usize,
    },

    /// Read past the end of the data inside a sample record
    #[error("Sample {sample} is truncated: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedSample {
        /// Index of the sample record being decoded
        sample: usize,
        /// Absolute offset of the failed read
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the source at `offset`
        available: usize,
    },

    /// 16-bit sample whose payload does not hold a whole number of frames
    #[error("Sample {sample} is 16-bit but its data length {length} is odd")]
    OddSampleLength {
        /// Index of the offending sample
        sample: usize,
        /// Declared payload length in bytes
        length: usize,
    },

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing decoded audio
    #[error("Export error: {0}")]
    Export(String),
}

impl PatchError {
    /// Process exit code for this error kind.
    ///
    /// Codes 2-4 match the historical GF1 reader numbering (`OK` was 1).
    /// Both truncation variants share code 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            PatchError::BadHeader => 2,
            PatchError::TooManyInstruments { .. } => 3,
            PatchError::TooManyLayers { .. } => 4,
            PatchError::TruncatedHeader { .. } | PatchError::TruncatedSample { .. } => 5,
            PatchError::OddSampleLength { .. } => 6,
            PatchError::Io(_) => 7,
            PatchError::Export(_) => 8,
        }
    }
}

/// Result type for patch operations
pub type Result<T> = std::result::Result<T, PatchError>;

/// One decoded waveform, ready to be written out as raw PCM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUnit {
    /// PCM bytes; 16-bit data is little-endian signed
    pub pcm_data: Vec<u8>,
    /// 1 for 8-bit samples, 2 for 16-bit samples
    pub sample_width_in_bytes: u8,
}

/// Read a patch file from disk and decode every sample.
///
/// Per-sample metadata is reported through [`TracingObserver`] at debug level.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<AudioUnit>> {
    read_with_observer(path, &mut TracingObserver)
}

/// Read a patch file from disk, passing each sample's metadata to `observer`.
pub fn read_with_observer<P, O>(path: P, observer: &mut O) -> Result<Vec<AudioUnit>>
where
    P: AsRef<Path>,
    O: SampleObserver + ?Sized,
{
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "loaded patch file");
    decode_with_observer(&data, observer)
}

/// Decode a patch already held in memory.
pub fn decode(data: &[u8]) -> Result<Vec<AudioUnit>> {
    decode_with_observer(data, &mut TracingObserver)
}

/// Decode a patch already held in memory, passing each sample's metadata to `observer`.
pub fn decode_with_observer<O>(data: &[u8], observer: &mut O) -> Result<Vec<AudioUnit>>
where
    O: SampleObserver + ?Sized,
{
    PatchReader::new(data).read_all(observer)
}

// Public API exports
pub use export::{ExportConfig, ExportFormat};
pub use observer::{SampleObserver, TracingObserver};
pub use patch::{HeaderInfo, PatchReader, SampleInfo, SampleMode};

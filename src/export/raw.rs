//! Raw PCM file output

use crate::{AudioUnit, Result};
use std::fs;
use std::path::Path;

/// Write `unit.pcm_data` to `path` with no header or conversion
pub fn write_raw(path: &Path, unit: &AudioUnit) -> Result<()> {
    fs::write(path, &unit.pcm_data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rawpcm0");
        let unit = AudioUnit {
            pcm_data: vec![0x00, 0x00, 0x00, 0x80],
            sample_width_in_bytes: 2,
        };
        write_raw(&path, &unit).unwrap();
        assert_eq!(fs::read(&path).unwrap(), unit.pcm_data);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("rawpcm0");
        let unit = AudioUnit {
            pcm_data: vec![1],
            sample_width_in_bytes: 1,
        };
        assert!(matches!(
            write_raw(&path, &unit),
            Err(crate::PatchError::Io(_))
        ));
    }
}

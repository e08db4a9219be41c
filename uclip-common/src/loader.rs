//! Clip file loading.
//!
//! Reads `.uclip` files from disk and validates the envelope before handing
//! the bytes to [`ClipView::parse`](crate::formats::ClipView::parse).

use std::path::Path;

use anyhow::{Context, Result};

use crate::formats::ClipEnvelope;

/// Read a `.uclip` file and validate its envelope.
///
/// Returns the raw published buffer. Use
/// [`ClipView::parse`](crate::formats::ClipView::parse) to navigate it.
pub fn load_clip(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read clip file: {}", path.display()))?;

    ClipEnvelope::validate(&bytes)
        .with_context(|| format!("Invalid clip file: {}", path.display()))?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ClipDesc, ClipWriter, RotationFormat, TranslationFormat};

    fn test_clip_bytes() -> Vec<u8> {
        let desc = ClipDesc {
            num_bones: 2,
            rotation_format: RotationFormat::Quat48,
            translation_format: TranslationFormat::Vector48,
            num_samples: 4,
            sample_rate: 30,
            num_constant_rotation_tracks: 0,
            num_constant_translation_tracks: 1,
            num_animated_rotation_tracks: 1,
            num_animated_translation_tracks: 1,
        };
        ClipWriter::new(&desc).unwrap().finish()
    }

    #[test]
    fn test_load_clip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.uclip");
        std::fs::write(&path, test_clip_bytes()).unwrap();

        let bytes = load_clip(&path).unwrap();
        assert_eq!(bytes, test_clip_bytes());
    }

    #[test]
    fn test_load_clip_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.uclip");

        let err = load_clip(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read clip file"));
    }

    #[test]
    fn test_load_clip_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.uclip");
        let mut bytes = test_clip_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(&path, bytes).unwrap();

        let err = load_clip(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid clip file"));
    }
}

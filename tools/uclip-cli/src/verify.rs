//! Clip consistency verification.
//!
//! Envelope integrity and region bounds are already validated by parsing.
//! This adds the encoder-side invariants the layout itself never enforces:
//! the animated track counts stored in the header must match the bitset
//! classification, and each data region must hold exactly the samples the
//! classification implies.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use uclip_common::{bitset, load_clip, ClipView, TRACKS_PER_BONE};

#[derive(Args)]
pub struct VerifyArgs {
    /// Input .uclip file
    pub input: PathBuf,
}

pub fn execute(args: VerifyArgs) -> Result<()> {
    let bytes = load_clip(&args.input)?;
    let view = ClipView::parse(&bytes)?;
    check_consistency(&view)?;

    println!("{}: OK ({} bytes)", args.input.display(), bytes.len());
    Ok(())
}

/// Cross-check the redundant header counts against the bitsets and the
/// region sizes against the classification.
pub(crate) fn check_consistency(view: &ClipView) -> Result<()> {
    let header = view.header();
    let num_tracks = header.num_bones as u32 * TRACKS_PER_BONE;

    let mut constant_rotation = 0u32;
    let mut constant_translation = 0u32;
    let mut animated_rotation = 0u32;
    let mut animated_translation = 0u32;

    for track in 0..num_tracks {
        if bitset::get(view.default_tracks_bitset(), track) {
            continue;
        }
        let rotation = track % TRACKS_PER_BONE == 0;
        let constant = bitset::get(view.constant_tracks_bitset(), track);
        match (rotation, constant) {
            (true, true) => constant_rotation += 1,
            (true, false) => animated_rotation += 1,
            (false, true) => constant_translation += 1,
            (false, false) => animated_translation += 1,
        }
    }

    tracing::debug!(
        constant_rotation,
        constant_translation,
        animated_rotation,
        animated_translation,
        "track classification from bitsets"
    );

    if animated_rotation != header.num_animated_rotation_tracks {
        bail!(
            "animated rotation tracks: header says {}, bitsets say {}",
            header.num_animated_rotation_tracks,
            animated_rotation
        );
    }
    if animated_translation != header.num_animated_translation_tracks {
        bail!(
            "animated translation tracks: header says {}, bitsets say {}",
            header.num_animated_translation_tracks,
            animated_translation
        );
    }

    let rotation_size = header.rotation_format.sample_size() as usize;
    let translation_size = header.translation_format.sample_size() as usize;

    let expected_constant =
        constant_rotation as usize * rotation_size + constant_translation as usize * translation_size;
    if view.constant_track_data().len() != expected_constant {
        bail!(
            "constant data region is {} bytes, classification implies {}",
            view.constant_track_data().len(),
            expected_constant
        );
    }

    let stride = animated_rotation as usize * rotation_size
        + animated_translation as usize * translation_size;
    let expected_track_data = stride * header.num_samples as usize;
    if view.track_data().len() != expected_track_data {
        bail!(
            "track data region is {} bytes, classification implies {}",
            view.track_data().len(),
            expected_track_data
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uclip_common::{ClipDesc, ClipWriter, RotationFormat, TranslationFormat};

    fn two_bone_desc() -> ClipDesc {
        ClipDesc {
            num_bones: 2,
            rotation_format: RotationFormat::Quat48,
            translation_format: TranslationFormat::Vector48,
            num_samples: 10,
            sample_rate: 30,
            num_constant_rotation_tracks: 0,
            num_constant_translation_tracks: 1,
            num_animated_rotation_tracks: 1,
            num_animated_translation_tracks: 1,
        }
    }

    #[test]
    fn consistent_clip_passes() {
        let mut writer = ClipWriter::new(&two_bone_desc()).unwrap();
        bitset::set(writer.default_tracks_bitset_mut(), 0, true);
        bitset::set(writer.constant_tracks_bitset_mut(), 1, true);
        let bytes = writer.finish();

        let view = ClipView::parse(&bytes).unwrap();
        assert!(check_consistency(&view).is_ok());
    }

    #[test]
    fn verify_command_accepts_file_on_disk() {
        let mut writer = ClipWriter::new(&two_bone_desc()).unwrap();
        bitset::set(writer.default_tracks_bitset_mut(), 0, true);
        bitset::set(writer.constant_tracks_bitset_mut(), 1, true);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.uclip");
        std::fs::write(&path, writer.finish()).unwrap();

        assert!(execute(VerifyArgs { input: path }).is_ok());
    }

    #[test]
    fn header_count_drift_is_detected() {
        // Bitsets left all-clear: four animated tracks, but the header
        // claims one of each
        let bytes = ClipWriter::new(&two_bone_desc()).unwrap().finish();

        let view = ClipView::parse(&bytes).unwrap();
        let err = check_consistency(&view).unwrap_err();
        assert!(err.to_string().contains("animated rotation tracks"));
    }
}

//! Generate test clip files for the uclip format
//!
//! Creates a simple wave animation over a small bone chain exercising all
//! three track classes: bone 0 rotation stays on the bind pose (default),
//! bone 0 translation is constant, every other track is animated.

use std::f32::consts::TAU;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use glam::Quat;
use uclip_common::{
    bitset, encode_rotation, encode_translation, ClipDesc, ClipWriter, RotationFormat,
    TranslationFormat,
};

fn main() {
    let output_path = PathBuf::from("demos/assets/test-wave.uclip");

    // Ensure output directory exists
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create output directory");
    }

    // Generate a simple 3-bone, 30-sample wave clip
    let num_bones: u16 = 3;
    let num_samples: u32 = 30;

    write_wave_clip(&output_path, num_bones, num_samples);

    let size = std::fs::metadata(&output_path)
        .map(|m| m.len())
        .unwrap_or(0);
    println!(
        "Generated {} ({} bones, {} samples, {} bytes)",
        output_path.display(),
        num_bones,
        num_samples,
        size
    );
}

fn write_wave_clip(path: &Path, num_bones: u16, num_samples: u32) {
    let data = generate_wave_clip_bytes(num_bones, num_samples);
    let mut file = File::create(path).expect("Failed to create output file");
    file.write_all(&data).expect("Failed to write clip");
}

/// Build the wave clip buffer through the regular writer path.
///
/// Bone 0 rotation is flagged default and bone 0 translation constant;
/// the remaining `num_bones - 1` bones carry animated rotation and
/// translation tracks.
fn generate_wave_clip_bytes(num_bones: u16, num_samples: u32) -> Vec<u8> {
    let animated_bones = num_bones as u32 - 1;
    let desc = ClipDesc {
        num_bones,
        rotation_format: RotationFormat::Quat48,
        translation_format: TranslationFormat::Vector48,
        num_samples,
        sample_rate: 30,
        num_constant_rotation_tracks: 0,
        num_constant_translation_tracks: 1,
        num_animated_rotation_tracks: animated_bones,
        num_animated_translation_tracks: animated_bones,
    };

    let mut writer = ClipWriter::new(&desc).expect("Failed to lay out clip");

    // Bone 0: rotation default (track 0), translation constant (track 1)
    bitset::set(writer.default_tracks_bitset_mut(), 0, true);
    bitset::set(writer.constant_tracks_bitset_mut(), 1, true);

    encode_translation(
        TranslationFormat::Vector48,
        [0.0, -1.5, 0.0],
        writer.constant_track_data_mut(),
    );

    let rotation_size = desc.rotation_format.sample_size() as usize;
    let translation_size = desc.translation_format.sample_size() as usize;
    let stride = desc.per_frame_stride();

    for sample in 0..num_samples {
        let t = (sample as f32 / num_samples as f32) * TAU;
        let frame_start = sample as usize * stride;
        let frame = &mut writer.track_data_mut()[frame_start..frame_start + stride];

        // Animated tracks in ascending track index: rotation then
        // translation per bone, starting at bone 1
        let mut cursor = 0;
        for bone in 1..num_bones {
            let phase = bone as f32 * 0.5;
            let angle = (t + phase).sin() * 0.3;
            let rotation = Quat::from_rotation_z(angle);
            encode_rotation(
                desc.rotation_format,
                rotation.to_array(),
                &mut frame[cursor..cursor + rotation_size],
            );
            cursor += rotation_size;

            let y = bone as f32 * 1.5 - 1.5;
            encode_translation(
                desc.translation_format,
                [0.0, y, (t + phase).cos() * 0.1],
                &mut frame[cursor..cursor + translation_size],
            );
            cursor += translation_size;
        }
    }

    writer.finish()
}

//! Shared types and buffer layout for uniformly sampled compressed clips
//!
//! This crate provides the `.uclip` container pieces shared between:
//! - `uclip-cli` (inspection and verification tool)
//! - `gen-test-clip` (test asset generation)
//!
//! # Modules
//!
//! - [`formats`] - clip envelope, header, bitsets, and region layout
//! - [`loader`] - `.uclip` file loading

pub mod formats;
pub mod loader;

// Re-export the clip loader
pub use loader::load_clip;

// Re-export commonly used format items
pub use formats::{
    bitset,
    decode_rotation,
    decode_translation,
    encode_rotation,
    encode_translation,
    header_position,
    payload_hash,
    rotation_sample_size,
    translation_sample_size,
    ClipDesc,
    ClipEnvelope,
    ClipError,
    ClipHeader,
    ClipLayout,
    ClipView,
    ClipWriter,
    RelOffset16,
    RotationFormat,
    TranslationFormat,
    TRACKS_PER_BONE,
    UCLIP_EXT,
    UCLIP_MAGIC,
    UCLIP_VERSION,
};

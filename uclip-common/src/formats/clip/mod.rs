//! Uniformly sampled compressed clip layout (.uclip)
//!
//! A clip is one contiguous, relocatable byte buffer. Everything after the
//! envelope is addressed through 16-bit self-relative offsets stored in the
//! header, so the buffer can be copied, memory-mapped, or relocated as
//! opaque bytes and stays navigable.
//!
//! # Layout
//! ```text
//! [Envelope]            16 bytes, magic/size/hash/version
//! [Header]              28 bytes, counts, formats, four region offsets
//! [DefaultBitset]       one bit per track; set => bind pose, nothing stored
//! [ConstantBitset]      one bit per track; set => one sample for the clip
//! [ConstantSampleData]  packed samples, one per constant track
//! [PerFrameTrackData]   packed samples for every animated track, per frame
//! ```
//!
//! Both bitsets are indexed by absolute track index (`bone * 2` for
//! rotation, `bone * 2 + 1` for translation) and sized identically; the
//! constant bit is only meaningful when the default bit is clear. Constant
//! samples are packed in ascending track index. Per-frame data repeats the
//! animated tracks in ascending track index once per frame - that ordering
//! is an encoder convention, not a layout guarantee.
//!
//! Region sizes follow from the header alone: bitsets from the bone count,
//! sample strides from the quantization formats. The layout carries no
//! redundant lengths, which is why the size tables must never silently
//! return zero.

pub mod bitset;
mod encoding;
mod formats;
mod header;
mod layout;
mod offsets;


// Re-export public API
pub use encoding::{
    decode_quat_smallest_three, decode_rotation, decode_translation, encode_quat_smallest_three,
    encode_rotation, encode_translation,
};
pub use formats::{
    rotation_sample_size, translation_sample_size, RotationFormat, TranslationFormat,
    TRACKS_PER_BONE,
};
pub use header::{header_position, ClipHeader};
pub use layout::{ClipDesc, ClipLayout, ClipView, ClipWriter};
pub use offsets::RelOffset16;

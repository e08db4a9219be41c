//! Clip header structure and header locator.

use crate::formats::envelope::ClipEnvelope;
use crate::formats::error::ClipError;

use super::formats::{RotationFormat, TranslationFormat};
use super::offsets::RelOffset16;

/// Compressed clip header (28 bytes)
///
/// Aggregates the counts and format tags that size every payload region,
/// plus four self-relative offsets to the regions themselves. The offsets
/// are the sole link between header and payload; the header carries no
/// lengths or magic of its own.
///
/// The animated track counts are stored directly rather than recomputed
/// from the bitsets. Keeping them consistent with the bitset contents is an
/// encoder invariant the header does not enforce.
///
/// Note: Not packed - we use explicit byte serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ClipHeader {
    /// Number of bones in the skeleton this clip animates
    pub num_bones: u16,
    /// Quantization format of every rotation sample
    pub rotation_format: RotationFormat,
    /// Quantization format of every translation sample
    pub translation_format: TranslationFormat,
    /// Number of samples per animated track
    pub num_samples: u32,
    /// Samples per second
    pub sample_rate: u32,
    /// Rotation tracks with per-sample data
    pub num_animated_rotation_tracks: u32,
    /// Translation tracks with per-sample data
    pub num_animated_translation_tracks: u32,

    /// Offset to the default-tracks bitset
    pub default_tracks_bitset_offset: RelOffset16<u32>,
    /// Offset to the constant-tracks bitset
    pub constant_tracks_bitset_offset: RelOffset16<u32>,
    /// Offset to the packed constant-track samples
    pub constant_track_data_offset: RelOffset16<u8>,
    /// Offset to the packed per-frame track samples
    pub track_data_offset: RelOffset16<u8>,
}

impl ClipHeader {
    pub const SIZE: usize = 28;

    /// Byte positions of the four offset fields within the header.
    ///
    /// Each stored distance is measured from the field's own position, so
    /// resolving an offset needs the matching field position here.
    pub const DEFAULT_BITSET_FIELD: usize = 0x14;
    pub const CONSTANT_BITSET_FIELD: usize = 0x16;
    pub const CONSTANT_DATA_FIELD: usize = 0x18;
    pub const TRACK_DATA_FIELD: usize = 0x1A;

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0x00..0x02].copy_from_slice(&self.num_bones.to_le_bytes());
        bytes[0x02] = self.rotation_format as u8;
        bytes[0x03] = self.translation_format as u8;
        bytes[0x04..0x08].copy_from_slice(&self.num_samples.to_le_bytes());
        bytes[0x08..0x0C].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[0x0C..0x10].copy_from_slice(&self.num_animated_rotation_tracks.to_le_bytes());
        bytes[0x10..0x14].copy_from_slice(&self.num_animated_translation_tracks.to_le_bytes());
        bytes[0x14..0x16].copy_from_slice(&self.default_tracks_bitset_offset.distance().to_le_bytes());
        bytes[0x16..0x18].copy_from_slice(&self.constant_tracks_bitset_offset.distance().to_le_bytes());
        bytes[0x18..0x1A].copy_from_slice(&self.constant_track_data_offset.distance().to_le_bytes());
        bytes[0x1A..0x1C].copy_from_slice(&self.track_data_offset.distance().to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClipError> {
        if bytes.len() < Self::SIZE {
            return Err(ClipError::Truncated {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            num_bones: u16::from_le_bytes([bytes[0x00], bytes[0x01]]),
            rotation_format: RotationFormat::from_u8(bytes[0x02])?,
            translation_format: TranslationFormat::from_u8(bytes[0x03])?,
            num_samples: u32::from_le_bytes([bytes[0x04], bytes[0x05], bytes[0x06], bytes[0x07]]),
            sample_rate: u32::from_le_bytes([bytes[0x08], bytes[0x09], bytes[0x0A], bytes[0x0B]]),
            num_animated_rotation_tracks: u32::from_le_bytes([
                bytes[0x0C],
                bytes[0x0D],
                bytes[0x0E],
                bytes[0x0F],
            ]),
            num_animated_translation_tracks: u32::from_le_bytes([
                bytes[0x10],
                bytes[0x11],
                bytes[0x12],
                bytes[0x13],
            ]),
            default_tracks_bitset_offset: RelOffset16::new(u16::from_le_bytes([
                bytes[0x14],
                bytes[0x15],
            ])),
            constant_tracks_bitset_offset: RelOffset16::new(u16::from_le_bytes([
                bytes[0x16],
                bytes[0x17],
            ])),
            constant_track_data_offset: RelOffset16::new(u16::from_le_bytes([
                bytes[0x18],
                bytes[0x19],
            ])),
            track_data_offset: RelOffset16::new(u16::from_le_bytes([bytes[0x1A], bytes[0x1B]])),
        })
    }

    /// Parse the header of a clip buffer whose envelope starts at
    /// `envelope_pos`.
    pub fn read_from(buffer: &[u8], envelope_pos: usize) -> Result<Self, ClipError> {
        let pos = header_position(envelope_pos);
        if buffer.len() < pos + Self::SIZE {
            return Err(ClipError::Truncated {
                expected: pos + Self::SIZE,
                actual: buffer.len(),
            });
        }
        Self::from_bytes(&buffer[pos..])
    }

    /// Serialize the header into a clip buffer whose envelope starts at
    /// `envelope_pos`.
    ///
    /// Panics if the buffer is too small; the writer sizes the buffer from
    /// the same layout that produced this header.
    pub fn write_to(&self, buffer: &mut [u8], envelope_pos: usize) {
        let pos = header_position(envelope_pos);
        buffer[pos..pos + Self::SIZE].copy_from_slice(&self.to_bytes());
    }

    /// Position of the default-tracks bitset, given the header position.
    pub fn default_tracks_bitset_pos(&self, header_pos: usize) -> usize {
        self.default_tracks_bitset_offset
            .resolve(header_pos + Self::DEFAULT_BITSET_FIELD)
    }

    /// Position of the constant-tracks bitset, given the header position.
    pub fn constant_tracks_bitset_pos(&self, header_pos: usize) -> usize {
        self.constant_tracks_bitset_offset
            .resolve(header_pos + Self::CONSTANT_BITSET_FIELD)
    }

    /// Position of the constant-track sample data, given the header position.
    pub fn constant_track_data_pos(&self, header_pos: usize) -> usize {
        self.constant_track_data_offset
            .resolve(header_pos + Self::CONSTANT_DATA_FIELD)
    }

    /// Position of the per-frame track data, given the header position.
    pub fn track_data_pos(&self, header_pos: usize) -> usize {
        self.track_data_offset
            .resolve(header_pos + Self::TRACK_DATA_FIELD)
    }
}

/// Position of the clip header inside a full clip buffer.
///
/// The header sits immediately after the fixed-size envelope. No bounds or
/// version checking happens here - that is the envelope's job.
pub const fn header_position(envelope_pos: usize) -> usize {
    envelope_pos + ClipEnvelope::SIZE
}

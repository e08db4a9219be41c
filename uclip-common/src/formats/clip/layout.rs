//! Buffer layout computation and capability views.
//!
//! [`ClipLayout`] turns a clip description into concrete byte ranges for the
//! four payload regions, packed contiguously after the header. The ranges
//! are computed once - at construction on the write side, at parse on the
//! read side - and cached; accessors are pure slicing afterwards.
//!
//! The mutable/read-only accessor duality is two capability views over the
//! same bytes: [`ClipWriter`] owns the buffer during construction and is
//! consumed by [`ClipWriter::finish`], [`ClipView`] borrows published bytes
//! read-only. Ownership makes concurrent liveness of the two impossible.

use std::ops::Range;

use crate::formats::envelope::ClipEnvelope;
use crate::formats::error::ClipError;

use super::bitset;
use super::formats::{RotationFormat, TranslationFormat, TRACKS_PER_BONE};
use super::header::{header_position, ClipHeader};
use super::offsets::RelOffset16;

/// Everything the encoder decides before the buffer can be sized.
///
/// The constant and animated track counts are redundant with the bitsets
/// the encoder later fills in; the layout only turns them into sizes and
/// never checks them against the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipDesc {
    pub num_bones: u16,
    pub rotation_format: RotationFormat,
    pub translation_format: TranslationFormat,
    pub num_samples: u32,
    pub sample_rate: u32,
    pub num_constant_rotation_tracks: u32,
    pub num_constant_translation_tracks: u32,
    pub num_animated_rotation_tracks: u32,
    pub num_animated_translation_tracks: u32,
}

impl ClipDesc {
    /// Total number of tracks (one rotation + one translation per bone).
    pub fn num_tracks(&self) -> u32 {
        self.num_bones as u32 * TRACKS_PER_BONE
    }

    /// Bytes of packed sample data per frame, covering every animated track.
    pub fn per_frame_stride(&self) -> usize {
        self.num_animated_rotation_tracks as usize * self.rotation_format.sample_size() as usize
            + self.num_animated_translation_tracks as usize
                * self.translation_format.sample_size() as usize
    }

    /// Bytes of packed constant-track sample data.
    pub fn constant_data_size(&self) -> usize {
        self.num_constant_rotation_tracks as usize * self.rotation_format.sample_size() as usize
            + self.num_constant_translation_tracks as usize
                * self.translation_format.sample_size() as usize
    }

    /// Bytes of packed per-frame track data across all samples.
    pub fn track_data_size(&self) -> usize {
        self.per_frame_stride() * self.num_samples as usize
    }
}

/// Concrete byte ranges for one clip buffer, envelope at position 0.
///
/// Region order is fixed:
/// `[Envelope][Header][DefaultBitset][ConstantBitset][ConstantSampleData][PerFrameTrackData]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipLayout {
    pub default_tracks_bitset: Range<usize>,
    pub constant_tracks_bitset: Range<usize>,
    pub constant_track_data: Range<usize>,
    pub track_data: Range<usize>,
    pub total_size: usize,
}

impl ClipLayout {
    /// Region layout for a described clip, regions packed in declared order.
    pub fn for_desc(desc: &ClipDesc) -> Self {
        let bitset_bytes = bitset::byte_count(desc.num_tracks());

        let default_start = header_position(0) + ClipHeader::SIZE;
        let constant_bitset_start = default_start + bitset_bytes;
        let constant_data_start = constant_bitset_start + bitset_bytes;
        let track_data_start = constant_data_start + desc.constant_data_size();
        let total_size = track_data_start + desc.track_data_size();

        Self {
            default_tracks_bitset: default_start..constant_bitset_start,
            constant_tracks_bitset: constant_bitset_start..constant_data_start,
            constant_track_data: constant_data_start..track_data_start,
            track_data: track_data_start..total_size,
            total_size,
        }
    }

    /// Region layout recovered from a published header's offsets.
    ///
    /// Bitset lengths are derived from the stored bone count; the constant
    /// data region ends where the track data begins, and the track data runs
    /// to `total_size`. Offsets are resolved here exactly once.
    pub fn from_header(header: &ClipHeader, total_size: usize) -> Self {
        let header_pos = header_position(0);
        let bitset_bytes = bitset::byte_count(header.num_bones as u32 * TRACKS_PER_BONE);

        let default_start = header.default_tracks_bitset_pos(header_pos);
        let constant_bitset_start = header.constant_tracks_bitset_pos(header_pos);
        let constant_data_start = header.constant_track_data_pos(header_pos);
        let track_data_start = header.track_data_pos(header_pos);

        Self {
            default_tracks_bitset: default_start..default_start + bitset_bytes,
            constant_tracks_bitset: constant_bitset_start..constant_bitset_start + bitset_bytes,
            constant_track_data: constant_data_start..track_data_start,
            track_data: track_data_start..total_size,
            total_size,
        }
    }

    /// Header for this layout with all four self-relative offsets filled in.
    ///
    /// Every distance is measured from the storing field's own position, so
    /// this is where an overflowing offset surfaces - before any region is
    /// written.
    pub fn header(&self, desc: &ClipDesc) -> Result<ClipHeader, ClipError> {
        let header_pos = header_position(0);
        Ok(ClipHeader {
            num_bones: desc.num_bones,
            rotation_format: desc.rotation_format,
            translation_format: desc.translation_format,
            num_samples: desc.num_samples,
            sample_rate: desc.sample_rate,
            num_animated_rotation_tracks: desc.num_animated_rotation_tracks,
            num_animated_translation_tracks: desc.num_animated_translation_tracks,
            default_tracks_bitset_offset: RelOffset16::between(
                header_pos + ClipHeader::DEFAULT_BITSET_FIELD,
                self.default_tracks_bitset.start,
            )?,
            constant_tracks_bitset_offset: RelOffset16::between(
                header_pos + ClipHeader::CONSTANT_BITSET_FIELD,
                self.constant_tracks_bitset.start,
            )?,
            constant_track_data_offset: RelOffset16::between(
                header_pos + ClipHeader::CONSTANT_DATA_FIELD,
                self.constant_track_data.start,
            )?,
            track_data_offset: RelOffset16::between(
                header_pos + ClipHeader::TRACK_DATA_FIELD,
                self.track_data.start,
            )?,
        })
    }

    /// Check that all regions point strictly forward and never overlap.
    fn check_bounds(&self) -> Result<(), ClipError> {
        let header_end = header_position(0) + ClipHeader::SIZE;
        if self.default_tracks_bitset.start < header_end {
            return Err(ClipError::RegionOrder {
                region: "default tracks bitset",
            });
        }
        if self.constant_tracks_bitset.start < self.default_tracks_bitset.end {
            return Err(ClipError::RegionOrder {
                region: "constant tracks bitset",
            });
        }
        if self.constant_track_data.start < self.constant_tracks_bitset.end
            || self.constant_track_data.end < self.constant_track_data.start
        {
            return Err(ClipError::RegionOrder {
                region: "constant track data",
            });
        }
        if self.track_data.start < self.constant_track_data.end
            || self.track_data.end < self.track_data.start
        {
            return Err(ClipError::RegionOrder {
                region: "track data",
            });
        }
        Ok(())
    }
}

/// Encoder-side capability view: owns the buffer until publication.
///
/// Created over a zeroed buffer with the header already written; the
/// encoder fills the regions through the mutable accessors, then calls
/// [`ClipWriter::finish`] to seal the envelope and publish the bytes.
#[derive(Debug)]
pub struct ClipWriter {
    bytes: Vec<u8>,
    header: ClipHeader,
    layout: ClipLayout,
}

impl ClipWriter {
    /// Allocate a zeroed buffer for `desc` and write its header.
    ///
    /// All four offsets are computed here, before any region is written; an
    /// offset that cannot represent its distance surfaces now rather than
    /// corrupting the buffer later.
    pub fn new(desc: &ClipDesc) -> Result<Self, ClipError> {
        let layout = ClipLayout::for_desc(desc);
        let header = layout.header(desc)?;
        let mut bytes = vec![0u8; layout.total_size];
        header.write_to(&mut bytes, 0);
        Ok(Self {
            bytes,
            header,
            layout,
        })
    }

    pub fn header(&self) -> &ClipHeader {
        &self.header
    }

    pub fn layout(&self) -> &ClipLayout {
        &self.layout
    }

    pub fn default_tracks_bitset(&self) -> &[u8] {
        &self.bytes[self.layout.default_tracks_bitset.clone()]
    }

    pub fn default_tracks_bitset_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.layout.default_tracks_bitset.clone()]
    }

    pub fn constant_tracks_bitset(&self) -> &[u8] {
        &self.bytes[self.layout.constant_tracks_bitset.clone()]
    }

    pub fn constant_tracks_bitset_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.layout.constant_tracks_bitset.clone()]
    }

    pub fn constant_track_data(&self) -> &[u8] {
        &self.bytes[self.layout.constant_track_data.clone()]
    }

    pub fn constant_track_data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.layout.constant_track_data.clone()]
    }

    pub fn track_data(&self) -> &[u8] {
        &self.bytes[self.layout.track_data.clone()]
    }

    pub fn track_data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.layout.track_data.clone()]
    }

    /// Seal the envelope and publish the buffer as immutable bytes.
    ///
    /// Consumes the writer: after publication only read-only views exist.
    pub fn finish(mut self) -> Vec<u8> {
        let envelope = ClipEnvelope::seal(&self.bytes[ClipEnvelope::SIZE..]);
        self.bytes[..ClipEnvelope::SIZE].copy_from_slice(&envelope.to_bytes());
        self.bytes
    }
}

/// Decoder-side capability view over a published clip buffer.
///
/// [`ClipView::parse`] validates the envelope, reads the header, resolves
/// the four self-relative offsets exactly once, and caches the resulting
/// region ranges. Accessors never re-derive positions.
#[derive(Debug, Clone)]
pub struct ClipView<'a> {
    bytes: &'a [u8],
    envelope: ClipEnvelope,
    header: ClipHeader,
    layout: ClipLayout,
}

impl<'a> ClipView<'a> {
    /// Parse and validate a published clip buffer.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ClipError> {
        let envelope = ClipEnvelope::validate(bytes)?;
        let header = ClipHeader::read_from(bytes, 0)?;
        let layout = ClipLayout::from_header(&header, bytes.len());
        layout.check_bounds()?;
        Ok(Self {
            bytes,
            envelope,
            header,
            layout,
        })
    }

    pub fn envelope(&self) -> &ClipEnvelope {
        &self.envelope
    }

    pub fn header(&self) -> &ClipHeader {
        &self.header
    }

    pub fn layout(&self) -> &ClipLayout {
        &self.layout
    }

    pub fn default_tracks_bitset(&self) -> &'a [u8] {
        &self.bytes[self.layout.default_tracks_bitset.clone()]
    }

    pub fn constant_tracks_bitset(&self) -> &'a [u8] {
        &self.bytes[self.layout.constant_tracks_bitset.clone()]
    }

    pub fn constant_track_data(&self) -> &'a [u8] {
        &self.bytes[self.layout.constant_track_data.clone()]
    }

    pub fn track_data(&self) -> &'a [u8] {
        &self.bytes[self.layout.track_data.clone()]
    }
}

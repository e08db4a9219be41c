//! Rotation and translation quantization formats.
//!
//! Single source of truth for packed per-sample sizes. Every component that
//! sizes a region calls into this table; nothing else duplicates it.

use crate::formats::error::ClipError;

/// Tracks stored per bone (one rotation + one translation).
pub const TRACKS_PER_BONE: u32 = 2;

/// Rotation sample quantization format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationFormat {
    /// Four raw f32 components (16 bytes)
    Quat128 = 0,
    /// X/Y/Z raw f32, W reconstructed on decode (12 bytes)
    Quat96 = 1,
    /// X/Y/Z snorm16, W reconstructed on decode (6 bytes)
    Quat48 = 2,
    /// Smallest-three packed quaternion, 10-10-10-2 (4 bytes)
    Quat32 = 3,
}

impl RotationFormat {
    /// Parse a rotation format from its header tag byte.
    pub fn from_u8(value: u8) -> Result<Self, ClipError> {
        match value {
            0 => Ok(Self::Quat128),
            1 => Ok(Self::Quat96),
            2 => Ok(Self::Quat48),
            3 => Ok(Self::Quat32),
            _ => Err(ClipError::InvalidFormat {
                kind: "rotation",
                value,
            }),
        }
    }

    /// Packed size of one rotation sample in bytes. Never zero.
    pub const fn sample_size(self) -> u32 {
        match self {
            Self::Quat128 => 16,
            Self::Quat96 => 12,
            Self::Quat48 => 6,
            Self::Quat32 => 4,
        }
    }

    /// Format name for diagnostic messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quat128 => "Quat128",
            Self::Quat96 => "Quat96",
            Self::Quat48 => "Quat48",
            Self::Quat32 => "Quat32",
        }
    }
}

/// Translation sample quantization format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationFormat {
    /// Three raw f32 components (12 bytes)
    Vector96 = 0,
    /// Three f16 components (6 bytes)
    Vector48 = 1,
}

impl TranslationFormat {
    /// Parse a translation format from its header tag byte.
    pub fn from_u8(value: u8) -> Result<Self, ClipError> {
        match value {
            0 => Ok(Self::Vector96),
            1 => Ok(Self::Vector48),
            _ => Err(ClipError::InvalidFormat {
                kind: "translation",
                value,
            }),
        }
    }

    /// Packed size of one translation sample in bytes. Never zero.
    pub const fn sample_size(self) -> u32 {
        match self {
            Self::Vector96 => 12,
            Self::Vector48 => 6,
        }
    }

    /// Format name for diagnostic messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vector96 => "Vector96",
            Self::Vector48 => "Vector48",
        }
    }
}

/// Packed rotation sample size for a raw header tag.
pub fn rotation_sample_size(value: u8) -> Result<u32, ClipError> {
    RotationFormat::from_u8(value).map(RotationFormat::sample_size)
}

/// Packed translation sample size for a raw header tag.
pub fn translation_sample_size(value: u8) -> Result<u32, ClipError> {
    TranslationFormat::from_u8(value).map(TranslationFormat::sample_size)
}

//! Typed errors for clip layout computation and parsing.

use thiserror::Error;

/// Errors produced while sizing a clip buffer or reading clip bytes.
///
/// A size calculator handed an unknown format tag always reports
/// [`ClipError::InvalidFormat`] instead of returning zero - a silent zero
/// size would shift every downstream offset with no detectable symptom.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// Unrecognized rotation or translation format tag.
    #[error("invalid or unsupported {kind} format: {value:#04x}")]
    InvalidFormat { kind: &'static str, value: u8 },

    /// Buffer shorter than the structure being read.
    #[error("truncated clip buffer: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Region distance does not fit a 16-bit self-relative offset.
    #[error("region offset distance {distance} exceeds 16-bit range")]
    OffsetOverflow { distance: usize },

    /// Header offsets resolve to regions that run backward or overlap.
    #[error("clip regions overlap or run backward at {region}")]
    RegionOrder { region: &'static str },

    /// Envelope magic bytes did not match `UCLP`.
    #[error("invalid clip magic bytes: {found:?}")]
    BadMagic { found: [u8; 4] },

    /// Envelope version newer than this library supports.
    #[error("unsupported clip version: {version} (max supported: {max})")]
    UnsupportedVersion { version: u16, max: u16 },

    /// Envelope payload hash did not match the stored value.
    #[error("clip hash mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    HashMismatch { stored: u32, computed: u32 },
}

//! Clip envelope: fixed-size prologue owning identity and integrity.
//!
//! The envelope is opaque to the layout core - only [`ClipEnvelope::SIZE`]
//! participates in offset arithmetic. Magic bytes, version, total size, and
//! the payload hash all live here so the header and payload regions stay
//! free of structural metadata.
//!
//! # Layout (16 bytes)
//! ```text
//! 0x00: magic [u8; 4]      - b"UCLP"
//! 0x04: total_size u32 LE  - envelope + header + payload regions
//! 0x08: hash u32 LE        - XXH3 (truncated) of everything after the envelope
//! 0x0C: version u16 LE     - format version (currently 1)
//! 0x0E: reserved u16       - must be 0
//! ```

use xxhash_rust::xxh3::xxh3_64;

use super::error::ClipError;

/// Magic bytes at the start of every clip buffer.
pub const UCLIP_MAGIC: &[u8; 4] = b"UCLP";

/// Current clip format version.
pub const UCLIP_VERSION: u16 = 1;

/// Clip file extension without dot.
pub const UCLIP_EXT: &str = "uclip";

/// Clip envelope (16 bytes)
///
/// Note: Not packed - we use explicit byte serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ClipEnvelope {
    /// Magic bytes, always `UCLP`
    pub magic: [u8; 4],
    /// Total buffer size including the envelope itself
    pub total_size: u32,
    /// Hash of everything after the envelope
    pub hash: u32,
    /// Format version
    pub version: u16,
    /// Reserved (must be 0)
    pub reserved: u16,
}

impl ClipEnvelope {
    pub const SIZE: usize = 16;

    /// Envelope for a finished buffer, hashing everything after the envelope.
    pub fn seal(payload: &[u8]) -> Self {
        Self {
            magic: *UCLIP_MAGIC,
            total_size: (Self::SIZE + payload.len()) as u32,
            hash: payload_hash(payload),
            version: UCLIP_VERSION,
            reserved: 0,
        }
    }

    /// Write envelope to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.hash.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.version.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.reserved.to_le_bytes());
        bytes
    }

    /// Read envelope from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClipError> {
        if bytes.len() < Self::SIZE {
            return Err(ClipError::Truncated {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            total_size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            hash: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            version: u16::from_le_bytes([bytes[12], bytes[13]]),
            reserved: u16::from_le_bytes([bytes[14], bytes[15]]),
        })
    }

    /// Parse and fully validate the envelope of a published clip buffer.
    ///
    /// Checks magic bytes, version, the stored total size against the
    /// buffer, and the payload hash.
    pub fn validate(buffer: &[u8]) -> Result<Self, ClipError> {
        let envelope = Self::from_bytes(buffer)?;
        if envelope.magic != *UCLIP_MAGIC {
            return Err(ClipError::BadMagic {
                found: envelope.magic,
            });
        }
        if envelope.version > UCLIP_VERSION {
            return Err(ClipError::UnsupportedVersion {
                version: envelope.version,
                max: UCLIP_VERSION,
            });
        }
        if envelope.total_size as usize != buffer.len() {
            return Err(ClipError::Truncated {
                expected: envelope.total_size as usize,
                actual: buffer.len(),
            });
        }
        let computed = payload_hash(&buffer[Self::SIZE..]);
        if computed != envelope.hash {
            return Err(ClipError::HashMismatch {
                stored: envelope.hash,
                computed,
            });
        }
        Ok(envelope)
    }
}

/// XXH3 hash of the bytes after the envelope, truncated to 32 bits.
pub fn payload_hash(payload: &[u8]) -> u32 {
    xxh3_64(payload) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let envelope = ClipEnvelope::seal(&[1, 2, 3, 4]);
        assert_eq!(envelope.magic, *UCLIP_MAGIC);
        assert_eq!(envelope.total_size, 20);
        assert_eq!(envelope.version, UCLIP_VERSION);

        let bytes = envelope.to_bytes();
        assert_eq!(bytes.len(), ClipEnvelope::SIZE);

        let parsed = ClipEnvelope::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_envelope_from_short_bytes() {
        let short_bytes = [0u8; 8];
        assert!(matches!(
            ClipEnvelope::from_bytes(&short_bytes),
            Err(ClipError::Truncated {
                expected: 16,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_envelope_validate() {
        let payload = [7u8; 32];
        let mut buffer = ClipEnvelope::seal(&payload).to_bytes().to_vec();
        buffer.extend_from_slice(&payload);

        let envelope = ClipEnvelope::validate(&buffer).unwrap();
        assert_eq!(envelope.total_size as usize, buffer.len());
    }

    #[test]
    fn test_envelope_rejects_bad_magic() {
        let payload = [0u8; 8];
        let mut buffer = ClipEnvelope::seal(&payload).to_bytes().to_vec();
        buffer.extend_from_slice(&payload);
        buffer[0] = b'X';

        assert!(matches!(
            ClipEnvelope::validate(&buffer),
            Err(ClipError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_envelope_rejects_newer_version() {
        let payload = [0u8; 8];
        let mut envelope = ClipEnvelope::seal(&payload);
        envelope.version = UCLIP_VERSION + 1;
        let mut buffer = envelope.to_bytes().to_vec();
        buffer.extend_from_slice(&payload);

        assert!(matches!(
            ClipEnvelope::validate(&buffer),
            Err(ClipError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_envelope_detects_payload_corruption() {
        let payload = [3u8; 8];
        let mut buffer = ClipEnvelope::seal(&payload).to_bytes().to_vec();
        buffer.extend_from_slice(&payload);
        let last = buffer.len() - 1;
        buffer[last] ^= 0xFF;

        assert!(matches!(
            ClipEnvelope::validate(&buffer),
            Err(ClipError::HashMismatch { .. })
        ));
    }
}

//! Per-format sample encoding and decoding.
//!
//! Packs one rotation or translation sample into its quantized byte form
//! and back. The layout core never walks samples - per-frame playback
//! belongs to the runtime - but the tools and tests build and decode real
//! payloads with these helpers.

use half::f16;

use super::formats::{RotationFormat, TranslationFormat};

// ============================================================================
// Quaternion Encoding: Smallest-Three
// ============================================================================

/// Encode a quaternion using smallest-three encoding (32 bits)
///
/// Drops the largest component and reconstructs it from the other three.
///
/// Bit layout: `[a:10][b:10][c:10][idx:2]`
/// - idx identifies which component was dropped (largest)
/// - a, b, c are the three smallest components quantized to 10 bits
pub fn encode_quat_smallest_three(q: [f32; 4]) -> u32 {
    let [x, y, z, w] = q;

    // Index of largest absolute component
    let abs_q = [x.abs(), y.abs(), z.abs(), w.abs()];
    let idx = if abs_q[0] > abs_q[1] && abs_q[0] > abs_q[2] && abs_q[0] > abs_q[3] {
        0
    } else if abs_q[1] > abs_q[2] && abs_q[1] > abs_q[3] {
        1
    } else if abs_q[2] > abs_q[3] {
        2
    } else {
        3
    };

    // Ensure the dropped component is positive (q == -q for rotations)
    let sign = if q[idx] < 0.0 { -1.0 } else { 1.0 };
    let q = [q[0] * sign, q[1] * sign, q[2] * sign, q[3] * sign];

    let (a, b, c) = match idx {
        0 => (q[1], q[2], q[3]),
        1 => (q[0], q[2], q[3]),
        2 => (q[0], q[1], q[3]),
        _ => (q[0], q[1], q[2]),
    };

    // Quantize: [-1/sqrt(2), 1/sqrt(2)] -> [0, 1023]
    let scale = 511.5;
    let sqrt2 = std::f32::consts::SQRT_2;
    let qa = (((a * sqrt2 + 1.0) * scale).round() as u32).min(1023);
    let qb = (((b * sqrt2 + 1.0) * scale).round() as u32).min(1023);
    let qc = (((c * sqrt2 + 1.0) * scale).round() as u32).min(1023);

    (qa << 22) | (qb << 12) | (qc << 2) | (idx as u32)
}

/// Decode a smallest-three encoded quaternion (32 bits)
///
/// Returns [x, y, z, w].
pub fn decode_quat_smallest_three(packed: u32) -> [f32; 4] {
    let idx = (packed & 0x3) as usize;
    let qc = ((packed >> 2) & 0x3FF) as f32;
    let qb = ((packed >> 12) & 0x3FF) as f32;
    let qa = ((packed >> 22) & 0x3FF) as f32;

    let scale = 1.0 / 511.5;
    let sqrt2_inv = 1.0 / std::f32::consts::SQRT_2;
    let a = (qa * scale - 1.0) * sqrt2_inv;
    let b = (qb * scale - 1.0) * sqrt2_inv;
    let c = (qc * scale - 1.0) * sqrt2_inv;

    let largest = (1.0 - a * a - b * b - c * c).max(0.0).sqrt();

    match idx {
        0 => [largest, a, b, c],
        1 => [a, largest, b, c],
        2 => [a, b, largest, c],
        _ => [a, b, c, largest],
    }
}

// ============================================================================
// Component Conversion
// ============================================================================

/// Convert f32 to signed normalized 16-bit integer (snorm16)
#[inline]
fn f32_to_snorm16(value: f32) -> i16 {
    let clamped = value.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert snorm16 back to f32
#[inline]
fn snorm16_to_f32(value: i16) -> f32 {
    value as f32 / 32767.0
}

/// Reconstruct the dropped W component of a unit quaternion
#[inline]
fn reconstruct_w(x: f32, y: f32, z: f32) -> f32 {
    (1.0 - x * x - y * y - z * z).max(0.0).sqrt()
}

// ============================================================================
// Rotation Samples
// ============================================================================

/// Encode one rotation sample into `out`.
///
/// Writes exactly `format.sample_size()` bytes. Formats that reconstruct W
/// on decode flip the quaternion sign first so W is non-negative.
pub fn encode_rotation(format: RotationFormat, q: [f32; 4], out: &mut [u8]) {
    debug_assert!(out.len() >= format.sample_size() as usize);
    match format {
        RotationFormat::Quat128 => {
            for (i, &component) in q.iter().enumerate() {
                out[i * 4..(i + 1) * 4].copy_from_slice(&component.to_le_bytes());
            }
        }
        RotationFormat::Quat96 => {
            let q = canonicalize_w(q);
            for (i, &component) in q[..3].iter().enumerate() {
                out[i * 4..(i + 1) * 4].copy_from_slice(&component.to_le_bytes());
            }
        }
        RotationFormat::Quat48 => {
            let q = canonicalize_w(q);
            for (i, &component) in q[..3].iter().enumerate() {
                out[i * 2..(i + 1) * 2].copy_from_slice(&f32_to_snorm16(component).to_le_bytes());
            }
        }
        RotationFormat::Quat32 => {
            out[0..4].copy_from_slice(&encode_quat_smallest_three(q).to_le_bytes());
        }
    }
}

/// Decode one rotation sample.
///
/// Reads exactly `format.sample_size()` bytes. Returns [x, y, z, w].
pub fn decode_rotation(format: RotationFormat, bytes: &[u8]) -> [f32; 4] {
    debug_assert!(bytes.len() >= format.sample_size() as usize);
    match format {
        RotationFormat::Quat128 => {
            let mut q = [0.0f32; 4];
            for (i, component) in q.iter_mut().enumerate() {
                *component = f32::from_le_bytes([
                    bytes[i * 4],
                    bytes[i * 4 + 1],
                    bytes[i * 4 + 2],
                    bytes[i * 4 + 3],
                ]);
            }
            q
        }
        RotationFormat::Quat96 => {
            let mut q = [0.0f32; 4];
            for (i, component) in q[..3].iter_mut().enumerate() {
                *component = f32::from_le_bytes([
                    bytes[i * 4],
                    bytes[i * 4 + 1],
                    bytes[i * 4 + 2],
                    bytes[i * 4 + 3],
                ]);
            }
            q[3] = reconstruct_w(q[0], q[1], q[2]);
            q
        }
        RotationFormat::Quat48 => {
            let mut q = [0.0f32; 4];
            for (i, component) in q[..3].iter_mut().enumerate() {
                *component =
                    snorm16_to_f32(i16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]]));
            }
            q[3] = reconstruct_w(q[0], q[1], q[2]);
            q
        }
        RotationFormat::Quat32 => decode_quat_smallest_three(u32::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ])),
    }
}

/// Flip the quaternion sign so W is non-negative.
fn canonicalize_w(q: [f32; 4]) -> [f32; 4] {
    if q[3] < 0.0 {
        [-q[0], -q[1], -q[2], -q[3]]
    } else {
        q
    }
}

// ============================================================================
// Translation Samples
// ============================================================================

/// Encode one translation sample into `out`.
///
/// Writes exactly `format.sample_size()` bytes.
pub fn encode_translation(format: TranslationFormat, v: [f32; 3], out: &mut [u8]) {
    debug_assert!(out.len() >= format.sample_size() as usize);
    match format {
        TranslationFormat::Vector96 => {
            for (i, &component) in v.iter().enumerate() {
                out[i * 4..(i + 1) * 4].copy_from_slice(&component.to_le_bytes());
            }
        }
        TranslationFormat::Vector48 => {
            for (i, &component) in v.iter().enumerate() {
                out[i * 2..(i + 1) * 2]
                    .copy_from_slice(&f16::from_f32(component).to_bits().to_le_bytes());
            }
        }
    }
}

/// Decode one translation sample.
///
/// Reads exactly `format.sample_size()` bytes.
pub fn decode_translation(format: TranslationFormat, bytes: &[u8]) -> [f32; 3] {
    debug_assert!(bytes.len() >= format.sample_size() as usize);
    match format {
        TranslationFormat::Vector96 => {
            let mut v = [0.0f32; 3];
            for (i, component) in v.iter_mut().enumerate() {
                *component = f32::from_le_bytes([
                    bytes[i * 4],
                    bytes[i * 4 + 1],
                    bytes[i * 4 + 2],
                    bytes[i * 4 + 3],
                ]);
            }
            v
        }
        TranslationFormat::Vector48 => {
            let mut v = [0.0f32; 3];
            for (i, component) in v.iter_mut().enumerate() {
                *component =
                    f16::from_bits(u16::from_le_bytes([bytes[i * 2], bytes[i * 2 + 1]])).to_f32();
            }
            v
        }
    }
}

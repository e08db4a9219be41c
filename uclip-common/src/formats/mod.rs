//! Binary clip formats.
//!
//! POD (Plain Old Data) little-endian structures with explicit byte
//! serialization. The envelope owns identification and integrity; the clip
//! module owns the header and payload region layout.

pub mod clip;
pub mod envelope;
mod error;

pub use clip::*;
pub use envelope::{payload_hash, ClipEnvelope, UCLIP_EXT, UCLIP_MAGIC, UCLIP_VERSION};
pub use error::ClipError;

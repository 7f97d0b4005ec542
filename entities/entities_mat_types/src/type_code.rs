//! Packed Type-Code Decoder
//!
//! Decodes the `type` field of a native matrix header. The field packs:
//! - the depth tag in bits 0-2,
//! - `channels - 1` in bits 3-11 (together with the depth this is the
//!   "magic" field below),
//! - header flags and the header signature above bit 11.
//!
//! All functions are pure integer arithmetic.

use crate::depth::Depth;
use crate::mat_type::MatType;

/// Number of bits the channel count is shifted by
pub const CN_SHIFT: i32 = 3;
/// Mask selecting the depth tag
pub const DEPTH_MASK: i32 = 0x7;
/// Mask selecting the combined depth and channel field
pub const MAGIC_MASK: i32 = 0xFFF;
/// Largest channel count representable in the magic field
pub const MAX_CHANNELS: i32 = (MAGIC_MASK >> CN_SHIFT) + 1;
/// Signature stored in the high half of a `CvMat` header's type field
pub const MAT_HEADER_SIGNATURE: i32 = 0x4242_0000;
/// Continuity flag of a `CvMat` header's type field
pub const MAT_CONTINUOUS_FLAG: i32 = 1 << 14;

/// Combined depth and channel field with the upper bits masked off
pub fn magic(code: i32) -> i32 {
    code & MAGIC_MASK
}

/// Channel count, 1-based
pub fn channels(code: i32) -> i32 {
    (magic(code) >> CN_SHIFT) + 1
}

/// Depth decoded from the low three bits
pub fn depth(code: i32) -> Depth {
    Depth::from_tag(code & DEPTH_MASK)
}

/// Named base type of the depth tag
///
/// Only the unsigned 8-bit tag is mapped. Every other tag fails with
/// [`TypeCodeError::UnsupportedDepth`] rather than guessing a mapping; use
/// [`depth`] for a total decoding of the tag.
pub fn base_type(code: i32) -> Result<MatType, TypeCodeError> {
    match code & DEPTH_MASK {
        0 => Ok(MatType::CV_8U),
        tag => Err(TypeCodeError::UnsupportedDepth(tag)),
    }
}

/// Compose a packed code from a depth and a channel count
///
/// Channel counts outside `1..=MAX_CHANNELS` wrap into the 9-bit channel
/// field the same way the native macro does.
pub fn make_type(depth: Depth, channels: i32) -> i32 {
    depth.tag().wrapping_add(channels.wrapping_sub(1) << CN_SHIFT) & MAGIC_MASK
}

/// A packed type code read from a native header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedTypeCode(i32);

impl PackedTypeCode {
    /// Wrap a raw code
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Compose from parts
    pub fn from_parts(depth: Depth, channels: i32) -> Self {
        Self(make_type(depth, channels))
    }

    /// Raw value, high bits included
    pub fn raw(self) -> i32 {
        self.0
    }

    /// See [`magic`]
    pub fn magic(self) -> i32 {
        magic(self.0)
    }

    /// See [`channels`]
    pub fn channels(self) -> i32 {
        channels(self.0)
    }

    /// See [`depth`]
    pub fn depth(self) -> Depth {
        depth(self.0)
    }

    /// See [`base_type`]
    pub fn base_type(self) -> Result<MatType, TypeCodeError> {
        base_type(self.0)
    }

    /// Whether the high half carries the `CvMat` header signature
    pub fn has_mat_signature(self) -> bool {
        (self.0 as u32) & 0xFFFF_0000 == MAT_HEADER_SIGNATURE as u32
    }

    /// Whether the continuity flag is set
    pub fn is_continuous(self) -> bool {
        self.0 & MAT_CONTINUOUS_FLAG != 0
    }

    /// Table entry for the magic field, if one exists
    pub fn mat_type(self) -> Option<MatType> {
        MatType::from_value(self.magic())
    }
}

impl From<i32> for PackedTypeCode {
    fn from(raw: i32) -> Self {
        Self::new(raw)
    }
}

impl From<MatType> for PackedTypeCode {
    fn from(t: MatType) -> Self {
        Self::new(t.value())
    }
}

/// Type-code decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCodeError {
    /// Depth tag has no base-type mapping
    UnsupportedDepth(i32),
}

impl std::fmt::Display for TypeCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeCodeError::UnsupportedDepth(tag) => {
                write!(f, "Unsupported depth tag: {} ({})", tag, Depth::from_tag(*tag))
            }
        }
    }
}

impl std::error::Error for TypeCodeError {}

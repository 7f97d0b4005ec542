//! Core Operation Errors
//!
//! Raised by the safe layer before a call reaches native code. Failures
//! inside the native library itself are not translated.

use entities_mat_types::{CvSize, Depth, TypeCodeError};

/// Errors from the owning handles and operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Argument rejected before the native call
    InvalidArgument(String),
    /// Index outside the array (or its region of interest)
    IndexOutOfRange { index: Vec<i32>, extents: Vec<i32> },
    /// Wrong number of indices for the array
    DimensionMismatch { expected: usize, actual: usize },
    /// Arrays that must agree in size do not
    SizeMismatch { expected: CvSize, actual: CvSize },
    /// Arrays that must agree in channel count do not
    ChannelMismatch { expected: i32, actual: i32 },
    /// Arrays that must agree in element depth do not
    DepthMismatch { expected: Depth, actual: Depth },
    /// Native allocation or clone returned null
    AllocationFailed(&'static str),
    /// Header type code could not be decoded
    TypeCode(TypeCodeError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CoreError::IndexOutOfRange { index, extents } => {
                write!(f, "Index {:?} out of range for extents {:?}", index, extents)
            }
            CoreError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected {} indices, got {}", expected, actual)
            }
            CoreError::SizeMismatch { expected, actual } => write!(
                f,
                "Size mismatch: expected {}x{}, got {}x{}",
                expected.width, expected.height, actual.width, actual.height
            ),
            CoreError::ChannelMismatch { expected, actual } => {
                write!(f, "Channel mismatch: expected {}, got {}", expected, actual)
            }
            CoreError::DepthMismatch { expected, actual } => {
                write!(f, "Depth mismatch: expected {}, got {}", expected, actual)
            }
            CoreError::AllocationFailed(what) => write!(f, "{} returned null", what),
            CoreError::TypeCode(e) => write!(f, "Type code error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::TypeCode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TypeCodeError> for CoreError {
    fn from(e: TypeCodeError) -> Self {
        CoreError::TypeCode(e)
    }
}

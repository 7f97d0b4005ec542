//! Matrix Type Facades
//!
//! Decode the `type` field of a matrix header.

use adapters_opencv_core::Mat;
use entities_mat_types::{MatType, TypeCodeError};

/// Combined depth and channel field of the header (`type & 0xFFF`)
pub fn mat_magic_type(mat: &Mat) -> i32 {
    entities_mat_types::magic(mat.packed_type().raw())
}

/// Channel count of the header's element type
pub fn mat_channels(mat: &Mat) -> i32 {
    entities_mat_types::channels(mat.packed_type().raw())
}

/// Base element type of the header
///
/// # Errors
/// `UnsupportedDepth` for every depth tag other than 8-bit unsigned.
pub fn mat_type(mat: &Mat) -> Result<MatType, TypeCodeError> {
    entities_mat_types::base_type(mat.packed_type().raw())
}

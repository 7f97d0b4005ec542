//! Array View
//!
//! The native API takes any header as an untyped `CvArr*`. [`Array`] is the
//! shared view the operations need: the header pointer, its extents and the
//! entry points that own it.

use std::sync::Arc;

use entities_mat_types::{CvSize, PackedTypeCode};
use infrastructure_opencv_bindings::CvArr;

use crate::error::CoreError;
use crate::native_api::CoreApi;

/// A live native array header
///
/// # Safety
/// Implementors guarantee that `arr_ptr`/`arr_ptr_mut` return a header the
/// native library accepts as `CvArr*`, valid for the lifetime of the borrow,
/// and that `extents` describes the region native element access checks
/// against.
pub unsafe trait Array {
    /// Header pointer for read-only native calls
    fn arr_ptr(&self) -> *const CvArr;

    /// Header pointer for mutating native calls
    fn arr_ptr_mut(&mut self) -> *mut CvArr;

    /// Extent of each dimension, outermost first (rows before columns)
    fn extents(&self) -> Vec<i32>;

    /// Interleaved values per element
    fn channels(&self) -> i32;

    /// Packed element type
    fn type_code(&self) -> PackedTypeCode;

    /// Entry points that own this header
    fn api(&self) -> &Arc<dyn CoreApi>;

    /// Two-dimensional size as width (columns) by height (rows)
    fn size(&self) -> CvSize {
        let extents = self.extents();
        match extents.as_slice() {
            [rows, cols] => CvSize::new(*cols, *rows),
            [len] => CvSize::new(*len, 1),
            [] => CvSize::default(),
            _ => CvSize::new(extents.iter().skip(1).product(), extents[0]),
        }
    }

    /// Total element count
    fn total(&self) -> i64 {
        self.extents().iter().map(|e| i64::from(*e)).product()
    }
}

/// Validate `index` against `arr`
///
/// A single index addresses the array linearly; otherwise one index per
/// dimension is required.
pub(crate) fn check_index<A: Array + ?Sized>(arr: &A, index: &[i32]) -> Result<(), CoreError> {
    let extents = arr.extents();

    if index.len() == 1 {
        let i = i64::from(index[0]);
        if i < 0 || i >= arr.total() {
            return Err(CoreError::IndexOutOfRange {
                index: index.to_vec(),
                extents,
            });
        }
        return Ok(());
    }

    if index.len() != extents.len() {
        return Err(CoreError::DimensionMismatch {
            expected: extents.len(),
            actual: index.len(),
        });
    }
    if index.iter().zip(&extents).any(|(i, e)| *i < 0 || i >= e) {
        return Err(CoreError::IndexOutOfRange {
            index: index.to_vec(),
            extents,
        });
    }
    Ok(())
}

/// Require `a` and `b` to have the same size
pub(crate) fn check_same_size<A, B>(a: &A, b: &B) -> Result<(), CoreError>
where
    A: Array + ?Sized,
    B: Array + ?Sized,
{
    let (expected, actual) = (a.size(), b.size());
    if expected != actual {
        return Err(CoreError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Require `a` and `b` to have the same element depth
pub(crate) fn check_same_depth<A, B>(a: &A, b: &B) -> Result<(), CoreError>
where
    A: Array + ?Sized,
    B: Array + ?Sized,
{
    let (expected, actual) = (a.type_code().depth(), b.type_code().depth());
    if expected != actual {
        return Err(CoreError::DepthMismatch { expected, actual });
    }
    Ok(())
}

/// Require `a` and `b` to have the same channel count
pub(crate) fn check_same_channels<A, B>(a: &A, b: &B) -> Result<(), CoreError>
where
    A: Array + ?Sized,
    B: Array + ?Sized,
{
    let (expected, actual) = (a.channels(), b.channels());
    if expected != actual {
        return Err(CoreError::ChannelMismatch { expected, actual });
    }
    Ok(())
}

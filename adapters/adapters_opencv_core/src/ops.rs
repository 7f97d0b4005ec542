//! Array Operations
//!
//! Safe entry points over the native element accessors and whole-array
//! operations. Arguments are checked against the header before the call;
//! the native library's own failure handling aborts the process, so nothing
//! invalid may reach it.
//!
//! Binary operations call through the destination's entry points.

use entities_mat_types::{CvScalar, PackedTypeCode};
use infrastructure_opencv_bindings::CvArr;

use crate::array::{check_index, check_same_channels, check_same_depth, check_same_size, Array};
use crate::error::CoreError;
use crate::mat::Mat;

fn mask_ptr(arr_size: entities_mat_types::CvSize, mask: Option<&Mat>) -> Result<*const CvArr, CoreError> {
    let Some(mask) = mask else {
        return Ok(std::ptr::null());
    };
    if mask.size() != arr_size {
        return Err(CoreError::SizeMismatch {
            expected: arr_size,
            actual: mask.size(),
        });
    }
    // Masks are single-channel 8-bit
    if mask.packed_type().magic() != 0 {
        return Err(CoreError::InvalidArgument(format!(
            "mask must be CV_8UC1, got type {}",
            mask.packed_type().magic()
        )));
    }
    Ok(mask.arr_ptr())
}

// --- Whole-array operations ---

/// Copy `src` into `dst`, optionally only where `mask` is non-zero (`cvCopy`)
///
/// # Errors
/// `SizeMismatch`, `ChannelMismatch` or `DepthMismatch` unless both arrays
/// share size and element type.
pub fn copy<S, D>(src: &S, dst: &mut D, mask: Option<&Mat>) -> Result<(), CoreError>
where
    S: Array + ?Sized,
    D: Array + ?Sized,
{
    check_same_size(src, dst)?;
    check_same_channels(src, dst)?;
    check_same_depth(src, dst)?;
    let mask = mask_ptr(dst.size(), mask)?;
    let dst_ptr = dst.arr_ptr_mut();
    unsafe { dst.api().copy(src.arr_ptr(), dst_ptr, mask) };
    Ok(())
}

/// Assign `value` to every element, optionally only under `mask` (`cvSet`)
pub fn set<A: Array + ?Sized>(arr: &mut A, value: CvScalar, mask: Option<&Mat>) -> Result<(), CoreError> {
    let mask = mask_ptr(arr.size(), mask)?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set(ptr, value, mask) };
    Ok(())
}

/// `dst = src1 * alpha + src2 * beta + gamma` (`cvAddWeighted`)
///
/// The sources must share depth; `dst` may have any depth and receives the
/// converted result.
pub fn add_weighted<A, B, D>(
    src1: &A,
    alpha: f64,
    src2: &B,
    beta: f64,
    gamma: f64,
    dst: &mut D,
) -> Result<(), CoreError>
where
    A: Array + ?Sized,
    B: Array + ?Sized,
    D: Array + ?Sized,
{
    check_same_size(src1, src2)?;
    check_same_size(src1, dst)?;
    check_same_channels(src1, src2)?;
    check_same_channels(src1, dst)?;
    // Only the output may convert
    check_same_depth(src1, src2)?;
    let dst_ptr = dst.arr_ptr_mut();
    unsafe {
        dst.api()
            .add_weighted(src1.arr_ptr(), alpha, src2.arr_ptr(), beta, gamma, dst_ptr)
    };
    Ok(())
}

/// Set the diagonal to `value` and everything else to zero (`cvSetIdentity`)
pub fn set_identity<A: Array + ?Sized>(arr: &mut A, value: CvScalar) {
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_identity(ptr, value) };
}

/// Write the transpose of `src` into `dst` (`cvTranspose`)
///
/// # Errors
/// `SizeMismatch` unless `dst` is `src` with width and height swapped.
pub fn transpose<S, D>(src: &S, dst: &mut D) -> Result<(), CoreError>
where
    S: Array + ?Sized,
    D: Array + ?Sized,
{
    let expected = src.size().transposed();
    if dst.size() != expected {
        return Err(CoreError::SizeMismatch {
            expected,
            actual: dst.size(),
        });
    }
    check_same_channels(src, dst)?;
    check_same_depth(src, dst)?;
    let dst_ptr = dst.arr_ptr_mut();
    unsafe { dst.api().transpose(src.arr_ptr(), dst_ptr) };
    Ok(())
}

/// Transpose a square array in place
pub fn transpose_in_place<A: Array + ?Sized>(arr: &mut A) -> Result<(), CoreError> {
    let size = arr.size();
    if size.width != size.height {
        return Err(CoreError::SizeMismatch {
            expected: size.transposed(),
            actual: size,
        });
    }
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().transpose(ptr.cast_const(), ptr) };
    Ok(())
}

/// Set every element to zero (`cvSetZero`)
pub fn set_zero<A: Array + ?Sized>(arr: &mut A) {
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_zero(ptr) };
}

/// Element type as reported by the native library (`cvGetElemType`)
pub fn elem_type<A: Array + ?Sized>(arr: &A) -> PackedTypeCode {
    PackedTypeCode::new(unsafe { arr.api().get_elem_type(arr.arr_ptr()) })
}

// --- Element access ---

/// Element at linear index `idx0` (`cvGet1D`)
pub fn get_1d<A: Array + ?Sized>(arr: &A, idx0: i32) -> Result<CvScalar, CoreError> {
    check_index(arr, &[idx0])?;
    Ok(unsafe { arr.api().get_1d(arr.arr_ptr(), idx0) })
}

/// Element at row `idx0`, column `idx1` (`cvGet2D`)
pub fn get_2d<A: Array + ?Sized>(arr: &A, idx0: i32, idx1: i32) -> Result<CvScalar, CoreError> {
    check_index(arr, &[idx0, idx1])?;
    Ok(unsafe { arr.api().get_2d(arr.arr_ptr(), idx0, idx1) })
}

/// Element of a three-dimensional array (`cvGet3D`)
pub fn get_3d<A: Array + ?Sized>(arr: &A, idx0: i32, idx1: i32, idx2: i32) -> Result<CvScalar, CoreError> {
    check_index(arr, &[idx0, idx1, idx2])?;
    Ok(unsafe { arr.api().get_3d(arr.arr_ptr(), idx0, idx1, idx2) })
}

/// Single-channel value at linear index `idx0` (`cvGetReal1D`)
pub fn get_real_1d<A: Array + ?Sized>(arr: &A, idx0: i32) -> Result<f64, CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0])?;
    Ok(unsafe { arr.api().get_real_1d(arr.arr_ptr(), idx0) })
}

/// Single-channel value at row `idx0`, column `idx1` (`cvGetReal2D`)
pub fn get_real_2d<A: Array + ?Sized>(arr: &A, idx0: i32, idx1: i32) -> Result<f64, CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0, idx1])?;
    Ok(unsafe { arr.api().get_real_2d(arr.arr_ptr(), idx0, idx1) })
}

/// Single-channel value of a three-dimensional array (`cvGetReal3D`)
pub fn get_real_3d<A: Array + ?Sized>(arr: &A, idx0: i32, idx1: i32, idx2: i32) -> Result<f64, CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0, idx1, idx2])?;
    Ok(unsafe { arr.api().get_real_3d(arr.arr_ptr(), idx0, idx1, idx2) })
}

/// Assign the element at linear index `idx0` (`cvSet1D`)
pub fn set_1d<A: Array + ?Sized>(arr: &mut A, idx0: i32, value: CvScalar) -> Result<(), CoreError> {
    check_index(arr, &[idx0])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_1d(ptr, idx0, value) };
    Ok(())
}

/// Assign the element at row `idx0`, column `idx1` (`cvSet2D`)
pub fn set_2d<A: Array + ?Sized>(arr: &mut A, idx0: i32, idx1: i32, value: CvScalar) -> Result<(), CoreError> {
    check_index(arr, &[idx0, idx1])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_2d(ptr, idx0, idx1, value) };
    Ok(())
}

/// Assign an element of a three-dimensional array (`cvSet3D`)
pub fn set_3d<A: Array + ?Sized>(
    arr: &mut A,
    idx0: i32,
    idx1: i32,
    idx2: i32,
    value: CvScalar,
) -> Result<(), CoreError> {
    check_index(arr, &[idx0, idx1, idx2])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_3d(ptr, idx0, idx1, idx2, value) };
    Ok(())
}

/// Assign a single-channel value at linear index `idx0` (`cvSetReal1D`)
pub fn set_real_1d<A: Array + ?Sized>(arr: &mut A, idx0: i32, value: f64) -> Result<(), CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_real_1d(ptr, idx0, value) };
    Ok(())
}

/// Assign a single-channel value at row `idx0`, column `idx1` (`cvSetReal2D`)
pub fn set_real_2d<A: Array + ?Sized>(arr: &mut A, idx0: i32, idx1: i32, value: f64) -> Result<(), CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0, idx1])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_real_2d(ptr, idx0, idx1, value) };
    Ok(())
}

/// Assign a single-channel value of a three-dimensional array (`cvSetReal3D`)
pub fn set_real_3d<A: Array + ?Sized>(
    arr: &mut A,
    idx0: i32,
    idx1: i32,
    idx2: i32,
    value: f64,
) -> Result<(), CoreError> {
    check_single_channel(arr)?;
    check_index(arr, &[idx0, idx1, idx2])?;
    let ptr = arr.arr_ptr_mut();
    unsafe { arr.api().set_real_3d(ptr, idx0, idx1, idx2, value) };
    Ok(())
}

// The real accessors reject multi-channel arrays natively
fn check_single_channel<A: Array + ?Sized>(arr: &A) -> Result<(), CoreError> {
    if arr.channels() != 1 {
        return Err(CoreError::ChannelMismatch {
            expected: 1,
            actual: arr.channels(),
        });
    }
    Ok(())
}

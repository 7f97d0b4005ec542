//! Native API Seam
//!
//! [`CoreApi`] lists the core entry points as trait methods so the owning
//! handles do not depend on how the native symbols were obtained. The
//! production implementation forwards to a loaded [`CoreLibrary`].
//!
//! Every method is `unsafe`: pointers must be live headers of the kind the
//! native function expects, and indices must be in range, or the native
//! library aborts or corrupts memory.

use entities_mat_types::{CvRect, CvScalar, CvSize};
use infrastructure_opencv_bindings::{CoreLibrary, CvArr, CvMat, IplImage};
use libc::{c_double, c_int};

/// The core entry points, one method per native function
pub trait CoreApi: Send + Sync {
    unsafe fn create_mat(&self, rows: c_int, cols: c_int, type_: c_int) -> *mut CvMat;
    unsafe fn create_image(&self, size: CvSize, depth: c_int, channels: c_int) -> *mut IplImage;
    unsafe fn clone_image(&self, image: *const IplImage) -> *mut IplImage;
    unsafe fn clone_mat(&self, mat: *const CvMat) -> *mut CvMat;
    /// Frees the matrix and nulls `*mat`
    unsafe fn release_mat(&self, mat: *mut *mut CvMat);
    /// Frees the image and nulls `*image`
    unsafe fn release_image(&self, image: *mut *mut IplImage);

    unsafe fn copy(&self, src: *const CvArr, dst: *mut CvArr, mask: *const CvArr);
    unsafe fn set(&self, arr: *mut CvArr, value: CvScalar, mask: *const CvArr);
    unsafe fn add_weighted(
        &self,
        src1: *const CvArr,
        alpha: c_double,
        src2: *const CvArr,
        beta: c_double,
        gamma: c_double,
        dst: *mut CvArr,
    );
    unsafe fn set_identity(&self, mat: *mut CvArr, value: CvScalar);
    unsafe fn transpose(&self, src: *const CvArr, dst: *mut CvArr);
    unsafe fn set_zero(&self, arr: *mut CvArr);
    unsafe fn get_elem_type(&self, arr: *const CvArr) -> c_int;

    unsafe fn set_image_roi(&self, image: *mut IplImage, rect: CvRect);
    unsafe fn get_image_roi(&self, image: *const IplImage) -> CvRect;
    unsafe fn reset_image_roi(&self, image: *mut IplImage);

    unsafe fn get_1d(&self, arr: *const CvArr, idx0: c_int) -> CvScalar;
    unsafe fn get_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> CvScalar;
    unsafe fn get_3d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> CvScalar;

    unsafe fn get_real_1d(&self, arr: *const CvArr, idx0: c_int) -> c_double;
    unsafe fn get_real_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> c_double;
    unsafe fn get_real_3d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int)
        -> c_double;

    unsafe fn set_1d(&self, arr: *mut CvArr, idx0: c_int, value: CvScalar);
    unsafe fn set_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: CvScalar);
    unsafe fn set_3d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, idx2: c_int, value: CvScalar);

    unsafe fn set_real_1d(&self, arr: *mut CvArr, idx0: c_int, value: c_double);
    unsafe fn set_real_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: c_double);
    unsafe fn set_real_3d(
        &self,
        arr: *mut CvArr,
        idx0: c_int,
        idx1: c_int,
        idx2: c_int,
        value: c_double,
    );
}

impl CoreApi for CoreLibrary {
    unsafe fn create_mat(&self, rows: c_int, cols: c_int, type_: c_int) -> *mut CvMat {
        (self.symbols().create_mat)(rows, cols, type_)
    }

    unsafe fn create_image(&self, size: CvSize, depth: c_int, channels: c_int) -> *mut IplImage {
        (self.symbols().create_image)(size, depth, channels)
    }

    unsafe fn clone_image(&self, image: *const IplImage) -> *mut IplImage {
        (self.symbols().clone_image)(image)
    }

    unsafe fn clone_mat(&self, mat: *const CvMat) -> *mut CvMat {
        (self.symbols().clone_mat)(mat)
    }

    unsafe fn release_mat(&self, mat: *mut *mut CvMat) {
        (self.symbols().release_mat)(mat)
    }

    unsafe fn release_image(&self, image: *mut *mut IplImage) {
        (self.symbols().release_image)(image)
    }

    unsafe fn copy(&self, src: *const CvArr, dst: *mut CvArr, mask: *const CvArr) {
        (self.symbols().copy)(src, dst, mask)
    }

    unsafe fn set(&self, arr: *mut CvArr, value: CvScalar, mask: *const CvArr) {
        (self.symbols().set)(arr, value, mask)
    }

    unsafe fn add_weighted(
        &self,
        src1: *const CvArr,
        alpha: c_double,
        src2: *const CvArr,
        beta: c_double,
        gamma: c_double,
        dst: *mut CvArr,
    ) {
        (self.symbols().add_weighted)(src1, alpha, src2, beta, gamma, dst)
    }

    unsafe fn set_identity(&self, mat: *mut CvArr, value: CvScalar) {
        (self.symbols().set_identity)(mat, value)
    }

    unsafe fn transpose(&self, src: *const CvArr, dst: *mut CvArr) {
        (self.symbols().transpose)(src, dst)
    }

    unsafe fn set_zero(&self, arr: *mut CvArr) {
        (self.symbols().set_zero)(arr)
    }

    unsafe fn get_elem_type(&self, arr: *const CvArr) -> c_int {
        (self.symbols().get_elem_type)(arr)
    }

    unsafe fn set_image_roi(&self, image: *mut IplImage, rect: CvRect) {
        (self.symbols().set_image_roi)(image, rect)
    }

    unsafe fn get_image_roi(&self, image: *const IplImage) -> CvRect {
        (self.symbols().get_image_roi)(image)
    }

    unsafe fn reset_image_roi(&self, image: *mut IplImage) {
        (self.symbols().reset_image_roi)(image)
    }

    unsafe fn get_1d(&self, arr: *const CvArr, idx0: c_int) -> CvScalar {
        (self.symbols().get_1d)(arr, idx0)
    }

    unsafe fn get_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> CvScalar {
        (self.symbols().get_2d)(arr, idx0, idx1)
    }

    unsafe fn get_3d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int, idx2: c_int) -> CvScalar {
        (self.symbols().get_3d)(arr, idx0, idx1, idx2)
    }

    unsafe fn get_real_1d(&self, arr: *const CvArr, idx0: c_int) -> c_double {
        (self.symbols().get_real_1d)(arr, idx0)
    }

    unsafe fn get_real_2d(&self, arr: *const CvArr, idx0: c_int, idx1: c_int) -> c_double {
        (self.symbols().get_real_2d)(arr, idx0, idx1)
    }

    unsafe fn get_real_3d(
        &self,
        arr: *const CvArr,
        idx0: c_int,
        idx1: c_int,
        idx2: c_int,
    ) -> c_double {
        (self.symbols().get_real_3d)(arr, idx0, idx1, idx2)
    }

    unsafe fn set_1d(&self, arr: *mut CvArr, idx0: c_int, value: CvScalar) {
        (self.symbols().set_1d)(arr, idx0, value)
    }

    unsafe fn set_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: CvScalar) {
        (self.symbols().set_2d)(arr, idx0, idx1, value)
    }

    unsafe fn set_3d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, idx2: c_int, value: CvScalar) {
        (self.symbols().set_3d)(arr, idx0, idx1, idx2, value)
    }

    unsafe fn set_real_1d(&self, arr: *mut CvArr, idx0: c_int, value: c_double) {
        (self.symbols().set_real_1d)(arr, idx0, value)
    }

    unsafe fn set_real_2d(&self, arr: *mut CvArr, idx0: c_int, idx1: c_int, value: c_double) {
        (self.symbols().set_real_2d)(arr, idx0, idx1, value)
    }

    unsafe fn set_real_3d(
        &self,
        arr: *mut CvArr,
        idx0: c_int,
        idx1: c_int,
        idx2: c_int,
        value: c_double,
    ) {
        (self.symbols().set_real_3d)(arr, idx0, idx1, idx2, value)
    }
}

//! Owning Matrix Handle
//!
//! [`Mat`] owns one natively allocated `CvMat`. Ownership passes to the
//! handle on allocation or clone and the header is released exactly once:
//! explicitly through [`Mat::release`], or on drop.

use std::ptr::NonNull;
use std::sync::Arc;

use entities_mat_types::{CvScalar, CvSize, Depth, MatType, PackedTypeCode, TypeCodeError};
use infrastructure_opencv_bindings::{CvArr, CvMat};
use tracing::{debug, trace};

use crate::array::Array;
use crate::error::CoreError;
use crate::native_api::CoreApi;

/// A natively allocated matrix
pub struct Mat {
    raw: NonNull<CvMat>,
    api: Arc<dyn CoreApi>,
}

// Safety: the header is exclusively owned by this handle and the native
// library keeps no thread affinity for it. Shared access is not allowed
// because native reads are not synchronized with writes.
unsafe impl Send for Mat {}

impl Mat {
    /// Allocate a `rows` x `cols` matrix (`cvCreateMat`)
    ///
    /// Element contents are uninitialized; see [`Mat::zeros`].
    ///
    /// # Errors
    /// - `InvalidArgument`: non-positive dimensions
    /// - `AllocationFailed`: the native call returned null
    pub fn new(api: Arc<dyn CoreApi>, rows: i32, cols: i32, mat_type: MatType) -> Result<Self, CoreError> {
        if rows <= 0 || cols <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "matrix dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }

        let raw = unsafe { api.create_mat(rows, cols, mat_type.value()) };
        let raw = NonNull::new(raw).ok_or(CoreError::AllocationFailed("cvCreateMat"))?;
        debug!(rows, cols, mat_type = %mat_type, "created matrix");
        Ok(Self { raw, api })
    }

    /// Allocate a matrix with every element zero
    pub fn zeros(api: Arc<dyn CoreApi>, rows: i32, cols: i32, mat_type: MatType) -> Result<Self, CoreError> {
        let mut mat = Self::new(api, rows, cols, mat_type)?;
        let ptr = mat.arr_ptr_mut();
        unsafe { mat.api.set_zero(ptr) };
        Ok(mat)
    }

    /// Allocate an `n` x `n` identity matrix
    pub fn identity(api: Arc<dyn CoreApi>, n: i32, mat_type: MatType) -> Result<Self, CoreError> {
        let mut mat = Self::new(api, n, n, mat_type)?;
        let ptr = mat.arr_ptr_mut();
        unsafe { mat.api.set_identity(ptr, CvScalar::real(1.0)) };
        Ok(mat)
    }

    /// Deep copy of header and data (`cvCloneMat`)
    pub fn try_clone(&self) -> Result<Self, CoreError> {
        let raw = unsafe { self.api.clone_mat(self.raw.as_ptr()) };
        let raw = NonNull::new(raw).ok_or(CoreError::AllocationFailed("cvCloneMat"))?;
        Ok(Self {
            raw,
            api: Arc::clone(&self.api),
        })
    }

    /// Adopt a matrix allocated by the native library
    ///
    /// Returns `None` for null.
    ///
    /// # Safety
    /// `raw` must be a live `CvMat` allocated by `api`'s library and not
    /// owned by anything else; the handle will release it.
    pub unsafe fn from_raw(api: Arc<dyn CoreApi>, raw: *mut CvMat) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw, api })
    }

    /// Give up ownership without releasing
    ///
    /// The caller becomes responsible for `cvReleaseMat`.
    pub fn into_raw(self) -> *mut CvMat {
        let raw = self.raw.as_ptr();
        std::mem::forget(self);
        raw
    }

    /// Release the matrix now (`cvReleaseMat`)
    pub fn release(self) {
        drop(self)
    }

    pub fn as_ptr(&self) -> *const CvMat {
        self.raw.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut CvMat {
        self.raw.as_ptr()
    }

    fn header(&self) -> &CvMat {
        // Safety: the pointer is live for as long as the handle exists
        unsafe { self.raw.as_ref() }
    }

    pub fn rows(&self) -> i32 {
        self.header().rows
    }

    pub fn cols(&self) -> i32 {
        self.header().cols
    }

    /// Row stride in bytes
    pub fn step(&self) -> i32 {
        self.header().step
    }

    /// Raw `type` field including header flags
    pub fn packed_type(&self) -> PackedTypeCode {
        PackedTypeCode::new(self.header().type_)
    }

    pub fn depth(&self) -> Depth {
        self.packed_type().depth()
    }

    /// Table entry for the element type, if the header carries a named type
    pub fn mat_type(&self) -> Option<MatType> {
        self.packed_type().mat_type()
    }

    /// Narrow base-type decoding of the header, see
    /// [`entities_mat_types::base_type`]
    pub fn base_type(&self) -> Result<MatType, TypeCodeError> {
        self.packed_type().base_type()
    }

    /// Whether `other` shares size and element type
    pub fn same_shape(&self, other: &Mat) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.packed_type().magic() == other.packed_type().magic()
    }
}

unsafe impl Array for Mat {
    fn arr_ptr(&self) -> *const CvArr {
        self.raw.as_ptr().cast_const().cast()
    }

    fn arr_ptr_mut(&mut self) -> *mut CvArr {
        self.raw.as_ptr().cast()
    }

    fn extents(&self) -> Vec<i32> {
        vec![self.rows(), self.cols()]
    }

    fn channels(&self) -> i32 {
        self.packed_type().channels()
    }

    fn type_code(&self) -> PackedTypeCode {
        self.packed_type()
    }

    fn api(&self) -> &Arc<dyn CoreApi> {
        &self.api
    }

    fn size(&self) -> CvSize {
        CvSize::new(self.cols(), self.rows())
    }
}

impl Drop for Mat {
    fn drop(&mut self) {
        let mut raw = self.raw.as_ptr();
        trace!(ptr = ?raw, "releasing matrix");
        unsafe { self.api.release_mat(&mut raw) };
    }
}

impl std::fmt::Debug for Mat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mat")
            .field("ptr", &self.raw)
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("type", &self.packed_type().magic())
            .finish()
    }
}

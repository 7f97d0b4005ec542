//! Owning Image Handle
//!
//! [`Image`] owns one natively allocated `IplImage` and its region of
//! interest. Released exactly once through `cvReleaseImage`.

use std::ptr::NonNull;
use std::sync::Arc;

use entities_mat_types::{CvRect, CvSize, IplDepth, PackedTypeCode};
use infrastructure_opencv_bindings::{CvArr, IplImage};
use tracing::{debug, trace};

use crate::array::Array;
use crate::error::CoreError;
use crate::native_api::CoreApi;

/// Images carry between one and four channels
pub const MAX_IMAGE_CHANNELS: i32 = 4;

/// A natively allocated image
pub struct Image {
    raw: NonNull<IplImage>,
    api: Arc<dyn CoreApi>,
}

// Safety: exclusively owned header, see `Mat`.
unsafe impl Send for Image {}

impl Image {
    /// Allocate an image (`cvCreateImage`)
    ///
    /// # Errors
    /// - `InvalidArgument`: non-positive size, channels outside 1..=4, or a
    ///   depth with no element type
    /// - `AllocationFailed`: the native call returned null
    pub fn new(api: Arc<dyn CoreApi>, size: CvSize, depth: IplDepth, channels: i32) -> Result<Self, CoreError> {
        if !size.is_positive() {
            return Err(CoreError::InvalidArgument(format!(
                "image size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        if !(1..=MAX_IMAGE_CHANNELS).contains(&channels) {
            return Err(CoreError::InvalidArgument(format!(
                "image channels must be 1 to {}, got {}",
                MAX_IMAGE_CHANNELS, channels
            )));
        }
        if depth.to_depth().is_none() {
            return Err(CoreError::InvalidArgument(format!(
                "unknown IPL depth {:#x}",
                depth.raw()
            )));
        }

        let raw = unsafe { api.create_image(size, depth.raw(), channels) };
        let raw = NonNull::new(raw).ok_or(CoreError::AllocationFailed("cvCreateImage"))?;
        debug!(width = size.width, height = size.height, bits = depth.bits(), channels, "created image");
        Ok(Self { raw, api })
    }

    /// Deep copy including the region of interest (`cvCloneImage`)
    pub fn try_clone(&self) -> Result<Self, CoreError> {
        let raw = unsafe { self.api.clone_image(self.raw.as_ptr()) };
        let raw = NonNull::new(raw).ok_or(CoreError::AllocationFailed("cvCloneImage"))?;
        Ok(Self {
            raw,
            api: Arc::clone(&self.api),
        })
    }

    /// Adopt an image allocated by the native library
    ///
    /// # Safety
    /// `raw` must be a live `IplImage` allocated by `api`'s library and not
    /// owned by anything else.
    pub unsafe fn from_raw(api: Arc<dyn CoreApi>, raw: *mut IplImage) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw, api })
    }

    /// Give up ownership without releasing
    pub fn into_raw(self) -> *mut IplImage {
        let raw = self.raw.as_ptr();
        std::mem::forget(self);
        raw
    }

    /// Release the image now (`cvReleaseImage`)
    pub fn release(self) {
        drop(self)
    }

    pub fn as_ptr(&self) -> *const IplImage {
        self.raw.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut IplImage {
        self.raw.as_ptr()
    }

    fn header(&self) -> &IplImage {
        // Safety: the pointer is live for as long as the handle exists
        unsafe { self.raw.as_ref() }
    }

    /// Full image width, ignoring any region of interest
    pub fn width(&self) -> i32 {
        self.header().width
    }

    /// Full image height, ignoring any region of interest
    pub fn height(&self) -> i32 {
        self.header().height
    }

    pub fn full_size(&self) -> CvSize {
        CvSize::new(self.width(), self.height())
    }

    pub fn depth(&self) -> IplDepth {
        IplDepth::from_raw(self.header().depth)
    }

    /// Row stride in bytes
    pub fn width_step(&self) -> i32 {
        self.header().width_step
    }

    /// Whether a region of interest is set
    pub fn has_roi(&self) -> bool {
        !self.header().roi.is_null()
    }

    /// Restrict native operations to `rect` (`cvSetImageROI`)
    ///
    /// # Errors
    /// `InvalidArgument` when `rect` is empty or leaves the image.
    pub fn set_roi(&mut self, rect: CvRect) -> Result<(), CoreError> {
        if !rect.size().is_positive() || !rect.fits_within(self.full_size()) {
            return Err(CoreError::InvalidArgument(format!(
                "ROI {:?} outside {}x{} image",
                rect,
                self.width(),
                self.height()
            )));
        }
        unsafe { self.api.set_image_roi(self.raw.as_ptr(), rect) };
        trace!(?rect, "set image ROI");
        Ok(())
    }

    /// Current region of interest, the whole image when none is set
    /// (`cvGetImageROI`)
    pub fn roi(&self) -> CvRect {
        unsafe { self.api.get_image_roi(self.raw.as_ptr()) }
    }

    /// Clear the region of interest (`cvResetImageROI`)
    pub fn reset_roi(&mut self) {
        unsafe { self.api.reset_image_roi(self.raw.as_ptr()) };
    }
}

unsafe impl Array for Image {
    fn arr_ptr(&self) -> *const CvArr {
        self.raw.as_ptr().cast_const().cast()
    }

    fn arr_ptr_mut(&mut self) -> *mut CvArr {
        self.raw.as_ptr().cast()
    }

    /// Rows and columns of the region of interest, or of the whole image
    fn extents(&self) -> Vec<i32> {
        let header = self.header();
        match unsafe { header.roi.as_ref() } {
            Some(roi) => vec![roi.height, roi.width],
            None => vec![header.height, header.width],
        }
    }

    fn channels(&self) -> i32 {
        self.header().n_channels
    }

    fn type_code(&self) -> PackedTypeCode {
        match self.depth().to_depth() {
            Some(depth) => PackedTypeCode::from_parts(depth, self.channels()),
            None => PackedTypeCode::new(-1),
        }
    }

    fn api(&self) -> &Arc<dyn CoreApi> {
        &self.api
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        let mut raw = self.raw.as_ptr();
        trace!(ptr = ?raw, "releasing image");
        unsafe { self.api.release_image(&mut raw) };
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("ptr", &self.raw)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("channels", &self.channels())
            .field("depth", &self.depth())
            .finish()
    }
}

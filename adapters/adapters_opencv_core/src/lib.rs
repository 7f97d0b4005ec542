//! Adapters Layer: OpenCV Core
//!
//! Safe handles over the OpenCV core C API. Native entry points are reached
//! through the [`CoreApi`] trait, implemented for the runtime-loaded
//! [`CoreLibrary`](infrastructure_opencv_bindings::CoreLibrary).
//!
//! ## Modules
//!
//! - **[`mat`]**: owning `CvMat` handle
//! - **[`image`]**: owning `IplImage` handle with region of interest
//! - **[`array`]**: the view shared by both handles
//! - **[`ops`]**: validated element access and whole-array operations
//! - **[`native_api`]**: the entry-point trait
//!
//! ## Ownership
//!
//! Allocation and clone hand the header to a handle; the handle releases it
//! exactly once, on drop or through `release`. `into_raw` opts out.
//!
//! ## See Also
//!
//! - [`entities_mat_types`](../entities_mat_types/index.html): Type codes and by-value structs
//! - [`infrastructure_opencv_bindings`](../infrastructure_opencv_bindings/index.html): Library loading

pub mod array;
pub mod error;
pub mod image;
pub mod mat;
pub mod native_api;
pub mod ops;

#[cfg(test)]
pub(crate) mod fake;

pub use array::Array;
pub use error::CoreError;
pub use image::{Image, MAX_IMAGE_CHANNELS};
pub use mat::Mat;
pub use native_api::CoreApi;

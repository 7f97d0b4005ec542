//! Entities Layer: Matrix Types
//!
//! Pure data shared by every other layer of the OpenCV binding:
//! - Packed type-code decoding (depth tag and channel count)
//! - The `cvMatType` constant table
//! - Depth tags and IPL depth constants
//! - By-value ABI structs (`CvSize`, `CvPoint`, `CvPoint2D64f`, `CvRect`, `CvScalar`)
//! - RANSAC iteration and inlier helpers
//!
//! Nothing here touches native code.
//!
//! ## See Also
//!
//! - [`infrastructure_opencv_bindings`](../infrastructure_opencv_bindings/index.html): Native surface
//! - [`adapters_opencv_core`](../adapters_opencv_core/index.html): Owning handles

pub mod depth;
pub mod estimation;
pub mod geometry;
pub mod mat_type;
pub mod type_code;

pub use depth::{Depth, IplDepth};
pub use estimation::{find_inliers, ransac_update_num_iters, EstimationError};
pub use geometry::{CvPoint, CvPoint2D64f, CvRect, CvScalar, CvSize};
pub use mat_type::{MatType, MAT_TYPE_TABLE};
pub use type_code::{base_type, channels, magic, PackedTypeCode, TypeCodeError};

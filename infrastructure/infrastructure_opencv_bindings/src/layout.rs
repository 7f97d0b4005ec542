//! Native Header Layouts
//!
//! `#[repr(C)]` mirrors of the headers the core API hands out. Only the
//! fields needed to read shape and type information are relied on; the rest
//! exist so that sizes and offsets match the native definitions.

use libc::{c_char, c_int, c_void};

/// Generic array argument (`CvArr`)
///
/// The native API accepts any header (`CvMat`, `IplImage`, ...) through an
/// untyped pointer and dispatches on the header contents.
pub type CvArr = c_void;

/// Matrix header
///
/// Equivalent to C's `CvMat`. `data` is a union of typed pointers natively;
/// all members share one address so a byte pointer stands in for it.
#[repr(C)]
#[derive(Debug)]
pub struct CvMat {
    /// Packed type code, see `entities_mat_types::type_code`
    pub type_: c_int,
    /// Row stride in bytes
    pub step: c_int,
    /// Data reference count, for internal use
    pub refcount: *mut c_int,
    /// Header reference count, for internal use
    pub hdr_refcount: c_int,
    /// First element
    pub data: *mut u8,
    pub rows: c_int,
    pub cols: c_int,
}

/// Image region of interest
///
/// Equivalent to C's `IplROI`. `coi` is the 1-based channel of interest, 0
/// selecting all channels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IplROI {
    pub coi: c_int,
    pub x_offset: c_int,
    pub y_offset: c_int,
    pub width: c_int,
    pub height: c_int,
}

/// Opaque tile description, never dereferenced
#[repr(C)]
pub struct IplTileInfo {
    _opaque: [u8; 0],
}

/// Image header
///
/// Equivalent to C's `IplImage`.
#[repr(C)]
#[derive(Debug)]
pub struct IplImage {
    /// Size of this header in bytes
    pub n_size: c_int,
    /// Version, always 0
    pub id: c_int,
    /// Number of channels, 1 to 4
    pub n_channels: c_int,
    pub alpha_channel: c_int,
    /// IPL depth, see `entities_mat_types::IplDepth`
    pub depth: c_int,
    pub color_model: [c_char; 4],
    pub channel_seq: [c_char; 4],
    /// 0 interleaved, 1 separate planes
    pub data_order: c_int,
    /// 0 top-left origin, 1 bottom-left
    pub origin: c_int,
    pub align: c_int,
    pub width: c_int,
    pub height: c_int,
    /// Region of interest, null for the whole image
    pub roi: *mut IplROI,
    pub mask_roi: *mut IplImage,
    pub image_id: *mut c_void,
    pub tile_info: *mut IplTileInfo,
    /// Image data size in bytes
    pub image_size: c_int,
    pub image_data: *mut c_char,
    /// Row stride in bytes
    pub width_step: c_int,
    pub border_mode: [c_int; 4],
    pub border_const: [c_int; 4],
    pub image_data_origin: *mut c_char,
}

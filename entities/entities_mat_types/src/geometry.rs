//! By-Value ABI Structs
//!
//! Small structs the native API passes and returns by value. Layouts are
//! `#[repr(C)]` and must not change.

/// Equivalent to C's `CvSize`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CvSize {
    pub width: i32,
    pub height: i32,
}

impl CvSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of elements covered, `None` on negative sizes or overflow
    pub fn area(&self) -> Option<usize> {
        let w = usize::try_from(self.width).ok()?;
        let h = usize::try_from(self.height).ok()?;
        w.checked_mul(h)
    }

    /// Whether both extents are strictly positive
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width and height swapped
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Equivalent to C's `CvPoint`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CvPoint {
    pub x: i32,
    pub y: i32,
}

impl CvPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Equivalent to C's `CvPoint2D64f`, the element of a `CV_64FC2` array
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CvPoint2D64f {
    pub x: f64,
    pub y: f64,
}

impl CvPoint2D64f {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Equivalent to C's `CvRect`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CvRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CvRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin covering `size`
    pub fn from_size(size: CvSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn origin(&self) -> CvPoint {
        CvPoint::new(self.x, self.y)
    }

    pub fn size(&self) -> CvSize {
        CvSize::new(self.width, self.height)
    }

    /// Whether the rectangle lies entirely within `bounds` (anchored at 0,0)
    pub fn fits_within(&self, bounds: CvSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && i64::from(self.x) + i64::from(self.width) <= i64::from(bounds.width)
            && i64::from(self.y) + i64::from(self.height) <= i64::from(bounds.height)
    }

    /// Intersection with `other`, `None` when they do not overlap
    pub fn intersect(&self, other: &CvRect) -> Option<CvRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y1 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(CvRect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Equivalent to C's `CvScalar`: up to four channel values
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CvScalar {
    pub val: [f64; 4],
}

impl CvScalar {
    pub fn new(v0: f64, v1: f64, v2: f64, v3: f64) -> Self {
        Self { val: [v0, v1, v2, v3] }
    }

    /// Same value in every channel (`cvScalarAll`)
    pub fn all(v: f64) -> Self {
        Self { val: [v; 4] }
    }

    /// First channel set, others zero (`cvRealScalar`)
    pub fn real(v: f64) -> Self {
        Self::new(v, 0.0, 0.0, 0.0)
    }

    /// Values of the first `channels` channels
    pub fn channels(&self, channels: usize) -> &[f64] {
        &self.val[..channels.min(4)]
    }
}

impl From<[f64; 4]> for CvScalar {
    fn from(val: [f64; 4]) -> Self {
        Self { val }
    }
}

impl From<f64> for CvScalar {
    fn from(v: f64) -> Self {
        Self::real(v)
    }
}

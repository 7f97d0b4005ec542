//! Depth Tags
//!
//! Element storage types carried in the low three bits of a packed matrix
//! type code, and the IPL depth constants used when allocating images.

/// Element depth of a matrix
///
/// Equivalent to the `CV_8U` .. `CV_USRTYPE1` depth tags. The discriminant is
/// the 3-bit tag stored in the packed type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Depth {
    /// Unsigned 8-bit
    U8 = 0,
    /// Signed 8-bit
    S8 = 1,
    /// Unsigned 16-bit
    U16 = 2,
    /// Signed 16-bit
    S16 = 3,
    /// Signed 32-bit
    S32 = 4,
    /// 32-bit float
    F32 = 5,
    /// 64-bit float
    F64 = 6,
    /// User-defined slot
    UserType1 = 7,
}

impl Depth {
    /// All depth tags in tag order
    pub const ALL: [Depth; 8] = [
        Depth::U8,
        Depth::S8,
        Depth::U16,
        Depth::S16,
        Depth::S32,
        Depth::F32,
        Depth::F64,
        Depth::UserType1,
    ];

    /// Decode a depth from the low three bits of `bits`
    ///
    /// Every 3-bit pattern names a depth, so this never fails; higher bits
    /// are ignored.
    pub fn from_tag(bits: i32) -> Self {
        Self::ALL[(bits & 0x7) as usize]
    }

    /// The 3-bit tag
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Size in bytes of one channel value, `None` for the user slot
    pub fn element_size(self) -> Option<usize> {
        match self {
            Depth::U8 | Depth::S8 => Some(1),
            Depth::U16 | Depth::S16 => Some(2),
            Depth::S32 | Depth::F32 => Some(4),
            Depth::F64 => Some(8),
            Depth::UserType1 => None,
        }
    }

    /// Symbolic name as used by the native headers
    pub fn name(self) -> &'static str {
        match self {
            Depth::U8 => "CV_8U",
            Depth::S8 => "CV_8S",
            Depth::U16 => "CV_16U",
            Depth::S16 => "CV_16S",
            Depth::S32 => "CV_32S",
            Depth::F32 => "CV_32F",
            Depth::F64 => "CV_64F",
            Depth::UserType1 => "CV_USRTYPE1",
        }
    }

    /// Matching IPL depth for image allocation, `None` for the user slot
    pub fn to_ipl(self) -> Option<IplDepth> {
        match self {
            Depth::U8 => Some(IplDepth::U8),
            Depth::S8 => Some(IplDepth::S8),
            Depth::U16 => Some(IplDepth::U16),
            Depth::S16 => Some(IplDepth::S16),
            Depth::S32 => Some(IplDepth::S32),
            Depth::F32 => Some(IplDepth::F32),
            Depth::F64 => Some(IplDepth::F64),
            Depth::UserType1 => None,
        }
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed-depth marker bit of IPL depth constants
pub const IPL_DEPTH_SIGN: u32 = 0x8000_0000;

/// IPL image depth
///
/// Equivalent to the `IPL_DEPTH_*` constants accepted by `cvCreateImage`.
/// The low bits carry the bit width; signed depths also set
/// [`IPL_DEPTH_SIGN`], which is why the raw value is an `i32` with the top
/// bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IplDepth(i32);

impl IplDepth {
    pub const U8: Self = Self(8);
    pub const S8: Self = Self((IPL_DEPTH_SIGN | 8) as i32);
    pub const U16: Self = Self(16);
    pub const S16: Self = Self((IPL_DEPTH_SIGN | 16) as i32);
    pub const S32: Self = Self((IPL_DEPTH_SIGN | 32) as i32);
    pub const F32: Self = Self(32);
    pub const F64: Self = Self(64);

    /// Wrap a raw IPL depth read from an image header
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw value passed across the ABI
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Bits per channel value
    pub fn bits(self) -> u32 {
        (self.0 as u32) & !IPL_DEPTH_SIGN
    }

    /// Whether the depth is signed
    pub fn is_signed(self) -> bool {
        (self.0 as u32) & IPL_DEPTH_SIGN != 0
    }

    /// Element depth for this IPL depth, if it has one
    pub fn to_depth(self) -> Option<Depth> {
        match self {
            Self::U8 => Some(Depth::U8),
            Self::S8 => Some(Depth::S8),
            Self::U16 => Some(Depth::U16),
            Self::S16 => Some(Depth::S16),
            Self::S32 => Some(Depth::S32),
            Self::F32 => Some(Depth::F32),
            Self::F64 => Some(Depth::F64),
            _ => None,
        }
    }
}

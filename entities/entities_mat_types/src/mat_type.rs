//! Matrix Type Constants
//!
//! The `cvMatType` enumeration as an explicit constant table. Every symbolic
//! name carries its literal value so reordering entries cannot shift the
//! numbering native code depends on.
//!
//! The numbering only restarts at channel-count boundaries: the 1-channel
//! group runs 0..=7, the 2-channel group starts at 8 and the 3-channel group
//! at 16. There is no user type for 2 or 3 channels, so 15 and 23 are unused.

use crate::depth::Depth;
use crate::type_code;

/// Packed matrix type as passed to `cvCreateMat`
///
/// A newtype rather than an enum because `CV_8U` and `CV_8UC1` share the
/// value 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatType(i32);

impl MatType {
    pub const CV_8U: Self = Self(0);
    pub const CV_8UC1: Self = Self(0);
    pub const CV_8S: Self = Self(1);
    pub const CV_16U: Self = Self(2);
    pub const CV_16S: Self = Self(3);
    pub const CV_32S: Self = Self(4);
    pub const CV_32F: Self = Self(5);
    pub const CV_64F: Self = Self(6);
    pub const CV_USRTYPE1: Self = Self(7);

    pub const CV_8UC2: Self = Self(8);
    pub const CV_8SC2: Self = Self(9);
    pub const CV_16UC2: Self = Self(10);
    pub const CV_16SC2: Self = Self(11);
    pub const CV_32SC2: Self = Self(12);
    pub const CV_32FC2: Self = Self(13);
    pub const CV_64FC2: Self = Self(14);

    pub const CV_8UC3: Self = Self(16);
    pub const CV_8SC3: Self = Self(17);
    pub const CV_16UC3: Self = Self(18);
    pub const CV_16SC3: Self = Self(19);
    pub const CV_32SC3: Self = Self(20);
    pub const CV_32FC3: Self = Self(21);
    pub const CV_64FC3: Self = Self(22);

    /// Look up a named type by its value
    ///
    /// Returns `None` for values with no entry in the table (including the
    /// gaps at 15 and 23).
    pub fn from_value(value: i32) -> Option<Self> {
        MAT_TYPE_TABLE
            .iter()
            .find(|(_, t)| t.0 == value)
            .map(|(_, t)| *t)
    }

    /// Look up a type by symbolic name, e.g. `"CV_32FC2"`
    pub fn from_name(name: &str) -> Option<Self> {
        MAT_TYPE_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
    }

    /// Build the type for `depth` with `channels` interleaved values
    ///
    /// Only combinations present in the table are returned.
    pub fn with_channels(depth: Depth, channels: i32) -> Option<Self> {
        if !(1..=3).contains(&channels) {
            return None;
        }
        Self::from_value(type_code::make_type(depth, channels))
    }

    /// Raw value passed across the ABI
    pub fn value(self) -> i32 {
        self.0
    }

    /// First symbolic name registered for this value
    pub fn name(self) -> Option<&'static str> {
        MAT_TYPE_TABLE
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(n, _)| *n)
    }

    /// Depth encoded in the low three bits
    pub fn depth(self) -> Depth {
        type_code::depth(self.0)
    }

    /// Channel count encoded in the type
    pub fn channels(self) -> i32 {
        type_code::channels(self.0)
    }
}

impl std::fmt::Display for MatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "MatType({})", self.0),
        }
    }
}

impl From<MatType> for i32 {
    fn from(t: MatType) -> Self {
        t.0
    }
}

/// Every symbolic name with its literal value, in declaration order
pub const MAT_TYPE_TABLE: &[(&str, MatType)] = &[
    ("CV_8U", MatType::CV_8U),
    ("CV_8UC1", MatType::CV_8UC1),
    ("CV_8S", MatType::CV_8S),
    ("CV_16U", MatType::CV_16U),
    ("CV_16S", MatType::CV_16S),
    ("CV_32S", MatType::CV_32S),
    ("CV_32F", MatType::CV_32F),
    ("CV_64F", MatType::CV_64F),
    ("CV_USRTYPE1", MatType::CV_USRTYPE1),
    ("CV_8UC2", MatType::CV_8UC2),
    ("CV_8SC2", MatType::CV_8SC2),
    ("CV_16UC2", MatType::CV_16UC2),
    ("CV_16SC2", MatType::CV_16SC2),
    ("CV_32SC2", MatType::CV_32SC2),
    ("CV_32FC2", MatType::CV_32FC2),
    ("CV_64FC2", MatType::CV_64FC2),
    ("CV_8UC3", MatType::CV_8UC3),
    ("CV_8SC3", MatType::CV_8SC3),
    ("CV_16UC3", MatType::CV_16UC3),
    ("CV_16SC3", MatType::CV_16SC3),
    ("CV_32SC3", MatType::CV_32SC3),
    ("CV_32FC3", MatType::CV_32FC3),
    ("CV_64FC3", MatType::CV_64FC3),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_literal_values() {
        let expected = [
            ("CV_8U", 0),
            ("CV_8UC1", 0),
            ("CV_8S", 1),
            ("CV_16U", 2),
            ("CV_16S", 3),
            ("CV_32S", 4),
            ("CV_32F", 5),
            ("CV_64F", 6),
            ("CV_USRTYPE1", 7),
            ("CV_8UC2", 8),
            ("CV_8SC2", 9),
            ("CV_16UC2", 10),
            ("CV_16SC2", 11),
            ("CV_32SC2", 12),
            ("CV_32FC2", 13),
            ("CV_64FC2", 14),
            ("CV_8UC3", 16),
            ("CV_8SC3", 17),
            ("CV_16UC3", 18),
            ("CV_16SC3", 19),
            ("CV_32SC3", 20),
            ("CV_32FC3", 21),
            ("CV_64FC3", 22),
        ];
        assert_eq!(MAT_TYPE_TABLE.len(), expected.len());
        for ((name, t), (exp_name, exp_value)) in MAT_TYPE_TABLE.iter().zip(expected.iter()) {
            assert_eq!(name, exp_name);
            assert_eq!(t.value(), *exp_value, "{}", name);
        }
    }

    #[test]
    fn test_channel_groups_start_at_boundaries() {
        assert_eq!(MatType::CV_8UC2.value(), 8);
        assert_eq!(MatType::CV_8UC3.value(), 16);
        assert_eq!(MatType::from_value(15), None);
        assert_eq!(MatType::from_value(23), None);
        assert_eq!(MatType::from_value(24), None);
    }

    #[test]
    fn test_first_name_wins_for_zero() {
        assert_eq!(MatType::CV_8UC1, MatType::CV_8U);
        assert_eq!(MatType::from_value(0).and_then(MatType::name), Some("CV_8U"));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(MatType::from_name("CV_32FC2"), Some(MatType::CV_32FC2));
        assert_eq!(MatType::from_name("CV_8UC1"), Some(MatType::CV_8U));
        assert_eq!(MatType::from_name("CV_32FC4"), None);
    }

    #[test]
    fn test_depth_and_channels() {
        assert_eq!(MatType::CV_16SC3.depth(), Depth::S16);
        assert_eq!(MatType::CV_16SC3.channels(), 3);
        assert_eq!(MatType::CV_64FC2.depth(), Depth::F64);
        assert_eq!(MatType::CV_64FC2.channels(), 2);
        assert_eq!(MatType::CV_USRTYPE1.channels(), 1);
    }

    #[test]
    fn test_with_channels() {
        assert_eq!(MatType::with_channels(Depth::F32, 3), Some(MatType::CV_32FC3));
        assert_eq!(MatType::with_channels(Depth::U8, 1), Some(MatType::CV_8U));
        assert_eq!(MatType::with_channels(Depth::UserType1, 2), None);
        assert_eq!(MatType::with_channels(Depth::U8, 4), None);
        assert_eq!(MatType::with_channels(Depth::U8, 0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MatType::CV_32SC2.to_string(), "CV_32SC2");
        assert_eq!(MatType(15).to_string(), "MatType(15)");
    }
}

//! API Facades Layer
//!
//! Top-level entry points: type-code queries on a matrix handle and the
//! core library shared by the whole process.
//!
//! All facades call into the inner layers; none of them touch native
//! memory themselves.

pub mod core_facades;
pub mod mat_facades;

// Re-export main facade functions
pub use core_facades::*;
pub use mat_facades::*;

//! Infrastructure Layer: OpenCV Core Bindings
//!
//! Describes the C API of OpenCV's core module so Rust code can call it:
//! header layouts, one typed signature per entry point, and runtime loading
//! of `libopencv_core` through `libloading`.
//!
//! ## Overview
//!
//! Nothing in this crate is safe to call directly. Function pointers are
//! handed out by [`CoreLibrary`] and every call is `unsafe`; the adapters
//! layer wraps them in owning handles.
//!
//! ## Modules
//!
//! - **[`layout`]**: `CvMat`, `IplImage` and `IplROI` header layouts
//! - **[`signatures`]**: `extern "C"` function-pointer types
//! - **[`library`]**: symbol table and library loading
//! - **[`config`]**: where the library is looked for
//!
//! ## See Also
//!
//! - [`entities_mat_types`](../entities_mat_types/index.html): By-value structs and type codes
//! - [`adapters_opencv_core`](../adapters_opencv_core/index.html): Safe handles

pub mod config;
pub mod error;
pub mod layout;
pub mod library;
pub mod signatures;

pub use config::{LibraryConfig, CORE_LIBRARY_ENV, LIBRARY_DIRS_ENV};
pub use error::BindingError;
pub use layout::{CvArr, CvMat, IplImage, IplROI};
pub use library::{CoreLibrary, CoreSymbols, SYMBOL_NAMES};

//! Core Library Loading
//!
//! Loads `libopencv_core` at runtime and resolves every entry point into a
//! table of typed function pointers. The library handle is kept alongside
//! the table so the pointers stay valid for as long as the table is
//! reachable.

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info, warn};

use crate::config::LibraryConfig;
use crate::error::BindingError;
use crate::signatures::*;

/// Every entry point resolved from the core library, by native name
pub const SYMBOL_NAMES: [&str; 28] = [
    "cvCreateMat",
    "cvCreateImage",
    "cvCloneImage",
    "cvCloneMat",
    "cvReleaseMat",
    "cvReleaseImage",
    "cvCopy",
    "cvSet",
    "cvAddWeighted",
    "cvSetIdentity",
    "cvTranspose",
    "cvSetZero",
    "cvGetElemType",
    "cvSetImageROI",
    "cvGetImageROI",
    "cvResetImageROI",
    "cvGet1D",
    "cvGet2D",
    "cvGet3D",
    "cvGetReal1D",
    "cvGetReal2D",
    "cvGetReal3D",
    "cvSet1D",
    "cvSet2D",
    "cvSet3D",
    "cvSetReal1D",
    "cvSetReal2D",
    "cvSetReal3D",
];

/// Typed function pointers for the core entry points
///
/// Only valid while the library they were resolved from stays loaded; use
/// through [`CoreLibrary`], which owns both.
#[derive(Debug, Clone, Copy)]
pub struct CoreSymbols {
    pub create_mat: CvCreateMatFn,
    pub create_image: CvCreateImageFn,
    pub clone_image: CvCloneImageFn,
    pub clone_mat: CvCloneMatFn,
    pub release_mat: CvReleaseMatFn,
    pub release_image: CvReleaseImageFn,
    pub copy: CvCopyFn,
    pub set: CvSetFn,
    pub add_weighted: CvAddWeightedFn,
    pub set_identity: CvSetIdentityFn,
    pub transpose: CvTransposeFn,
    pub set_zero: CvSetZeroFn,
    pub get_elem_type: CvGetElemTypeFn,
    pub set_image_roi: CvSetImageRoiFn,
    pub get_image_roi: CvGetImageRoiFn,
    pub reset_image_roi: CvResetImageRoiFn,
    pub get_1d: CvGet1DFn,
    pub get_2d: CvGet2DFn,
    pub get_3d: CvGet3DFn,
    pub get_real_1d: CvGetReal1DFn,
    pub get_real_2d: CvGetReal2DFn,
    pub get_real_3d: CvGetReal3DFn,
    pub set_1d: CvSet1DFn,
    pub set_2d: CvSet2DFn,
    pub set_3d: CvSet3DFn,
    pub set_real_1d: CvSetReal1DFn,
    pub set_real_2d: CvSetReal2DFn,
    pub set_real_3d: CvSetReal3DFn,
}

impl CoreSymbols {
    /// Resolve every entry point from `library`
    ///
    /// # Safety
    /// `library` must be an OpenCV core module whose exports have the
    /// signatures declared in [`crate::signatures`].
    pub unsafe fn resolve(library: &Library) -> Result<Self, BindingError> {
        Ok(Self {
            create_mat: lookup(library, "cvCreateMat")?,
            create_image: lookup(library, "cvCreateImage")?,
            clone_image: lookup(library, "cvCloneImage")?,
            clone_mat: lookup(library, "cvCloneMat")?,
            release_mat: lookup(library, "cvReleaseMat")?,
            release_image: lookup(library, "cvReleaseImage")?,
            copy: lookup(library, "cvCopy")?,
            set: lookup(library, "cvSet")?,
            add_weighted: lookup(library, "cvAddWeighted")?,
            set_identity: lookup(library, "cvSetIdentity")?,
            transpose: lookup(library, "cvTranspose")?,
            set_zero: lookup(library, "cvSetZero")?,
            get_elem_type: lookup(library, "cvGetElemType")?,
            set_image_roi: lookup(library, "cvSetImageROI")?,
            get_image_roi: lookup(library, "cvGetImageROI")?,
            reset_image_roi: lookup(library, "cvResetImageROI")?,
            get_1d: lookup(library, "cvGet1D")?,
            get_2d: lookup(library, "cvGet2D")?,
            get_3d: lookup(library, "cvGet3D")?,
            get_real_1d: lookup(library, "cvGetReal1D")?,
            get_real_2d: lookup(library, "cvGetReal2D")?,
            get_real_3d: lookup(library, "cvGetReal3D")?,
            set_1d: lookup(library, "cvSet1D")?,
            set_2d: lookup(library, "cvSet2D")?,
            set_3d: lookup(library, "cvSet3D")?,
            set_real_1d: lookup(library, "cvSetReal1D")?,
            set_real_2d: lookup(library, "cvSetReal2D")?,
            set_real_3d: lookup(library, "cvSetReal3D")?,
        })
    }
}

/// Copy one function pointer out of `library`
unsafe fn lookup<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, BindingError> {
    let sym: Symbol<T> = library
        .get(symbol.as_bytes())
        .map_err(|e| BindingError::SymbolMissing {
            symbol,
            reason: e.to_string(),
        })?;
    Ok(*sym)
}

/// A loaded OpenCV core module
pub struct CoreLibrary {
    symbols: CoreSymbols,
    path: PathBuf,
    // Keeps `symbols` valid; must outlive every pointer copied from it.
    _handle: Library,
}

impl CoreLibrary {
    /// Load the first candidate from `config` that resolves completely
    ///
    /// An explicit path is loaded alone and its failure returned as is.
    /// Otherwise a candidate that loads but lacks an entry point is skipped
    /// like one that fails to load.
    ///
    /// # Errors
    /// - `LoadFailed` / `SymbolMissing`: the explicit path is unusable
    /// - `NotFound`: every searched candidate with its rejection reason
    pub fn open(config: &LibraryConfig) -> Result<Self, BindingError> {
        if let Some(path) = &config.explicit_path {
            return Self::open_path(path).map_err(|e| {
                warn!(path = %path.display(), error = %e, "configured OpenCV core library unusable");
                e
            });
        }

        let candidates = config.candidates();
        let mut tried = Vec::with_capacity(candidates.len());

        for candidate in &candidates {
            debug!(candidate = %candidate.display(), "trying OpenCV core library");
            match Self::open_path(candidate) {
                Ok(library) => return Ok(library),
                Err(e) => {
                    debug!(candidate = %candidate.display(), error = %e, "candidate rejected");
                    tried.push((candidate.display().to_string(), e.to_string()));
                }
            }
        }

        warn!(attempts = tried.len(), "no usable OpenCV core library found");
        Err(BindingError::NotFound(tried))
    }

    /// Load the core library from exactly `path`
    pub fn open_path(path: &Path) -> Result<Self, BindingError> {
        let handle = unsafe { Library::new(path) }.map_err(|e| BindingError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let symbols = unsafe { CoreSymbols::resolve(&handle)? };

        info!(path = %path.display(), "loaded OpenCV core library");
        Ok(Self {
            symbols,
            path: path.to_path_buf(),
            _handle: handle,
        })
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolved entry points
    pub fn symbols(&self) -> &CoreSymbols {
        &self.symbols
    }
}

impl std::fmt::Debug for CoreLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreLibrary").field("path", &self.path).finish()
    }
}

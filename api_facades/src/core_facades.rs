//! Core Library Facades
//!
//! The core library is loaded once per process from the environment
//! (see [`LibraryConfig::from_env`]) and shared from then on. A failed load
//! is remembered too; set the environment before the first call.

use std::sync::{Arc, OnceLock};

use adapters_opencv_core::CoreApi;
use infrastructure_opencv_bindings::{BindingError, CoreLibrary, LibraryConfig};
use tracing::warn;

static DEFAULT_CORE: OnceLock<Result<Arc<CoreLibrary>, BindingError>> = OnceLock::new();

/// The process-wide core library
///
/// # Errors
/// The error of the first load attempt, returned on every call.
pub fn default_core() -> Result<Arc<CoreLibrary>, BindingError> {
    DEFAULT_CORE
        .get_or_init(|| {
            let loaded = CoreLibrary::open(&LibraryConfig::from_env()).map(Arc::new);
            if let Err(e) = &loaded {
                warn!(error = %e, "default OpenCV core library unavailable");
            }
            loaded
        })
        .clone()
}

/// The process-wide core library as handle entry points
pub fn default_api() -> Result<Arc<dyn CoreApi>, BindingError> {
    let api: Arc<dyn CoreApi> = default_core()?;
    Ok(api)
}

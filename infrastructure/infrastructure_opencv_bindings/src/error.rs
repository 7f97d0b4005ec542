//! Binding Errors

use std::path::PathBuf;

/// Errors raised while locating or loading the native core library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No candidate could be loaded; carries every attempted candidate
    /// with the reason it was rejected
    NotFound(Vec<(String, String)>),
    /// A specific library file failed to load (OS loader error)
    LoadFailed { path: PathBuf, reason: String },
    /// The library loaded but lacks an entry point
    SymbolMissing { symbol: &'static str, reason: String },
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingError::NotFound(tried) => {
                write!(f, "OpenCV core library not found (tried: ")?;
                for (i, (candidate, reason)) in tried.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", candidate, reason)?;
                }
                write!(f, ")")
            }
            BindingError::LoadFailed { path, reason } => {
                write!(f, "Failed to load {}: {}", path.display(), reason)
            }
            BindingError::SymbolMissing { symbol, reason } => {
                write!(f, "Entry point {} not found: {}", symbol, reason)
            }
        }
    }
}

impl std::error::Error for BindingError {}

//! Library Discovery Configuration
//!
//! Decides which shared library files are tried when loading the native
//! core module. Configuration comes from the environment:
//!
//! - `OPENCV_FFI_CORE_LIBRARY`: explicit path, tried before anything else
//! - `OPENCV_FFI_LIBRARY_DIRS`: platform path list of directories searched
//!   for the default library names
//!
//! Bare library names are tried last and resolved by the platform loader.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the core library file
pub const CORE_LIBRARY_ENV: &str = "OPENCV_FFI_CORE_LIBRARY";
/// Environment variable listing directories to search
pub const LIBRARY_DIRS_ENV: &str = "OPENCV_FFI_LIBRARY_DIRS";

/// File names the core module ships under on this platform
pub fn default_candidate_names() -> Vec<String> {
    let names: &[&str] = if cfg!(target_os = "macos") {
        &["libopencv_core.dylib"]
    } else if cfg!(windows) {
        &["opencv_core.dll", "opencv_world.dll"]
    } else {
        // Unversioned dev symlink first, then distribution sonames
        &[
            "libopencv_core.so",
            "libopencv_core.so.410",
            "libopencv_core.so.408",
            "libopencv_core.so.406",
            "libopencv_core.so.4.5d",
            "libopencv_core.so.4.2",
            "libopencv_core.so.3.4",
            "libopencv_core.so.3.2",
            "libopencv_core.so.2.4",
        ]
    };
    names.iter().map(|n| n.to_string()).collect()
}

/// Where to look for the native core library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Explicit library file, tried first
    pub explicit_path: Option<PathBuf>,
    /// Directories searched for each candidate name
    pub search_dirs: Vec<PathBuf>,
    /// File names tried in each directory and then bare
    pub candidate_names: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            explicit_path: None,
            search_dirs: Vec::new(),
            candidate_names: default_candidate_names(),
        }
    }
}

impl LibraryConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read configuration through `lookup`
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let explicit_path = lookup(CORE_LIBRARY_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let search_dirs = lookup(LIBRARY_DIRS_ENV)
            .map(|v| {
                std::env::split_paths(&v)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            explicit_path,
            search_dirs,
            ..Self::default()
        }
    }

    /// Use `path` as the explicit library file
    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Append a search directory
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Replace the candidate names
    pub fn with_candidate_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Every path to try, in order
    ///
    /// An explicit path is the only candidate. Otherwise each search
    /// directory joined with each name, then the bare names.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.explicit_path {
            return vec![path.clone()];
        }
        let mut out = Vec::new();
        for dir in &self.search_dirs {
            for name in &self.candidate_names {
                out.push(dir.join(name));
            }
        }
        for name in &self.candidate_names {
            out.push(PathBuf::from(name));
        }
        out
    }
}

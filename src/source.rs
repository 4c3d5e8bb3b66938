//! Loading `.ec` source files from disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File extension of electriC sources, compared case-insensitively.
pub const SOURCE_EXTENSION: &str = "ec";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file '{}': expected a .{} file", .path.display(), SOURCE_EXTENSION)]
    UnsupportedExtension { path: PathBuf },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a source file after checking its extension.
pub fn load(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();

    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
    if !supported {
        return Err(LoadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = source.len(), "loaded source");
    Ok(source)
}

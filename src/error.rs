//! Error types for loading and converting a document.
//!
//! None of these ever leave the render boundary: `render::Renderer` turns
//! every `LoadError` into an error page.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Anything that can go wrong between reading a file and producing HTML.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// File exists but is not valid UTF-8 text
    #[error("Unable to read file as text, it may be binary or use an unsupported encoding: {}", .path.display())]
    NotText { path: PathBuf },

    #[error("Could not read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The syntax highlighter rejected a fenced code block
    #[error("Could not highlight code block: {0}")]
    Highlight(#[from] syntect::Error),
}

impl LoadError {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path },
            io::ErrorKind::PermissionDenied => LoadError::PermissionDenied { path },
            io::ErrorKind::InvalidData => LoadError::NotText { path },
            _ => LoadError::Read { path, source },
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

//! Errors that abort a single demo routine.

use std::io;
use std::path::{Path, PathBuf};

use nos_smoke_core::BufferError;
use thiserror::Error;

/// A failure that ends the current demo early.
///
/// Expected-failure demonstrations never surface as a `DemoError`; they are
/// recorded as informational checks instead.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("memory: {0}")]
    Buffer(#[from] BufferError),
    #[error("{op} {}: {source}", path.display())]
    File {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("output: {0}")]
    Output(#[from] io::Error),
}

impl DemoError {
    pub fn file(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::File {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// errno behind the failure, when there is one.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::File { source, .. } | Self::Output(source) => source.raw_os_error(),
            Self::Buffer(_) => None,
        }
    }
}

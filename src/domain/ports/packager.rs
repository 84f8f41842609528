//! Packager Port
//!
//! Turns a compiled binary into the archive uploaded as a compute unit's
//! code payload. Everything downstream treats the archive as opaque bytes.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::Function;

#[derive(Debug, Error)]
pub enum PackageError {
    /// The compiled binary is missing or unreadable
    #[error("cannot read binary {path}: {source}")]
    BinaryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the archive failed
    #[error("archive write failed for {path}: {message}")]
    ArchiveWrite { path: PathBuf, message: String },
}

/// In-memory code archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Name of the single entry in the archive
    pub entry: String,
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`
    pub sha256: String,
}

impl Archive {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub trait Packager {
    /// Package the function's binary as a single archive entry named `entry`
    fn package(&self, function: &Function, entry: &str) -> Result<Archive, PackageError>;
}

impl<T: Packager + ?Sized> Packager for &T {
    fn package(&self, function: &Function, entry: &str) -> Result<Archive, PackageError> {
        (**self).package(function, entry)
    }
}

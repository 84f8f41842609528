//! Zip packager
//!
//! Wraps a compiled binary into a single-entry zip archive held in memory,
//! ready to upload as a compute unit's code payload.

use std::fs;
use std::io::{Cursor, Write};

use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::entities::Function;
use crate::domain::ports::{Archive, PackageError, Packager};

/// Mode stored on the archive entry; the runtime executes it directly
const EXECUTABLE_MODE: u32 = 0o755;

#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackager;

impl ZipPackager {
    pub fn new() -> Self {
        Self
    }
}

impl Packager for ZipPackager {
    fn package(&self, function: &Function, entry: &str) -> Result<Archive, PackageError> {
        let path = function.binary_path();
        let binary = fs::read(path).map_err(|source| PackageError::BinaryUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let archive_err = |e: &dyn std::fmt::Display| PackageError::ArchiveWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(EXECUTABLE_MODE);

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry, options)
            .map_err(|e| archive_err(&e))?;
        writer.write_all(&binary).map_err(|e| archive_err(&e))?;
        let bytes = writer.finish().map_err(|e| archive_err(&e))?.into_inner();

        let sha256 = format!("{:x}", Sha256::digest(&bytes));
        tracing::debug!(
            function = %function.name,
            entry,
            bytes = bytes.len(),
            %sha256,
            "packaged"
        );

        Ok(Archive {
            entry: entry.to_string(),
            bytes,
            sha256,
        })
    }
}

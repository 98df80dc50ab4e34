//! Whole-file reads and writes with the checks the converter relies on:
//! a missing or unreadable input is fatal, and an existing output file is
//! never overwritten.

use snafu::{ensure, ResultExt, Snafu};
use std::{io::ErrorKind, path::Path};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum FileIoError {
    #[snafu(display("file '{path}' cannot be accessed! Does it exist?"))]
    FileNotFound { path: String },

    #[snafu(display("file '{path}' cannot be opened! Do you have the right permissions?"))]
    PermissionDenied { path: String },

    #[snafu(display("file '{path}' is empty"))]
    EmptyOrUnreadableFile { path: String },

    #[snafu(display(
        "file '{path}' already exists! Delete/move it or choose a different filename"
    ))]
    FileAlreadyExists { path: String },

    #[snafu(display("i/o error on file '{path}': {source}"))]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Reads a whole file into memory, sized to the actual file length.
pub fn read_file(path: &str) -> Result<Vec<u8>, FileIoError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FileIoError::FileNotFound { path: path.into() },
        ErrorKind::PermissionDenied => FileIoError::PermissionDenied { path: path.into() },
        _ => FileIoError::Io {
            path: path.into(),
            source: e,
        },
    })?;

    ensure!(
        !data.is_empty(),
        file_io_error::EmptyOrUnreadableFileSnafu { path }
    );

    Ok(data)
}

/// Writes a whole buffer to a new file, refusing to overwrite.
pub fn write_new_file(path: &str, data: &[u8]) -> Result<(), FileIoError> {
    ensure!(
        !Path::new(path).exists(),
        file_io_error::FileAlreadyExistsSnafu { path }
    );

    match std::fs::write(path, data) {
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            file_io_error::PermissionDeniedSnafu { path }.fail()
        }
        other => other.context(file_io_error::IoSnafu { path }),
    }
}

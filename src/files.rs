//! Whole-file text load and save.

use log::{debug, error};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => FileError::NotFound {
                path: path.to_path_buf(),
            },
            _ => FileError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Read the whole file at `path` as UTF-8 text.
pub fn load_text_file(path: impl AsRef<Path>) -> Result<String, FileError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        error!("failed to load {}: {}", path.display(), e);
        FileError::from_io(path, e)
    })?;
    debug!("loaded {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Create or truncate the file at `path` and write `content` to it.
pub fn save_text_file(path: impl AsRef<Path>, content: &str) -> Result<(), FileError> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| {
        error!("failed to save {}: {}", path.display(), e);
        FileError::from_io(path, e)
    })?;
    debug!("saved {} bytes to {}", content.len(), path.display());
    Ok(())
}

use crate::core_error::SessionError;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// An open regular file and its size at the time it was opened.
#[derive(Debug)]
pub struct FileSource {
    pub path: PathBuf,
    pub file: File,
    pub size: u64,
}

/// Opens `filename` inside `root` for reading.
///
/// Anything that is not an openable regular file (missing, a directory,
/// unreadable) comes back as [`SessionError::NotFound`]; the protocol has a
/// single "unavailable" signal.
pub async fn open_file(root: &Path, filename: &str) -> Result<FileSource, SessionError> {
    let path = root.join(filename);

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            debug!("Cannot open {:?}: {}", path, e);
            return Err(SessionError::NotFound(filename.to_string()));
        }
    };

    let metadata = match file.metadata().await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("Cannot stat {:?}: {}", path, e);
            return Err(SessionError::NotFound(filename.to_string()));
        }
    };

    if !metadata.is_file() {
        debug!("{:?} is not a regular file", path);
        return Err(SessionError::NotFound(filename.to_string()));
    }

    Ok(FileSource {
        path,
        file,
        size: metadata.len(),
    })
}

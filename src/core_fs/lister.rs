use log::{debug, warn};
use std::io;
use std::path::Path;
use tokio::fs;

/// Lists the names of regular files in `dir`, in enumeration order.
///
/// Symlinks are followed, so a link to a file is listed and a link to a
/// directory is not. Entries whose metadata cannot be read are skipped.
pub async fn list_regular_files(dir: &Path) -> Result<Vec<String>, io::Error> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();

        let metadata = match fs::metadata(entry.path()).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {:?}: failed to read metadata: {}", entry.path(), e);
                continue;
            }
        };

        if metadata.is_file() {
            debug!("{}", name);
            names.push(name);
        } else if metadata.is_dir() {
            debug!("{} (directory, not listed)", name);
        }
    }

    Ok(names)
}

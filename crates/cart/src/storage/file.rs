//! File-backed storage: one file per key inside a directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;

use super::{CartStorage, StorageError};

/// Stores each key as a file under `root`. Path separators in keys become
/// underscores, so `shop/cart` lives at `<root>/shop_cart.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Use `root` as the storage directory. The directory is created on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();

        self.root.join(format!("{file_name}.json"))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;

        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        // Write-then-rename: readers only ever see a complete file.
        fs::write(&staging, value)?;

        if let Err(error) = fs::rename(&staging, &path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(path = %staging.display(), "failed to remove staged cart state: {cleanup}");
            }

            return Err(error.into());
        }

        Ok(())
    }
}

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::types::UserDirectory;

/// Get the default user store path (~/.config/bluescore/users.json)
pub fn get_user_store_path() -> PathBuf {
    crate::config::get_config_dir().join("users.json")
}

/// Load the user directory from a JSON file
///
/// If the file doesn't exist, returns a new empty directory.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_user_directory(path: &Path) -> Result<UserDirectory> {
    if !path.exists() {
        return Ok(UserDirectory::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open user store at {}", path.display()))?;

    let directory: UserDirectory =
        serde_json::from_reader(file).context("Failed to load user store")?;

    // Version check
    if directory.version != 1 {
        anyhow::bail!("Unsupported user store version: {}", directory.version);
    }

    Ok(directory)
}

/// Save the user directory to a JSON file atomically
///
/// Uses atomic-write-file so a crash mid-write never corrupts the store.
pub fn save_user_directory(path: &Path, directory: &UserDirectory) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, directory).context("Failed to serialize user store")?;

    file.commit().context("Failed to save user store")?;

    Ok(())
}

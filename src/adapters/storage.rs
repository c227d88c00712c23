use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `data` to `path`, creating missing parent directories and
/// replacing any existing file.
pub fn write_creating_dirs(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, data)?;
    Ok(())
}

/// Local filesystem storage. Relative paths resolve against `base_path`,
/// which defaults to the working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        write_creating_dirs(&full_path, data)
    }
}

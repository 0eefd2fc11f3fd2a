//! File-backed store: one `<key>.json` file per key
//!
//! Reads take a shared lock, writes go through a temp file and an atomic
//! rename under an exclusive lock. With a single writer a reader never sees
//! a half-written blob. Concurrent writers of one key share the temp file
//! and are not coordinated.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use directories::BaseDirs;
use fs2::FileExt;
use regex::Regex;

use super::KeyValueStore;
use crate::types::{Result, SalonError};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store in the default directory (`~/.salonbook/storage/`)
    pub fn new() -> Result<Self> {
        let dir = Self::default_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Create a store rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn default_dir() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| SalonError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".salonbook").join("storage"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key. Keys are restricted to `[A-Za-z0-9_]` so they
    /// cannot escape the store directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !key_pattern().is_match(key) {
            return Err(SalonError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()
            .map_err(|e| SalonError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut content = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut content);
        let _ = file.unlock();
        read?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)
                .map_err(|e| SalonError::Storage(format!("Failed to create temp file: {}", e)))?;
            file.write_all(value.as_bytes())
                .map_err(|e| SalonError::Storage(format!("Failed to write temp file: {}", e)))?;
            file.sync_all()
                .map_err(|e| SalonError::Storage(format!("Failed to sync temp file: {}", e)))?;
        }

        let target = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        target
            .lock_exclusive()
            .map_err(|e| SalonError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let renamed = fs::rename(&temp_path, &path);
        let _ = target.unlock();
        renamed.map_err(|e| SalonError::Storage(format!("Failed to rename temp file: {}", e)))?;

        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let pattern = format!(
            "{}/*.json",
            glob::Pattern::escape(&self.dir.to_string_lossy())
        );
        let mut keys: Vec<String> = glob::glob(&pattern)
            .map_err(|e| SalonError::Storage(format!("Invalid store path: {}", e)))?
            .filter_map(|entry| entry.ok())
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            })
            .filter(|key| key_pattern().is_match(key))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

//! Atomic file operations.
//!
//! Writes go to a hidden temporary file in the target directory, are synced,
//! then renamed over the target. Read-modify-write cycles hold an exclusive
//! lock on a sibling `.lock` file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// TOML parse error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicFileError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicFileError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicFileError {
    fn from(e: serde_json::Error) -> Self {
        AtomicFileError::JsonError(e)
    }
}

impl From<toml::de::Error> for AtomicFileError {
    fn from(e: toml::de::Error) -> Self {
        AtomicFileError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicFileError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicFileError::TomlSerError(e)
    }
}

impl From<AtomicFileError> for prism_core::PrismError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(e) => e.into(),
            AtomicFileError::JsonError(e) => e.into(),
            AtomicFileError::TomlError(e) => e.into(),
            AtomicFileError::TomlSerError(e) => e.into(),
            AtomicFileError::LockError(msg) => prism_core::PrismError::io(msg),
        }
    }
}

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Pretty-printed JSON.
    Json,
    Toml,
}

impl FileFormat {
    fn encode<T: Serialize>(self, data: &T) -> Result<String, AtomicFileError> {
        Ok(match self {
            FileFormat::Json => serde_json::to_string_pretty(data)?,
            FileFormat::Toml => toml::to_string_pretty(data)?,
        })
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, AtomicFileError> {
        Ok(match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        })
    }
}

/// A handle to a file that is always replaced as a whole.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: [`update`](Self::update) holds an exclusive file lock
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(self.format.decode(&content)?))
    }

    /// Writes `data` atomically, creating parent directories as needed.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;

        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Like [`save`](Self::save) but serialized against other writers of the
    /// same file.
    pub fn save_locked(&self, data: &T) -> Result<(), AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.save(data)
    }

    /// Transactional read-modify-write under an exclusive lock.
    ///
    /// `f` sees the current contents (`None` if the file is missing) and
    /// returns the replacement, or `None` to leave the file as it is. Nothing
    /// is written when `f` fails. Returns the contents `f` saw.
    pub fn update<F, E>(&self, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(Option<&T>) -> Result<Option<T>, E>,
        E: From<AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let current = self.load()?;
        if let Some(next) = f(current.as_ref())? {
            self.save(&next)?;
        }

        Ok(current)
    }

    /// Removes the file. Returns `false` if it did not exist.
    pub fn remove(&self) -> Result<bool, AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// Exclusive lock on `.<file>.lock`, released when the handle closes.
///
/// The lock file itself is left in place: removing it while another process
/// waits on the same inode would let two writers in at once.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = lock_path(path);

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

/// `.daily.json.lock` next to `daily.json`. Hidden so directory listings
/// skip it along with temp files.
fn lock_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.lock", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    fn counter(count: u32) -> Counter {
        Counter {
            name: "runs".to_string(),
            count,
        }
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("nested/counter.json"));

        file.save(&counter(42)).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter(42)));
    }

    #[test]
    fn test_save_and_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::toml(temp_dir.path().join("counter.toml"));

        file.save(&counter(7)).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("count = 7"));
        assert_eq!(file.load().unwrap(), Some(counter(7)));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("counter.json"));

        let seen = file
            .update(|c| Ok::<_, AtomicFileError>(Some(counter(c.map_or(0, |c| c.count) + 10))))
            .unwrap();
        assert_eq!(seen, None);

        let seen = file
            .update(|c| Ok::<_, AtomicFileError>(c.map(|c| counter(c.count + 5))))
            .unwrap();
        assert_eq!(seen, Some(counter(10)));
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_update_can_skip_the_write() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("counter.json"));

        let seen = file.update(|_| Ok::<_, AtomicFileError>(None)).unwrap();

        assert_eq!(seen, None);
        assert!(!file.path().exists());
    }

    #[test]
    fn test_failed_update_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("counter.json"));
        file.save(&counter(1)).unwrap();

        let result = file.update(|_| Err(AtomicFileError::LockError("nope".to_string())));

        assert!(result.is_err());
        assert_eq!(file.load().unwrap(), Some(counter(1)));
    }

    #[test]
    fn test_concurrent_updates_do_not_lose_increments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let file = AtomicFile::<Counter>::json(path);
                    for _ in 0..10 {
                        file.update(|c| {
                            Ok::<_, AtomicFileError>(Some(counter(c.map_or(0, |c| c.count) + 1)))
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicFile::<Counter>::json(path);
        assert_eq!(file.load().unwrap().unwrap().count, 80);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("counter.json");
        let file = AtomicFile::<Counter>::json(file_path.clone());

        file.save(&counter(42)).unwrap();

        assert!(!temp_dir.path().join(".counter.json.tmp").exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Counter>::json(temp_dir.path().join("counter.json"));
        file.save(&counter(1)).unwrap();

        assert!(file.remove().unwrap());
        assert!(!file.remove().unwrap());
        assert!(file.load().unwrap().is_none());
    }
}

use crate::cache::CacheError;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// KeyValueStore is the durable string-keyed store on the client. It must keep working with no
/// network at all.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// FileKeyValueStore keeps one file per key inside a directory. Writes go to a temp file that
/// is renamed over the old value, so a crash never leaves a half written value behind.
pub struct FileKeyValueStore {
    directory: PathBuf,
    // Serializes writers within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self, CacheError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| CacheError::io("<directory>", e))?;

        Ok(FileKeyValueStore {
            directory,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let legal = !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !legal {
            return Err(CacheError::IllegalKey(key.to_string()));
        }

        Ok(self.directory.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;

        let mut file = fs::File::create(&tmp_path).map_err(|e| CacheError::io(key, e))?;
        file.write_all(value.as_bytes()).map_err(|e| CacheError::io(key, e))?;
        file.sync_all().map_err(|e| CacheError::io(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| CacheError::io(key, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;

        match fs::remove_file(&path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(key, e)),
        }
    }
}

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache io failure on '{key}'")]
    Io { key: String, source: io::Error },

    #[error("cached value for '{key}' is unreadable")]
    Corrupt { key: String, source: serde_json::Error },

    #[error("illegal cache key '{0}'")]
    IllegalKey(String),

    #[error("cache lock poisoned")]
    Poisoned,
}

impl CacheError {
    pub(super) fn io(key: &str, source: io::Error) -> Self {
        CacheError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub(super) fn corrupt(key: &str, source: serde_json::Error) -> Self {
        CacheError::Corrupt {
            key: key.to_string(),
            source,
        }
    }
}

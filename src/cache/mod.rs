mod error;
mod key_value;
mod local_cache;
mod outbox;

pub use error::CacheError;
pub use key_value::FileKeyValueStore;
pub use key_value::InMemoryKeyValueStore;
pub use key_value::KeyValueStore;
pub use local_cache::LocalCache;
pub use outbox::OutboxEntry;
pub use outbox::OutboxSeq;
pub use outbox::SyncState;

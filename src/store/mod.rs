mod in_memory;
mod store;

pub use in_memory::InMemoryStore;
pub use store::AuditEntry;
pub use store::ElectionStore;
pub use store::StoreTransaction;

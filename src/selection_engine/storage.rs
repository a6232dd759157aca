use std::collections::HashMap;

/// Key/value storage port the engine persists through.
///
/// Two conceptual backends satisfy it in the product: a durable one for the
/// recency map and a session-scoped one for navigation history. The engine
/// never knows which is which; it only needs this get/set contract.
pub trait StoragePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory backend, used in tests and as a default for callers without
/// real persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl StoragePort for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

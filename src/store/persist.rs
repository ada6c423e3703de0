//! Key-value persistence adapter for the state containers.
//!
//! Stores hydrate from the adapter when constructed (or on first touch of a
//! session key) and save on every mutating call. The default adapter is
//! process-local; a durable backend only has to implement these two calls.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

#[derive(Default)]
pub struct InMemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for InMemoryKv {
    fn load(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

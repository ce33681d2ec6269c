//! Durable key-value persistence for snapshots.
//!
//! The store keeps each snapshot under an independent key as plain text. No
//! storage assumptions beyond that: the file-backed implementation is the
//! production path, the in-memory one backs tests.

mod file;
mod in_memory;

pub use file::FileKvStore;
pub use in_memory::InMemoryKvStore;

use std::sync::Arc;

/// Durable key-value store holding serialized snapshots as text.
///
/// Access is strictly sequential (single logical thread of control); no
/// cross-process mutual exclusion is provided.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `clave`, `None` when the key was never written.
    fn get(&self, clave: &str) -> anyhow::Result<Option<String>>;

    /// Replace the value under `clave` with the complete new snapshot.
    fn put(&self, clave: &str, valor: &str) -> anyhow::Result<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, clave: &str) -> anyhow::Result<Option<String>> {
        (**self).get(clave)
    }

    fn put(&self, clave: &str, valor: &str) -> anyhow::Result<()> {
        (**self).put(clave, valor)
    }
}

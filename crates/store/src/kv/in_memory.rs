use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;

use super::KeyValueStore;

/// In-memory key-value store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entradas: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, clave: &str) -> anyhow::Result<Option<String>> {
        let entradas = self
            .entradas
            .read()
            .map_err(|_| anyhow!("lock poisoned"))?;
        Ok(entradas.get(clave).cloned())
    }

    fn put(&self, clave: &str, valor: &str) -> anyhow::Result<()> {
        let mut entradas = self
            .entradas
            .write()
            .map_err(|_| anyhow!("lock poisoned"))?;
        entradas.insert(clave.to_string(), valor.to_string());
        Ok(())
    }
}

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use super::KeyValueStore;

/// File-per-key store rooted at a directory.
///
/// Writes land in a temp file inside the root and are atomically persisted
/// over the target, so a crash mid-write never leaves a truncated snapshot
/// behind.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    raiz: PathBuf,
}

impl FileKvStore {
    pub fn new(raiz: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let raiz = raiz.into();
        fs::create_dir_all(&raiz)
            .with_context(|| format!("failed to create store directory at {raiz:?}"))?;
        Ok(Self { raiz })
    }

    /// Store rooted at the per-app OS data directory:
    /// `{app_data_dir}/paquetera`.
    pub fn por_defecto() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

        let mut raiz = base;
        raiz.push("paquetera");
        Self::new(raiz)
    }

    fn ruta(&self, clave: &str) -> PathBuf {
        self.raiz.join(clave)
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, clave: &str) -> anyhow::Result<Option<String>> {
        let ruta = self.ruta(clave);
        match fs::read_to_string(&ruta) {
            Ok(valor) => Ok(Some(valor)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read snapshot at {ruta:?}")),
        }
    }

    fn put(&self, clave: &str, valor: &str) -> anyhow::Result<()> {
        let ruta = self.ruta(clave);
        let mut temporal = tempfile::NamedTempFile::new_in(&self.raiz)
            .with_context(|| format!("failed to create temp file in {:?}", self.raiz))?;
        temporal
            .write_all(valor.as_bytes())
            .with_context(|| format!("failed to write snapshot for key {clave}"))?;
        temporal
            .persist(&ruta)
            .with_context(|| format!("failed to persist snapshot at {ruta:?}"))?;
        Ok(())
    }
}

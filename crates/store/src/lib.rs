//! Aggregate store for campaign packages.
//!
//! Owns the package collection and the default campaign number, loads both
//! from a durable key-value store on open, and writes the complete snapshot
//! back after every effective mutation (write-through, no batching).

pub mod kv;
pub mod store;

pub use kv::{FileKvStore, InMemoryKvStore, KeyValueStore};
pub use store::{PaqueteStore, StoreError, StoreResult, CLAVE_CAMPANA_DEFAULT, CLAVE_PAQUETES};

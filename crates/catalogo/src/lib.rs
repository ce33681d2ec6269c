//! Catalog domain model: campaign packages and their product line items.
//!
//! This crate contains business rules for packages/products, implemented purely
//! as deterministic domain logic (no IO, no storage). The current instant is
//! always passed in by the caller, so every operation here is reproducible.

pub mod campana;
pub mod paquete;
pub mod producto;
pub mod revista;

pub use campana::Campana;
pub use paquete::Paquete;
pub use producto::{resolver_precio_a_pagar, CambiosProducto, NuevoProducto, Producto};
pub use revista::Revista;

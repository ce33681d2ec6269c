//! Aggregate root: a named package of products for a sales campaign.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paquetera_core::{DomainError, DomainResult, PaqueteId, ProductoId};

use crate::producto::{CambiosProducto, NuevoProducto, Producto};

/// A package exclusively owns its product list: products are created inside a
/// package, live in insertion order, and are discarded with it.
///
/// Mutating operations take the current instant (`ahora`) so the aggregate
/// stays deterministic; `fecha_modificacion` is bumped only by operations that
/// actually changed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paquete {
    id: PaqueteId,
    nombre: String,
    productos: Vec<Producto>,
    fecha_creacion: DateTime<Utc>,
    fecha_modificacion: DateTime<Utc>,
}

impl Paquete {
    /// Create an empty package. The name must be non-blank.
    pub fn nuevo(nombre: impl Into<String>, ahora: DateTime<Utc>) -> DomainResult<Self> {
        let nombre = nombre.into();
        validar_nombre(&nombre)?;
        Ok(Self {
            id: PaqueteId::new(),
            nombre,
            productos: Vec::new(),
            fecha_creacion: ahora,
            fecha_modificacion: ahora,
        })
    }

    pub fn id(&self) -> PaqueteId {
        self.id
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn productos(&self) -> &[Producto] {
        &self.productos
    }

    pub fn fecha_creacion(&self) -> DateTime<Utc> {
        self.fecha_creacion
    }

    pub fn fecha_modificacion(&self) -> DateTime<Utc> {
        self.fecha_modificacion
    }

    pub fn renombrar(&mut self, nombre: impl Into<String>, ahora: DateTime<Utc>) -> DomainResult<()> {
        let nombre = nombre.into();
        validar_nombre(&nombre)?;
        self.nombre = nombre;
        self.fecha_modificacion = ahora;
        Ok(())
    }

    /// Append a product at the tail, resolving its pay price at write time.
    pub fn agregar_producto(
        &mut self,
        alta: NuevoProducto,
        ahora: DateTime<Utc>,
    ) -> DomainResult<ProductoId> {
        validar_alta(&alta)?;
        let producto_id = ProductoId::new();
        self.productos.push(Producto::crear(producto_id, alta));
        self.fecha_modificacion = ahora;
        Ok(producto_id)
    }

    /// Remove a product. Returns whether a removal occurred; the modification
    /// timestamp is only bumped on an effective removal.
    pub fn eliminar_producto(&mut self, producto_id: ProductoId, ahora: DateTime<Utc>) -> bool {
        let antes = self.productos.len();
        self.productos.retain(|p| p.id != producto_id);
        let removido = self.productos.len() != antes;
        if removido {
            self.fecha_modificacion = ahora;
        }
        removido
    }

    /// Merge a partial edit onto a product. Returns `Ok(false)` (no state
    /// change) when the product id is unknown.
    pub fn editar_producto(
        &mut self,
        producto_id: ProductoId,
        cambios: &CambiosProducto,
        ahora: DateTime<Utc>,
    ) -> DomainResult<bool> {
        validar_cambios(cambios)?;
        let Some(producto) = self.productos.iter_mut().find(|p| p.id == producto_id) else {
            return Ok(false);
        };
        producto.aplicar_cambios(cambios);
        self.fecha_modificacion = ahora;
        Ok(true)
    }

    pub fn producto(&self, producto_id: ProductoId) -> Option<&Producto> {
        self.productos.iter().find(|p| p.id == producto_id)
    }

    /// Sum of line subtotals. Zero for an empty package.
    pub fn total(&self) -> Decimal {
        self.productos.iter().map(Producto::subtotal).sum()
    }
}

fn validar_nombre(nombre: &str) -> DomainResult<()> {
    if nombre.trim().is_empty() {
        return Err(DomainError::validation("package name cannot be empty"));
    }
    Ok(())
}

fn validar_alta(alta: &NuevoProducto) -> DomainResult<()> {
    if alta.precio_catalogo <= Decimal::ZERO {
        return Err(DomainError::validation("catalog price must be positive"));
    }
    if let Some(precio_a_pagar) = alta.precio_a_pagar {
        if precio_a_pagar < Decimal::ZERO {
            return Err(DomainError::validation("pay price cannot be negative"));
        }
    }
    if alta.cantidad == 0 {
        return Err(DomainError::validation("cantidad must be positive"));
    }
    Ok(())
}

fn validar_cambios(cambios: &CambiosProducto) -> DomainResult<()> {
    if let Some(precio_catalogo) = cambios.precio_catalogo {
        if precio_catalogo <= Decimal::ZERO {
            return Err(DomainError::validation("catalog price must be positive"));
        }
    }
    if let Some(precio_a_pagar) = cambios.precio_a_pagar {
        if precio_a_pagar < Decimal::ZERO {
            return Err(DomainError::validation("pay price cannot be negative"));
        }
    }
    if let Some(cantidad) = cambios.cantidad {
        if cantidad == 0 {
            return Err(DomainError::validation("cantidad must be positive"));
        }
    }
    Ok(())
}

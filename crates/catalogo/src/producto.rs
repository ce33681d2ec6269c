//! Product line items and the pay-price derivation applied at write time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use paquetera_core::ProductoId;

use crate::campana::Campana;
use crate::revista::Revista;

/// A catalog product inside a package.
///
/// `precio_a_pagar` is always populated: it is resolved once when the product
/// is created or edited (stored value, not a live reference to the catalog
/// price). Serialized field names match the snapshot format (`precioCatalogo`,
/// `precioAPagar`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: ProductoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    pub revista: Revista,
    pub precio_catalogo: Decimal,
    pub precio_a_pagar: Decimal,
    pub campana: Campana,
    pub cantidad: u32,
}

impl Producto {
    pub(crate) fn crear(id: ProductoId, alta: NuevoProducto) -> Self {
        let precio_a_pagar =
            resolver_precio_a_pagar(alta.precio_a_pagar, None, alta.precio_catalogo);
        Self {
            id,
            codigo: alta.codigo,
            nombre: alta.nombre,
            revista: alta.revista,
            precio_catalogo: alta.precio_catalogo,
            precio_a_pagar,
            campana: alta.campana,
            cantidad: alta.cantidad,
        }
    }

    /// Merge present fields onto this product and re-derive the pay price.
    ///
    /// Absent fields are retained.
    pub(crate) fn aplicar_cambios(&mut self, cambios: &CambiosProducto) {
        self.precio_a_pagar = resolver_precio_a_pagar(
            cambios.precio_a_pagar,
            cambios.precio_catalogo,
            self.precio_a_pagar,
        );
        if let Some(codigo) = &cambios.codigo {
            self.codigo = Some(codigo.clone());
        }
        if let Some(nombre) = &cambios.nombre {
            self.nombre = Some(nombre.clone());
        }
        if let Some(revista) = cambios.revista {
            self.revista = revista;
        }
        if let Some(precio_catalogo) = cambios.precio_catalogo {
            self.precio_catalogo = precio_catalogo;
        }
        if let Some(campana) = cambios.campana {
            self.campana = campana;
        }
        if let Some(cantidad) = cambios.cantidad {
            self.cantidad = cantidad;
        }
    }

    /// Line subtotal: pay price times quantity.
    pub fn subtotal(&self) -> Decimal {
        self.precio_a_pagar * Decimal::from(self.cantidad)
    }
}

/// Creation data for a product (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoProducto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    pub revista: Revista,
    pub precio_catalogo: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_a_pagar: Option<Decimal>,
    pub campana: Campana,
    #[serde(default = "cantidad_por_defecto")]
    pub cantidad: u32,
}

impl NuevoProducto {
    pub fn nuevo(revista: Revista, precio_catalogo: Decimal, campana: Campana) -> Self {
        Self {
            codigo: None,
            nombre: None,
            revista,
            precio_catalogo,
            precio_a_pagar: None,
            campana,
            cantidad: cantidad_por_defecto(),
        }
    }
}

fn cantidad_por_defecto() -> u32 {
    1
}

/// Partial edit of a product. Absent fields are retained on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CambiosProducto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revista: Option<Revista>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_catalogo: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_a_pagar: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campana: Option<Campana>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<u32>,
}

/// Resolve the pay price at the point of write.
///
/// The new explicit pay price wins, else the new catalog price, else the
/// previous value. Absence means absence: an explicit zero is kept.
pub fn resolver_precio_a_pagar(
    explicito: Option<Decimal>,
    catalogo: Option<Decimal>,
    anterior: Decimal,
) -> Decimal {
    explicito.or(catalogo).unwrap_or(anterior)
}

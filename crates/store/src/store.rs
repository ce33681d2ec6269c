//! The aggregate store: one state object owning the package collection and
//! the default campaign, with an explicit load/save lifecycle.

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use paquetera_catalogo::{CambiosProducto, Campana, NuevoProducto, Paquete};
use paquetera_core::{DomainError, PaqueteId, ProductoId};

use crate::kv::KeyValueStore;

/// Storage key for the serialized package collection.
pub const CLAVE_PAQUETES: &str = "paquetes-campana";
/// Storage key for the default campaign number (plain text integer).
pub const CLAVE_CAMPANA_DEFAULT: &str = "campana-default";

/// Store operation error.
///
/// Domain failures (validation) are kept apart from storage failures so
/// callers can tell a rejected input from a broken disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Aggregate store over a durable key-value backend.
///
/// All operations are synchronous and run to completion; every mutation that
/// changed state writes the complete snapshot of the affected key before
/// returning. Reference-not-found is a silent no-op throughout.
pub struct PaqueteStore<S: KeyValueStore> {
    kv: S,
    paquetes: Vec<Paquete>,
    campana_default: Campana,
}

impl<S: KeyValueStore> PaqueteStore<S> {
    /// Open the store, loading both keys.
    ///
    /// An unreadable or corrupt entry falls back to the empty collection /
    /// campaign 1 for that key. Failures are reported through `tracing` and
    /// never propagated: opening always succeeds.
    pub fn abrir(kv: S) -> Self {
        let paquetes = cargar_paquetes(&kv);
        let campana_default = cargar_campana_default(&kv);
        Self {
            kv,
            paquetes,
            campana_default,
        }
    }

    pub fn paquetes(&self) -> &[Paquete] {
        &self.paquetes
    }

    pub fn campana_default(&self) -> Campana {
        self.campana_default
    }

    pub fn paquete(&self, paquete_id: PaqueteId) -> Option<&Paquete> {
        self.paquetes.iter().find(|p| p.id() == paquete_id)
    }

    /// Package total; zero when the id is unknown.
    pub fn total_paquete(&self, paquete_id: PaqueteId) -> Decimal {
        self.paquete(paquete_id)
            .map(Paquete::total)
            .unwrap_or(Decimal::ZERO)
    }

    /// Set the process-wide default campaign. Range validity is carried by
    /// the `Campana` type itself.
    pub fn set_campana_default(&mut self, campana: Campana) -> StoreResult<()> {
        self.campana_default = campana;
        self.guardar_campana_default()
    }

    /// Create an empty package and return its id.
    pub fn crear_paquete(&mut self, nombre: &str) -> StoreResult<PaqueteId> {
        let paquete = Paquete::nuevo(nombre, Utc::now())?;
        let paquete_id = paquete.id();
        self.paquetes.push(paquete);
        self.guardar_paquetes()?;
        Ok(paquete_id)
    }

    /// Remove a package and everything it owns. No-op if the id is unknown.
    pub fn eliminar_paquete(&mut self, paquete_id: PaqueteId) -> StoreResult<()> {
        let antes = self.paquetes.len();
        self.paquetes.retain(|p| p.id() != paquete_id);
        if self.paquetes.len() != antes {
            self.guardar_paquetes()?;
        }
        Ok(())
    }

    /// Rename a package. No-op if the id is unknown.
    pub fn renombrar_paquete(&mut self, paquete_id: PaqueteId, nombre: &str) -> StoreResult<()> {
        let Some(paquete) = self.paquetes.iter_mut().find(|p| p.id() == paquete_id) else {
            return Ok(());
        };
        paquete.renombrar(nombre, Utc::now())?;
        self.guardar_paquetes()
    }

    /// Add a product to a package. Returns `None` (no-op) when the package id
    /// is unknown; validation failures surface as domain errors.
    pub fn agregar_producto(
        &mut self,
        paquete_id: PaqueteId,
        alta: NuevoProducto,
    ) -> StoreResult<Option<ProductoId>> {
        let Some(paquete) = self.paquetes.iter_mut().find(|p| p.id() == paquete_id) else {
            return Ok(None);
        };
        let producto_id = paquete.agregar_producto(alta, Utc::now())?;
        self.guardar_paquetes()?;
        Ok(Some(producto_id))
    }

    /// Remove a product from a package. No-op if either id is unknown.
    pub fn eliminar_producto(
        &mut self,
        paquete_id: PaqueteId,
        producto_id: ProductoId,
    ) -> StoreResult<()> {
        let Some(paquete) = self.paquetes.iter_mut().find(|p| p.id() == paquete_id) else {
            return Ok(());
        };
        if paquete.eliminar_producto(producto_id, Utc::now()) {
            self.guardar_paquetes()?;
        }
        Ok(())
    }

    /// Merge a partial edit onto a product. No-op if either id is unknown.
    pub fn editar_producto(
        &mut self,
        paquete_id: PaqueteId,
        producto_id: ProductoId,
        cambios: &CambiosProducto,
    ) -> StoreResult<()> {
        let Some(paquete) = self.paquetes.iter_mut().find(|p| p.id() == paquete_id) else {
            return Ok(());
        };
        if paquete.editar_producto(producto_id, cambios, Utc::now())? {
            self.guardar_paquetes()?;
        }
        Ok(())
    }

    fn guardar_paquetes(&self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&self.paquetes)
            .context("failed to serialize packages snapshot")?;
        self.kv.put(CLAVE_PAQUETES, &snapshot)?;
        Ok(())
    }

    fn guardar_campana_default(&self) -> StoreResult<()> {
        self.kv
            .put(CLAVE_CAMPANA_DEFAULT, &self.campana_default.numero().to_string())?;
        Ok(())
    }
}

fn cargar_paquetes<S: KeyValueStore>(kv: &S) -> Vec<Paquete> {
    let guardado = match kv.get(CLAVE_PAQUETES) {
        Ok(Some(guardado)) => guardado,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("failed to read packages snapshot, starting empty: {err:?}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&guardado) {
        Ok(paquetes) => paquetes,
        Err(err) => {
            tracing::warn!("corrupt packages snapshot, starting empty: {err}");
            Vec::new()
        }
    }
}

fn cargar_campana_default<S: KeyValueStore>(kv: &S) -> Campana {
    let guardado = match kv.get(CLAVE_CAMPANA_DEFAULT) {
        Ok(Some(guardado)) => guardado,
        Ok(None) => return Campana::default(),
        Err(err) => {
            tracing::warn!("failed to read default campaign, using campaign 1: {err:?}");
            return Campana::default();
        }
    };

    match guardado.trim().parse::<u8>().ok().and_then(|n| Campana::new(n).ok()) {
        Some(campana) => campana,
        None => {
            tracing::warn!("corrupt default campaign entry {guardado:?}, using campaign 1");
            Campana::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKvStore;
    use paquetera_catalogo::Revista;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn kv_compartido() -> Arc<InMemoryKvStore> {
        Arc::new(InMemoryKvStore::new())
    }

    fn alta_esika(precio: &str, cantidad: u32) -> NuevoProducto {
        let mut alta = NuevoProducto::nuevo(Revista::Esika, dec(precio), Campana::default());
        alta.cantidad = cantidad;
        alta
    }

    #[test]
    fn created_package_is_retrievable_with_a_fresh_id() {
        let kv = kv_compartido();
        let mut store = PaqueteStore::abrir(kv.clone());

        let primero = store.crear_paquete("Campaña 15").unwrap();
        let segundo = store.crear_paquete("Campaña 16").unwrap();
        assert_ne!(primero, segundo);

        let paquete = store.paquete(primero).unwrap();
        assert_eq!(paquete.nombre(), "Campaña 15");
        assert!(paquete.productos().is_empty());
        assert_eq!(paquete.fecha_creacion(), paquete.fecha_modificacion());
    }

    #[test]
    fn blank_package_name_is_rejected() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        let err = store.crear_paquete("   ").unwrap_err();
        match err {
            StoreError::Domain(DomainError::Validation(_)) => {}
            _ => panic!("Expected a domain validation error"),
        }
        assert!(store.paquetes().is_empty());
    }

    #[test]
    fn mutations_are_visible_after_reopening_over_the_same_backend() {
        let kv = kv_compartido();
        let mut store = PaqueteStore::abrir(kv.clone());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        store
            .agregar_producto(paquete_id, alta_esika("25.00", 2))
            .unwrap();

        let reabierto = PaqueteStore::abrir(kv);
        let paquete = reabierto.paquete(paquete_id).unwrap();
        assert_eq!(paquete.nombre(), "Campaña 15");
        assert_eq!(paquete.productos().len(), 1);
        assert_eq!(reabierto.total_paquete(paquete_id), dec("50.00"));
    }

    #[test]
    fn campaign_scenario_total_is_fifty() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        store
            .agregar_producto(paquete_id, alta_esika("25.00", 2))
            .unwrap();
        assert_eq!(store.total_paquete(paquete_id), dec("50.00"));
    }

    #[test]
    fn deleted_package_is_absent_and_totals_zero() {
        let kv = kv_compartido();
        let mut store = PaqueteStore::abrir(kv.clone());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        store
            .agregar_producto(paquete_id, alta_esika("25.00", 2))
            .unwrap();

        store.eliminar_paquete(paquete_id).unwrap();
        assert!(store.paquete(paquete_id).is_none());
        assert_eq!(store.total_paquete(paquete_id), Decimal::ZERO);

        let reabierto = PaqueteStore::abrir(kv);
        assert!(reabierto.paquete(paquete_id).is_none());
    }

    #[test]
    fn deleting_an_unknown_package_is_a_no_op() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        store.crear_paquete("Campaña 15").unwrap();
        store.eliminar_paquete(PaqueteId::new()).unwrap();
        assert_eq!(store.paquetes().len(), 1);
    }

    #[test]
    fn renaming_an_unknown_package_is_a_no_op() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        store.renombrar_paquete(PaqueteId::new(), "Nada").unwrap();
        assert!(store.paquetes().is_empty());
    }

    #[test]
    fn adding_to_an_unknown_package_returns_none() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        let agregado = store
            .agregar_producto(PaqueteId::new(), alta_esika("10.00", 1))
            .unwrap();
        assert_eq!(agregado, None);
    }

    #[test]
    fn removed_product_never_comes_back() {
        let kv = kv_compartido();
        let mut store = PaqueteStore::abrir(kv.clone());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        let producto_id = store
            .agregar_producto(paquete_id, alta_esika("25.00", 1))
            .unwrap()
            .unwrap();

        store.eliminar_producto(paquete_id, producto_id).unwrap();
        assert!(store.paquete(paquete_id).unwrap().producto(producto_id).is_none());

        let reabierto = PaqueteStore::abrir(kv);
        assert!(reabierto.paquete(paquete_id).unwrap().producto(producto_id).is_none());
    }

    #[test]
    fn removing_an_unknown_product_leaves_modification_time_unchanged() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        let antes = store.paquete(paquete_id).unwrap().fecha_modificacion();

        store.eliminar_producto(paquete_id, ProductoId::new()).unwrap();
        assert_eq!(store.paquete(paquete_id).unwrap().fecha_modificacion(), antes);
    }

    #[test]
    fn edit_merge_rule_applies_through_the_store() {
        let mut store = PaqueteStore::abrir(kv_compartido());
        let paquete_id = store.crear_paquete("Campaña 15").unwrap();
        let mut alta = alta_esika("30.00", 1);
        alta.precio_a_pagar = Some(dec("20.00"));
        let producto_id = store.agregar_producto(paquete_id, alta).unwrap().unwrap();

        let cambios = CambiosProducto {
            precio_catalogo: Some(dec("35.00")),
            ..CambiosProducto::default()
        };
        store.editar_producto(paquete_id, producto_id, &cambios).unwrap();

        let producto = store.paquete(paquete_id).unwrap().producto(producto_id).unwrap();
        assert_eq!(producto.precio_a_pagar, dec("35.00"));
    }

    #[test]
    fn default_campaign_round_trips_through_the_backend() {
        let kv = kv_compartido();
        let mut store = PaqueteStore::abrir(kv.clone());
        assert_eq!(store.campana_default(), Campana::default());

        store.set_campana_default(Campana::new(7).unwrap()).unwrap();
        assert_eq!(kv.get(CLAVE_CAMPANA_DEFAULT).unwrap().as_deref(), Some("7"));

        let reabierto = PaqueteStore::abrir(kv);
        assert_eq!(reabierto.campana_default().numero(), 7);
    }

    #[test]
    fn corrupt_snapshots_fall_back_to_defaults() {
        let kv = kv_compartido();
        kv.put(CLAVE_PAQUETES, "definitely not json").unwrap();
        kv.put(CLAVE_CAMPANA_DEFAULT, "99").unwrap();

        let store = PaqueteStore::abrir(kv);
        assert!(store.paquetes().is_empty());
        assert_eq!(store.campana_default().numero(), 1);
    }
}

#![forbid(unsafe_code)]

use super::support::{SequenceKind, now_ms};
use super::{COMPONENTS_COLLECTION, CatalogStore, EntityKind, PRODUCTS_COLLECTION, StoreError};
use crate::backend::KvBackend;
use std::collections::HashMap;
use tc_core::bom::{BomSummary, refresh_snapshots, summarize, validate_for_save};
use tc_core::{
    Bom, BomLine, BomLineId, Component, ComponentId, ComponentSnapshot, Product, ProductId,
};

impl<B: KvBackend> CatalogStore<B> {
    /// Replaces the product's BOM with `lines` exactly as given. Referenced
    /// component ids are not checked; lines may point at deleted components.
    /// An over-100% total is logged and saved anyway; NaN or infinite numbers
    /// are rejected before anything is written.
    pub fn attach_bom(
        &mut self,
        product_id: &ProductId,
        lines: Vec<BomLine>,
    ) -> Result<Product, StoreError> {
        StoreError::ensure_finite(lines.iter().find_map(BomLine::non_finite_field))?;
        let mut products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let Some(product) = products.iter_mut().find(|p| &p.id == product_id) else {
            return Err(StoreError::not_found(EntityKind::Product, product_id.as_str()));
        };

        if let Some(warning) = validate_for_save(&lines) {
            log::warn!("saving BOM of {product_id} with warning: {warning}");
        }

        let unchanged = product
            .bom
            .as_ref()
            .is_some_and(|bom| bom.items == lines);
        if !unchanged {
            product.bom = Some(Bom { items: lines });
            product.updated_at_ms = now_ms();
        }
        let updated = product.clone();

        self.write_collection(PRODUCTS_COLLECTION, &products)?;
        log::debug!(
            "attached BOM to {product_id} ({} lines)",
            updated.bom_items().len()
        );
        Ok(updated)
    }

    pub fn clear_bom(&mut self, product_id: &ProductId) -> Result<Product, StoreError> {
        let mut products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let Some(product) = products.iter_mut().find(|p| &p.id == product_id) else {
            return Err(StoreError::not_found(EntityKind::Product, product_id.as_str()));
        };
        if product.bom.take().is_some() {
            product.updated_at_ms = now_ms();
        }
        let updated = product.clone();

        self.write_collection(PRODUCTS_COLLECTION, &products)?;
        Ok(updated)
    }

    /// Builds a draft line for `component_id`, freezing the component's
    /// current name, unit, cost and currency into the line.
    pub fn new_bom_line(
        &mut self,
        component_id: &ComponentId,
        quantity: f64,
        percentage: f64,
    ) -> Result<BomLine, StoreError> {
        let Some(component) = self.get_component_by_id(component_id) else {
            return Err(StoreError::not_found(EntityKind::Component, component_id.as_str()));
        };

        let products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let id = self.next_id(SequenceKind::BomLine, |candidate| {
            products
                .iter()
                .flat_map(|p| p.bom_items())
                .any(|line| line.id.as_str() == candidate)
        })?;

        Ok(BomLine::new(
            BomLineId::try_new(id)?,
            &component,
            quantity,
            percentage,
        )?)
    }

    /// Detail-view read of a product's BOM. Totals and the warning are
    /// recomputed on every call.
    pub fn bom_view(&self, product_id: &ProductId) -> Result<BomSummary, StoreError> {
        let Some(product) = self.get_product_by_id(product_id) else {
            return Err(StoreError::not_found(EntityKind::Product, product_id.as_str()));
        };
        let live = self.component_snapshots();
        Ok(summarize(product.bom_items(), |id| live.get(id).cloned()))
    }

    /// Re-reads the components of every line and saves the refreshed BOM.
    /// Lines whose component is gone keep their snapshot.
    pub fn refresh_bom_snapshots(&mut self, product_id: &ProductId) -> Result<Product, StoreError> {
        let Some(product) = self.get_product_by_id(product_id) else {
            return Err(StoreError::not_found(EntityKind::Product, product_id.as_str()));
        };
        if product.bom.is_none() {
            return Ok(product);
        }

        let live = self.component_snapshots();
        let refreshed = refresh_snapshots(product.bom_items(), |id| live.get(id).cloned());
        self.attach_bom(product_id, refreshed)
    }

    fn component_snapshots(&self) -> HashMap<ComponentId, ComponentSnapshot> {
        self.read_collection::<Component>(COMPONENTS_COLLECTION)
            .into_iter()
            .map(|c| (c.id.clone(), c.snapshot()))
            .collect()
    }
}

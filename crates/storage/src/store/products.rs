#![forbid(unsafe_code)]

use super::support::{SequenceKind, now_ms};
use super::{CatalogStore, EntityKind, PRODUCTS_COLLECTION, ProductDraft, ProductPatch, StoreError};
use crate::backend::KvBackend;
use tc_core::projection::by_workspace;
use tc_core::{Product, ProductId, WorkspaceId};

impl<B: KvBackend> CatalogStore<B> {
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let id = self.next_id(SequenceKind::Product, |candidate| {
            products.iter().any(|p| p.id.as_str() == candidate)
        })?;

        let now_ms = now_ms();
        let product = Product {
            id: ProductId::try_new(id)?,
            name: draft.name,
            upc: draft.upc,
            category_type: draft.category_type,
            sub_category: draft.sub_category,
            sku: draft.sku,
            description: draft.description,
            unit_of_measure: draft.unit_of_measure,
            measure_value: draft.measure_value,
            weight: draft.weight,
            color: draft.color,
            collection: draft.collection,
            hs_code: draft.hs_code,
            external_ref: draft.external_ref,
            active: draft.active.unwrap_or(true),
            photos: draft.photos.unwrap_or_default(),
            workspace_id: draft.workspace_id,
            bom: None,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };
        StoreError::ensure_finite(product.non_finite_field())?;

        products.push(product.clone());
        self.write_collection(PRODUCTS_COLLECTION, &products)?;
        log::debug!("created product {}", product.id);
        Ok(product)
    }

    pub fn list_products(&self, workspace: Option<&WorkspaceId>) -> Vec<Product> {
        let products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        match workspace {
            Some(workspace) => by_workspace(&products, workspace),
            None => products,
        }
    }

    pub fn get_product_by_id(&self, id: &ProductId) -> Option<Product> {
        self.read_collection::<Product>(PRODUCTS_COLLECTION)
            .into_iter()
            .find(|p| &p.id == id)
    }

    pub fn update_product(
        &mut self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let mut products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            return Err(StoreError::not_found(EntityKind::Product, id.as_str()));
        };
        patch.apply_to(product);
        StoreError::ensure_finite(product.non_finite_field())?;
        product.updated_at_ms = now_ms();
        let updated = product.clone();

        self.write_collection(PRODUCTS_COLLECTION, &products)?;
        Ok(updated)
    }

    /// Deletes the product together with the BOM it owns.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<bool, StoreError> {
        let mut products: Vec<Product> = self.read_collection(PRODUCTS_COLLECTION);
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Ok(false);
        }

        self.write_collection(PRODUCTS_COLLECTION, &products)?;
        log::debug!("deleted product {id}");
        Ok(true)
    }
}

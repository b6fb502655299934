#![forbid(unsafe_code)]

use tc_core::{Certificate, Component, Photo, Product, Substance, WorkspaceId};

/// Input of `create_component`. Business validation (required name, unit,
/// non-negative cost) is done by the form layer before this is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentDraft {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub unit_cost: f64,
    pub currency: String,
    pub weight: f64,
    pub photos: Option<Vec<Photo>>,
    pub certificates: Option<Vec<Certificate>>,
    pub substances: Option<Vec<Substance>>,
    pub workspace_id: Option<WorkspaceId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
    pub currency: Option<String>,
    pub weight: Option<f64>,
    pub photos: Option<Vec<Photo>>,
    pub certificates: Option<Vec<Certificate>>,
    pub substances: Option<Vec<Substance>>,
    pub workspace_id: Option<Option<WorkspaceId>>,
}

impl ComponentPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn apply_to(self, component: &mut Component) {
        if let Some(name) = self.name {
            component.name = name;
        }
        if let Some(description) = self.description {
            component.description = description;
        }
        if let Some(unit) = self.unit {
            component.unit = unit;
        }
        if let Some(unit_cost) = self.unit_cost {
            component.unit_cost = unit_cost;
        }
        if let Some(currency) = self.currency {
            component.currency = currency;
        }
        if let Some(weight) = self.weight {
            component.weight = weight;
        }
        if let Some(photos) = self.photos {
            component.photos = photos;
        }
        if let Some(certificates) = self.certificates {
            component.certificates = certificates;
        }
        if let Some(substances) = self.substances {
            component.substances = substances;
        }
        if let Some(workspace_id) = self.workspace_id {
            component.workspace_id = workspace_id;
        }
    }
}

/// Input of `create_product`. `active` defaults to true when unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub upc: String,
    pub category_type: String,
    pub sub_category: String,
    pub sku: String,
    pub description: String,
    pub unit_of_measure: String,
    pub measure_value: f64,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub collection: Option<String>,
    pub hs_code: Option<String>,
    pub external_ref: Option<String>,
    pub active: Option<bool>,
    pub photos: Option<Vec<Photo>>,
    pub workspace_id: Option<WorkspaceId>,
}

/// Field edits for `update_product`. The BOM is changed only through `attach_bom`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub upc: Option<String>,
    pub category_type: Option<String>,
    pub sub_category: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub unit_of_measure: Option<String>,
    pub measure_value: Option<f64>,
    pub weight: Option<Option<f64>>,
    pub color: Option<Option<String>>,
    pub collection: Option<Option<String>>,
    pub hs_code: Option<Option<String>>,
    pub external_ref: Option<Option<String>>,
    pub active: Option<bool>,
    pub photos: Option<Vec<Photo>>,
    pub workspace_id: Option<Option<WorkspaceId>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(upc) = self.upc {
            product.upc = upc;
        }
        if let Some(category_type) = self.category_type {
            product.category_type = category_type;
        }
        if let Some(sub_category) = self.sub_category {
            product.sub_category = sub_category;
        }
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(unit_of_measure) = self.unit_of_measure {
            product.unit_of_measure = unit_of_measure;
        }
        if let Some(measure_value) = self.measure_value {
            product.measure_value = measure_value;
        }
        if let Some(weight) = self.weight {
            product.weight = weight;
        }
        if let Some(color) = self.color {
            product.color = color;
        }
        if let Some(collection) = self.collection {
            product.collection = collection;
        }
        if let Some(hs_code) = self.hs_code {
            product.hs_code = hs_code;
        }
        if let Some(external_ref) = self.external_ref {
            product.external_ref = external_ref;
        }
        if let Some(active) = self.active {
            product.active = active;
        }
        if let Some(photos) = self.photos {
            product.photos = photos;
        }
        if let Some(workspace_id) = self.workspace_id {
            product.workspace_id = workspace_id;
        }
    }
}

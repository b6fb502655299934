#![forbid(unsafe_code)]

use crate::ids::{BomLineId, ComponentId, ProductId, WorkspaceId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Composition sub-entry of a material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substance {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cas_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit: String,
    pub unit_cost: f64,
    pub currency: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub substances: Vec<Substance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub created_at_ms: i64,
    #[serde(default)]
    pub updated_at_ms: i64,
}

impl Component {
    pub fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot {
            name: self.name.clone(),
            unit: self.unit.clone(),
            unit_cost: self.unit_cost,
            currency: self.currency.clone(),
        }
    }

    /// First number field JSON cannot carry (NaN or infinite), if any.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let substances = self
            .substances
            .iter()
            .filter_map(|s| s.percentage)
            .map(|p| ("substances.percentage", p));
        first_non_finite(
            [("unitCost", self.unit_cost), ("weight", self.weight)]
                .into_iter()
                .chain(substances),
        )
    }
}

/// Display fields of a component frozen into a BOM line when the line is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSnapshot {
    pub name: String,
    pub unit: String,
    pub unit_cost: f64,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub id: BomLineId,
    /// Non-owning reference; the component may have been deleted since.
    pub component_id: ComponentId,
    pub component: ComponentSnapshot,
    pub quantity: f64,
    pub percentage: f64,
}

impl BomLine {
    pub fn new(
        id: BomLineId,
        component: &Component,
        quantity: f64,
        percentage: f64,
    ) -> Result<Self, BomLineError> {
        validate_line_numbers(quantity, percentage)?;
        Ok(Self {
            id,
            component_id: component.id.clone(),
            component: component.snapshot(),
            quantity,
            percentage,
        })
    }

    pub fn line_cost(&self) -> f64 {
        self.quantity * self.component.unit_cost
    }

    pub fn non_finite_field(&self) -> Option<&'static str> {
        first_non_finite([
            ("quantity", self.quantity),
            ("percentage", self.percentage),
            ("component.unitCost", self.component.unit_cost),
        ])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BomLineError {
    QuantityNotFinite,
    NegativeQuantity,
    PercentageNotFinite,
    PercentageOutOfRange,
}

impl BomLineError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::QuantityNotFinite => "quantity must be a finite number",
            Self::NegativeQuantity => "quantity must not be negative",
            Self::PercentageNotFinite => "percentage must be a finite number",
            Self::PercentageOutOfRange => "percentage must be between 0 and 100",
        }
    }
}

impl std::fmt::Display for BomLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for BomLineError {}

fn validate_line_numbers(quantity: f64, percentage: f64) -> Result<(), BomLineError> {
    if !quantity.is_finite() {
        return Err(BomLineError::QuantityNotFinite);
    }
    if quantity < 0.0 {
        return Err(BomLineError::NegativeQuantity);
    }
    if !percentage.is_finite() {
        return Err(BomLineError::PercentageNotFinite);
    }
    if !(0.0..=100.0).contains(&percentage) {
        return Err(BomLineError::PercentageOutOfRange);
    }
    Ok(())
}

fn first_non_finite(
    fields: impl IntoIterator<Item = (&'static str, f64)>,
) -> Option<&'static str> {
    fields
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    #[serde(default)]
    pub items: Vec<BomLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// UPC / EAN code.
    #[serde(default)]
    pub upc: String,
    #[serde(default)]
    pub category_type: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit_of_measure: String,
    #[serde(default)]
    pub measure_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom: Option<Bom>,
    #[serde(default)]
    pub created_at_ms: i64,
    #[serde(default)]
    pub updated_at_ms: i64,
}

impl Product {
    pub fn bom_items(&self) -> &[BomLine] {
        self.bom.as_ref().map(|bom| bom.items.as_slice()).unwrap_or(&[])
    }

    /// Like [`Component::non_finite_field`], including the lines of the BOM.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let own = [("measureValue", self.measure_value)]
            .into_iter()
            .chain(self.weight.map(|w| ("weight", w)));
        first_non_finite(own)
            .or_else(|| self.bom_items().iter().find_map(BomLine::non_finite_field))
    }
}

fn default_active() -> bool {
    true
}

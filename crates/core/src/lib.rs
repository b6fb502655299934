#![forbid(unsafe_code)]

pub mod bom;
pub mod ids;
pub mod model;
pub mod projection;

pub use ids::{BomLineId, ComponentId, EntityIdError, ProductId, WorkspaceId, WorkspaceIdError};
pub use model::{
    Bom, BomLine, BomLineError, Certificate, Component, ComponentSnapshot, Photo, Product,
    Substance,
};

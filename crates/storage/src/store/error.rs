#![forbid(unsafe_code)]

use crate::backend::StorageError;
use tc_core::{BomLineError, EntityIdError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Component,
    Product,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Product => "product",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Encode(serde_json::Error),
    InvalidInput(&'static str),
    /// NaN or infinite value in a number field; JSON would store it as null.
    NonFiniteNumber { field: &'static str },
    NotFound { entity: EntityKind, id: String },
}

impl StoreError {
    pub(crate) fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn ensure_finite(field: Option<&'static str>) -> Result<(), Self> {
        match field {
            Some(field) => Err(Self::NonFiniteNumber { field }),
            None => Ok(()),
        }
    }

    /// Stable code for the UI layer to pick a message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::QuotaExceeded { .. }) => "QUOTA_EXCEEDED",
            Self::Storage(_) => "STORAGE",
            Self::Encode(_) => "ENCODE",
            Self::InvalidInput(_) | Self::NonFiniteNumber { .. } => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage: {err}"),
            Self::Encode(err) => write!(f, "encode: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NonFiniteNumber { field } => {
                write!(f, "invalid input: {field} must be a finite number")
            }
            Self::NotFound { entity, id } => write!(f, "{} not found: {id}", entity.as_str()),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidInput(_) | Self::NonFiniteNumber { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<EntityIdError> for StoreError {
    fn from(value: EntityIdError) -> Self {
        Self::InvalidInput(value.message())
    }
}

impl From<BomLineError> for StoreError {
    fn from(value: BomLineError) -> Self {
        Self::InvalidInput(value.message())
    }
}

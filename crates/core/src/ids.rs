#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

const MAX_ENTITY_ID_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityIdError {
    Empty,
    TooLong,
    ContainsWhitespace,
    ContainsControl,
}

impl EntityIdError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "id must not be empty",
            Self::TooLong => "id is too long",
            Self::ContainsWhitespace => "id must not contain whitespace",
            Self::ContainsControl => "id contains control characters",
        }
    }
}

impl std::fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EntityIdError {}

fn validate_entity_id(value: &str) -> Result<(), EntityIdError> {
    if value.is_empty() {
        return Err(EntityIdError::Empty);
    }
    if value.len() > MAX_ENTITY_ID_LEN {
        return Err(EntityIdError::TooLong);
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(EntityIdError::ContainsControl);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(EntityIdError::ContainsWhitespace);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId(String);

impl ComponentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, EntityIdError> {
        let value = value.into();
        validate_entity_id(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for ComponentId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ComponentId> for String {
    fn from(value: ComponentId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, EntityIdError> {
        let value = value.into();
        validate_entity_id(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for ProductId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BomLineId(String);

impl BomLineId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, EntityIdError> {
        let value = value.into();
        validate_entity_id(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for BomLineId {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<BomLineId> for String {
    fn from(value: BomLineId) -> Self {
        value.0
    }
}

impl std::fmt::Display for BomLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tenant tag carried by catalog entities. Entities without one are global.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, WorkspaceIdError> {
        let value = value.into();
        validate_workspace_id(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = WorkspaceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<WorkspaceId> for String {
    fn from(value: WorkspaceId) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceIdError {
    Empty,
    TooLong,
    InvalidFirstChar,
    InvalidChar { ch: char, index: usize },
}

impl std::fmt::Display for WorkspaceIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "workspace id must not be empty"),
            Self::TooLong => write!(f, "workspace id is too long"),
            Self::InvalidFirstChar => write!(f, "workspace id must start with a letter or digit"),
            Self::InvalidChar { ch, index } => {
                write!(f, "workspace id has invalid char {ch:?} at {index}")
            }
        }
    }
}

impl std::error::Error for WorkspaceIdError {}

fn validate_workspace_id(value: &str) -> Result<(), WorkspaceIdError> {
    if value.is_empty() {
        return Err(WorkspaceIdError::Empty);
    }
    if value.len() > 128 {
        return Err(WorkspaceIdError::TooLong);
    }
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(WorkspaceIdError::Empty);
    };
    if !first.is_ascii_alphanumeric() {
        return Err(WorkspaceIdError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate().skip(1) {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '/' | '-') {
            continue;
        }
        return Err(WorkspaceIdError::InvalidChar { ch, index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_validation() {
        assert_eq!(ComponentId::try_new("").unwrap_err(), EntityIdError::Empty);
        assert_eq!(
            ProductId::try_new("PRD 1").unwrap_err(),
            EntityIdError::ContainsWhitespace
        );
        assert_eq!(
            BomLineId::try_new("BOM\u{0007}1").unwrap_err(),
            EntityIdError::ContainsControl
        );
        assert_eq!(
            ComponentId::try_new("x".repeat(129)).unwrap_err(),
            EntityIdError::TooLong
        );
        assert!(ComponentId::try_new("CMP-0001").is_ok());
    }

    #[test]
    fn workspace_id_validation() {
        assert_eq!(WorkspaceId::try_new("").unwrap_err(), WorkspaceIdError::Empty);
        assert_eq!(
            WorkspaceId::try_new("-ws").unwrap_err(),
            WorkspaceIdError::InvalidFirstChar
        );
        assert_eq!(
            WorkspaceId::try_new("ws a").unwrap_err(),
            WorkspaceIdError::InvalidChar { ch: ' ', index: 2 }
        );
        assert!(WorkspaceId::try_new("acme/textiles-01").is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ProductId::try_new("PRD-0007").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"PRD-0007\"");

        let parsed: Result<ComponentId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }
}

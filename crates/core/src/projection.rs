#![forbid(unsafe_code)]

//! Read-side filters used by the UI flows. Input order is always preserved.

use crate::ids::WorkspaceId;
use crate::model::{Component, Product};

pub trait Scoped {
    fn workspace_id(&self) -> Option<&WorkspaceId>;
}

pub trait Named {
    fn name(&self) -> &str;
}

impl Scoped for Component {
    fn workspace_id(&self) -> Option<&WorkspaceId> {
        self.workspace_id.as_ref()
    }
}

impl Scoped for Product {
    fn workspace_id(&self) -> Option<&WorkspaceId> {
        self.workspace_id.as_ref()
    }
}

impl Named for Component {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps global entities (no workspace tag) and those tagged with `workspace`.
pub fn by_workspace<T: Scoped + Clone>(entities: &[T], workspace: &WorkspaceId) -> Vec<T> {
    entities
        .iter()
        .filter(|entity| is_visible_in(*entity, workspace))
        .cloned()
        .collect()
}

pub fn is_visible_in<T: Scoped + ?Sized>(entity: &T, workspace: &WorkspaceId) -> bool {
    entity
        .workspace_id()
        .is_none_or(|tag| tag == workspace)
}

/// Case-insensitive substring match on the name. An empty query keeps everything.
pub fn by_search_text<T: Named + Clone>(entities: &[T], query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return entities.to_vec();
    }
    entities
        .iter()
        .filter(|entity| entity.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#![forbid(unsafe_code)]

use super::support::{SequenceKind, now_ms};
use super::{
    COMPONENTS_COLLECTION, CatalogStore, ComponentDraft, ComponentPatch, EntityKind, StoreError,
};
use crate::backend::KvBackend;
use tc_core::projection::by_workspace;
use tc_core::{Component, ComponentId, WorkspaceId};

impl<B: KvBackend> CatalogStore<B> {
    pub fn create_component(&mut self, draft: ComponentDraft) -> Result<Component, StoreError> {
        let mut components: Vec<Component> = self.read_collection(COMPONENTS_COLLECTION);
        let id = self.next_id(SequenceKind::Component, |candidate| {
            components.iter().any(|c| c.id.as_str() == candidate)
        })?;

        let now_ms = now_ms();
        let component = Component {
            id: ComponentId::try_new(id)?,
            name: draft.name,
            description: draft.description,
            unit: draft.unit,
            unit_cost: draft.unit_cost,
            currency: draft.currency,
            weight: draft.weight,
            photos: draft.photos.unwrap_or_default(),
            certificates: draft.certificates.unwrap_or_default(),
            substances: draft.substances.unwrap_or_default(),
            workspace_id: draft.workspace_id,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        };
        StoreError::ensure_finite(component.non_finite_field())?;

        components.push(component.clone());
        self.write_collection(COMPONENTS_COLLECTION, &components)?;
        log::debug!("created component {}", component.id);
        Ok(component)
    }

    /// All components in insertion order, optionally narrowed to one workspace
    /// (global components stay visible).
    pub fn list_components(&self, workspace: Option<&WorkspaceId>) -> Vec<Component> {
        let components: Vec<Component> = self.read_collection(COMPONENTS_COLLECTION);
        match workspace {
            Some(workspace) => by_workspace(&components, workspace),
            None => components,
        }
    }

    pub fn get_component_by_id(&self, id: &ComponentId) -> Option<Component> {
        self.read_collection::<Component>(COMPONENTS_COLLECTION)
            .into_iter()
            .find(|c| &c.id == id)
    }

    pub fn update_component(
        &mut self,
        id: &ComponentId,
        patch: ComponentPatch,
    ) -> Result<Component, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let mut components: Vec<Component> = self.read_collection(COMPONENTS_COLLECTION);
        let Some(component) = components.iter_mut().find(|c| &c.id == id) else {
            return Err(StoreError::not_found(EntityKind::Component, id.as_str()));
        };
        patch.apply_to(component);
        StoreError::ensure_finite(component.non_finite_field())?;
        component.updated_at_ms = now_ms();
        let updated = component.clone();

        self.write_collection(COMPONENTS_COLLECTION, &components)?;
        Ok(updated)
    }

    /// Removes the component without touching BOM lines that reference it;
    /// those keep rendering from their snapshots.
    pub fn delete_component(&mut self, id: &ComponentId) -> Result<bool, StoreError> {
        let mut components: Vec<Component> = self.read_collection(COMPONENTS_COLLECTION);
        let before = components.len();
        components.retain(|c| &c.id != id);
        if components.len() == before {
            return Ok(false);
        }

        self.write_collection(COMPONENTS_COLLECTION, &components)?;
        log::debug!("deleted component {id}");
        Ok(true)
    }
}

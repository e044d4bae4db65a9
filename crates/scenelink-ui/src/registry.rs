//! Host registry
//!
//! Stand-in for the host application's class registry: the addon
//! registers its descriptors here during activation and removes them
//! during deactivation. Registration is strict — duplicate ids and
//! removals of unknown ids are errors, so a module that unregisters
//! something it never registered is caught early.

use thiserror::Error;

use crate::descriptors::{
    OperatorDescriptor, PanelDescriptor, PreferencePageDescriptor, PropertyGroupDescriptor,
};

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate registration: {0}")]
    Duplicate(String),

    #[error("not registered: {0}")]
    NotRegistered(String),
}

/// The host's registration surface
#[derive(Default)]
pub struct HostRegistry {
    panels: Vec<PanelDescriptor>,
    operators: Vec<OperatorDescriptor>,
    property_groups: Vec<PropertyGroupDescriptor>,
    preference_pages: Vec<PreferencePageDescriptor>,
}

fn add<T>(items: &mut Vec<T>, item: T, id: &str, ids: impl Fn(&T) -> &str) -> Result<(), RegistryError> {
    if items.iter().any(|existing| ids(existing) == id) {
        return Err(RegistryError::Duplicate(id.to_string()));
    }
    items.push(item);
    Ok(())
}

fn remove<T>(items: &mut Vec<T>, id: &str, ids: impl Fn(&T) -> &str) -> Result<T, RegistryError> {
    match items.iter().position(|existing| ids(existing) == id) {
        Some(index) => Ok(items.remove(index)),
        None => Err(RegistryError::NotRegistered(id.to_string())),
    }
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_panel(&mut self, panel: PanelDescriptor) -> Result<(), RegistryError> {
        let id = panel.id.clone();
        add(&mut self.panels, panel, &id, |p| &p.id)
    }

    pub fn remove_panel(&mut self, id: &str) -> Result<PanelDescriptor, RegistryError> {
        remove(&mut self.panels, id, |p| &p.id)
    }

    pub fn add_operator(&mut self, operator: OperatorDescriptor) -> Result<(), RegistryError> {
        let id = operator.id.clone();
        add(&mut self.operators, operator, &id, |o| &o.id)
    }

    pub fn remove_operator(&mut self, id: &str) -> Result<OperatorDescriptor, RegistryError> {
        remove(&mut self.operators, id, |o| &o.id)
    }

    pub fn add_property_group(
        &mut self,
        group: PropertyGroupDescriptor,
    ) -> Result<(), RegistryError> {
        let id = group.id.clone();
        add(&mut self.property_groups, group, &id, |g| &g.id)
    }

    pub fn remove_property_group(
        &mut self,
        id: &str,
    ) -> Result<PropertyGroupDescriptor, RegistryError> {
        remove(&mut self.property_groups, id, |g| &g.id)
    }

    pub fn add_preference_page(
        &mut self,
        page: PreferencePageDescriptor,
    ) -> Result<(), RegistryError> {
        let id = page.id.clone();
        add(&mut self.preference_pages, page, &id, |p| &p.id)
    }

    pub fn remove_preference_page(
        &mut self,
        id: &str,
    ) -> Result<PreferencePageDescriptor, RegistryError> {
        remove(&mut self.preference_pages, id, |p| &p.id)
    }

    /// Look up an operator by id
    pub fn operator(&self, id: &str) -> Option<&OperatorDescriptor> {
        self.operators.iter().find(|o| o.id == id)
    }

    /// Look up a panel by id
    pub fn panel(&self, id: &str) -> Option<&PanelDescriptor> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn property_group_count(&self) -> usize {
        self.property_groups.len()
    }

    pub fn preference_page_count(&self) -> usize {
        self.preference_pages.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
            && self.operators.is_empty()
            && self.property_groups.is_empty()
            && self.preference_pages.is_empty()
    }
}

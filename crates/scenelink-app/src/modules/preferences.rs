//! Addon preferences page

use scenelink_ui::{PreferencePageDescriptor, RegistryError};

use super::AddonModule;
use crate::lifecycle::LifecycleContext;

const PAGE_ID: &str = "scenelink.preferences";

/// Registers the addon's preferences page
pub struct PreferencesModule;

impl AddonModule for PreferencesModule {
    fn name(&self) -> &'static str {
        "preferences"
    }

    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        ctx.registry.add_preference_page(PreferencePageDescriptor {
            id: PAGE_ID.to_string(),
            label: "Scenelink".to_string(),
        })
    }

    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        ctx.registry.remove_preference_page(PAGE_ID)?;
        Ok(())
    }
}

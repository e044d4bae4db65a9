//! Viewport panels

use scenelink_ui::{PanelDescriptor, PanelSpace, RegistryError};

use super::AddonModule;
use crate::lifecycle::LifecycleContext;

const PANELS: [(&str, &str, PanelSpace); 3] = [
    ("scenelink.main", "Scenelink", PanelSpace::Sidebar),
    ("scenelink.rooms", "Rooms", PanelSpace::Sidebar),
    ("scenelink.session", "Session", PanelSpace::Properties),
];

/// Registers the addon's UI panels
pub struct PanelsModule;

impl AddonModule for PanelsModule {
    fn name(&self) -> &'static str {
        "panels"
    }

    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        for (id, label, space) in PANELS {
            ctx.registry.add_panel(PanelDescriptor {
                id: id.to_string(),
                label: label.to_string(),
                space,
            })?;
        }
        log::debug!("registered {} panels", PANELS.len());
        Ok(())
    }

    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        for (id, _, _) in PANELS.iter().rev() {
            ctx.registry.remove_panel(id)?;
        }
        Ok(())
    }
}
